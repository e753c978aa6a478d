//! Instance and folder records
//!
//! These mirror the JSON documents served by `GET /api/instances` and
//! `GET /api/folders`. Records are immutable snapshots: an optimistic edit
//! produces a new record rather than mutating one in place.

use serde::{Deserialize, Serialize};

use super::newtypes::{FolderId, InstanceId};

/// A managed server instance as reported by the console API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    /// Stable, server-assigned identifier
    pub id: InstanceId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Server flavour (e.g. "paper", "fabric")
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Game version
    #[serde(default)]
    pub version: String,
    /// Runtime status (e.g. "Online", "Offline")
    #[serde(default)]
    pub status: String,
    /// Folder assignment; `Some("")` is uncategorized, `None` is unreported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<FolderId>,
    /// Maximum heap in MiB
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_memory: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java_args: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jar_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Working directory on the server host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_command: Option<String>,
}

impl Instance {
    /// Creates an instance record with only the required fields set
    pub fn new(id: InstanceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: String::new(),
            version: String::new(),
            status: String::new(),
            folder_id: None,
            max_memory: None,
            java_args: None,
            jar_file: None,
            java_path: None,
            webhook_url: None,
            group: None,
            directory: None,
            start_command: None,
        }
    }

    /// Sets the folder assignment
    pub fn with_folder(mut self, folder_id: FolderId) -> Self {
        self.folder_id = Some(folder_id);
        self
    }

    /// Whether this instance is assigned to `folder_id`
    pub fn is_in_folder(&self, folder_id: &FolderId) -> bool {
        self.folder_id.as_ref() == Some(folder_id)
    }

    /// Whether this instance belongs to no folder
    ///
    /// Both the empty folder id and an unreported one count.
    pub fn is_uncategorized(&self) -> bool {
        self.folder_id
            .as_ref()
            .map_or(true, FolderId::is_uncategorized)
    }
}

/// A folder grouping instances in the console
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Stable, server-assigned identifier
    pub id: FolderId,
    /// Display name
    pub name: String,
    /// Creation time in unix seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl Folder {
    /// Creates a folder record
    pub fn new(id: FolderId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            created_at: None,
        }
    }
}

/// Body of `PATCH /api/instances/{id}`
///
/// The endpoint replaces the full set of mutable settings, so a folder move
/// carries every other setting along unchanged. Unset settings are omitted
/// from the JSON body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_memory: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub java_args: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jar_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub java_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub folder_id: FolderId,
}

impl InstanceUpdate {
    /// Builds an update that keeps `instance`'s settings and assigns `folder_id`
    pub fn move_to(instance: &Instance, folder_id: FolderId) -> Self {
        Self {
            max_memory: instance.max_memory,
            java_args: instance.java_args.clone(),
            jar_file: instance.jar_file.clone(),
            java_path: instance.java_path.clone(),
            webhook_url: instance.webhook_url.clone(),
            group: instance.group.clone(),
            folder_id,
        }
    }
}
