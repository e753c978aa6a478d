//! List command - Show instances grouped by folder
//!
//! Provides the `deckhand list` CLI command which:
//! 1. Loads instances and folders from the console
//! 2. Groups instances by folder, in folder order
//! 3. Collects uncategorized instances (and any whose folder is unknown)
//!    into a trailing group

use anyhow::{bail, Result};
use clap::Args;
use deckhand_core::domain::{FolderId, Instance};
use deckhand_state::SyncState;
use serde::Serialize;

use crate::session::Session;

/// Show instances grouped by folder
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only show this folder (empty: uncategorized)
    #[arg(long, value_name = "ID")]
    pub folder: Option<FolderId>,
}

/// One section of the listing
#[derive(Debug, Serialize)]
pub struct FolderGroup<'a> {
    /// `None` for the uncategorized section
    pub id: Option<&'a FolderId>,
    pub name: &'a str,
    pub instances: Vec<&'a Instance>,
}

/// Groups `state`'s instances by folder
///
/// Folders keep their server order; the uncategorized group is always last.
pub fn group_by_folder(state: &SyncState) -> Vec<FolderGroup<'_>> {
    let mut groups: Vec<FolderGroup<'_>> = state
        .folders
        .iter()
        .map(|folder| FolderGroup {
            id: Some(&folder.id),
            name: &folder.name,
            instances: state.instances_in(&folder.id).collect(),
        })
        .collect();

    let loose = state
        .instances
        .iter()
        .filter(|i| match &i.folder_id {
            Some(id) if !id.is_uncategorized() => state.folder(id).is_none(),
            _ => true,
        })
        .collect();
    groups.push(FolderGroup {
        id: None,
        name: "Uncategorized",
        instances: loose,
    });
    groups
}

fn describe(instance: &Instance) -> String {
    let mut line = format!("{} [{}]", instance.name, instance.id);
    for detail in [&instance.kind, &instance.version, &instance.status] {
        if !detail.is_empty() {
            line.push_str("  ");
            line.push_str(detail);
        }
    }
    line
}

impl ListCommand {
    pub async fn execute(&self, session: &Session) -> Result<()> {
        let state = session.load().await?;
        let mut groups = group_by_folder(&state);

        if let Some(wanted) = &self.folder {
            groups.retain(|g| match g.id {
                Some(id) => id == wanted,
                None => wanted.is_uncategorized(),
            });
            if groups.is_empty() {
                bail!("Unknown folder '{}'", wanted);
            }
        }

        let formatter = session.formatter();
        if session.format().is_json() {
            formatter.print_json(&serde_json::to_value(&groups)?);
            return Ok(());
        }

        for group in &groups {
            if group.id.is_none() && group.instances.is_empty() && self.folder.is_none() {
                continue;
            }
            let heading = match group.id {
                Some(id) => format!("{} ({}) - {} instance(s)", group.name, id, group.instances.len()),
                None => format!("{} - {} instance(s)", group.name, group.instances.len()),
            };
            formatter.success(&heading);
            for instance in &group.instances {
                formatter.info(&describe(instance));
            }
        }
        Ok(())
    }
}
