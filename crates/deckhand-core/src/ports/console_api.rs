//! Console API port (driven/secondary port)
//!
//! The remote service that owns instances and folders. The server is the
//! single source of truth; callers treat every error variant the same way
//! ("the operation failed") and only distinguish them for diagnostics.

use thiserror::Error;

use crate::domain::{Folder, FolderId, Instance, InstanceId, InstanceUpdate};

/// Failure of a call to the console API
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never completed (connection refused, DNS, reset)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// The response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// HTTP status code, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the request failed before a response arrived
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

/// Port trait for the instance/folder API
///
/// ## Implementation Notes
///
/// - Any non-2xx status must surface as [`ApiError::Status`].
/// - Implementations must not retry; the caller reconciles by reloading.
#[async_trait::async_trait]
pub trait IConsoleApi: Send + Sync {
    /// `GET /api/instances`
    async fn list_instances(&self) -> Result<Vec<Instance>, ApiError>;

    /// `GET /api/folders`
    async fn list_folders(&self) -> Result<Vec<Folder>, ApiError>;

    /// `PATCH /api/instances/{id}` with the full settings body
    async fn update_instance(
        &self,
        instance_id: &InstanceId,
        update: &InstanceUpdate,
    ) -> Result<(), ApiError>;

    /// `POST /api/folders` with `{name}`
    async fn create_folder(&self, name: &str) -> Result<(), ApiError>;

    /// `DELETE /api/folders/{id}`
    async fn delete_folder(&self, folder_id: &FolderId) -> Result<(), ApiError>;

    /// `PATCH /api/folders/{id}` with `{name}`
    async fn rename_folder(&self, folder_id: &FolderId, name: &str) -> Result<(), ApiError>;
}
