//! Domain error types
//!
//! Validation failures for identifiers and user-supplied values.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid instance identifier
    #[error("Invalid instance ID: {0}")]
    InvalidInstanceId(String),

    /// Invalid folder identifier
    #[error("Invalid folder ID: {0}")]
    InvalidFolderId(String),

    /// Invalid folder name
    #[error("Invalid folder name: {0}")]
    InvalidFolderName(String),

    /// Generic validation failure
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}
