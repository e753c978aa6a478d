//! Domain entities
//!
//! This module contains the core domain types for Deckhand:
//! - Newtypes for server-assigned identifiers
//! - Instance and folder records as reported by the console API
//! - Domain-specific error types

pub mod errors;
pub mod instance;
pub mod newtypes;

// Re-export commonly used types
pub use errors::DomainError;
pub use instance::{Folder, Instance, InstanceUpdate};
pub use newtypes::{FolderId, InstanceId, ToastId};
