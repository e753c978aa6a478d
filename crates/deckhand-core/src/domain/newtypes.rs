//! Domain newtypes
//!
//! Strongly-typed wrappers for identifiers. Instance and folder ids are
//! assigned by the server and travel inside URL paths, so the checked
//! constructors reject characters that would change the request path.
//! Deserialization is unchecked: whatever the server reports is kept.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::DomainError;

/// Characters that may not appear in an id used as a path segment
const RESERVED_PATH_CHARS: &[char] = &['/', '?', '#', '%'];

fn has_reserved_chars(id: &str) -> bool {
    id.chars()
        .any(|c| RESERVED_PATH_CHARS.contains(&c) || c.is_whitespace())
}

// ============================================================================
// InstanceId
// ============================================================================

/// Server-assigned identifier of a managed instance
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    /// Create a new InstanceId
    ///
    /// # Errors
    /// Returns error if the id is empty or contains path-reserved characters
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.is_empty() {
            return Err(DomainError::InvalidInstanceId(
                "Instance ID cannot be empty".to_string(),
            ));
        }
        if has_reserved_chars(&id) {
            return Err(DomainError::InvalidInstanceId(format!(
                "Instance ID contains invalid characters: {id}"
            )));
        }
        Ok(Self(id))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for InstanceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for InstanceId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ============================================================================
// FolderId
// ============================================================================

/// Server-assigned identifier of a folder
///
/// The empty id is meaningful: an instance whose folder id is empty is
/// uncategorized. It is distinct from an instance that reports no folder
/// id at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderId(String);

impl FolderId {
    /// Create a new FolderId
    ///
    /// The empty string is accepted and denotes "uncategorized".
    ///
    /// # Errors
    /// Returns error if the id contains path-reserved characters
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if has_reserved_chars(&id) {
            return Err(DomainError::InvalidFolderId(format!(
                "Folder ID contains invalid characters: {id}"
            )));
        }
        Ok(Self(id))
    }

    /// The "no folder" id
    #[must_use]
    pub fn uncategorized() -> Self {
        Self(String::new())
    }

    /// Whether this id denotes "no folder"
    #[must_use]
    pub fn is_uncategorized(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FolderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FolderId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ============================================================================
// ToastId
// ============================================================================

/// Identifier of a toast notification
///
/// Random rather than sequential, so ids stay unique across rapid
/// concurrent calls without shared counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToastId(Uuid);

impl ToastId {
    /// Create a new random ToastId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a ToastId from an existing UUID
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID value
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ToastId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
