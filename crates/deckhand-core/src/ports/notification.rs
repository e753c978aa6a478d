//! Notification port (driven/secondary port)
//!
//! How the sync layer reports outcomes to the user. Notifications are
//! fire-and-forget: `notify` never blocks and never fails.

use serde::{Deserialize, Serialize};

/// Visual category of a toast
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl std::fmt::Display for ToastKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ToastKind::Info => "info",
            ToastKind::Success => "success",
            ToastKind::Warning => "warning",
            ToastKind::Error => "error",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for ToastKind {
    type Err = crate::domain::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(ToastKind::Info),
            "success" => Ok(ToastKind::Success),
            "warning" => Ok(ToastKind::Warning),
            "error" => Ok(ToastKind::Error),
            other => Err(crate::domain::DomainError::ValidationFailed(format!(
                "unknown toast kind '{other}'"
            ))),
        }
    }
}

/// Port trait for user-visible feedback
pub trait INotifier: Send + Sync {
    /// Shows `message` to the user with the default lifetime
    fn notify(&self, message: &str, kind: ToastKind);
}
