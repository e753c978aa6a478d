//! Toast queue
//!
//! An ordered list of transient notifications. Each toast may carry an
//! expiry timer; expiry and manual dismissal both remove by id, so whichever
//! comes second is a harmless no-op.

use std::time::Duration;

use deckhand_core::config::DEFAULT_TOAST_DURATION_MS;
use deckhand_core::domain::ToastId;
use deckhand_core::ports::{INotifier, ToastKind};
use serde::Serialize;
use tracing::{debug, warn};

use crate::observable::ObservableState;

/// A notification currently on screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub kind: ToastKind,
}

/// Queue of active toasts with per-entry auto-expiry
///
/// Cloning shares the same queue.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: ObservableState<Vec<Toast>>,
    default_duration: Duration,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_TOAST_DURATION_MS))
    }
}

impl ToastQueue {
    /// Creates an empty queue whose [`push`](Self::push) uses `default_duration`
    pub fn new(default_duration: Duration) -> Self {
        Self {
            toasts: ObservableState::new(Vec::new()),
            default_duration,
        }
    }

    /// The observable toast list, in insertion order
    pub fn state(&self) -> &ObservableState<Vec<Toast>> {
        &self.toasts
    }

    /// Snapshot of the active toasts
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.get()
    }

    pub fn default_duration(&self) -> Duration {
        self.default_duration
    }

    /// Appends a toast and schedules its removal after `duration`
    ///
    /// A zero `duration` keeps the toast until it is dismissed. Expiry needs
    /// a Tokio runtime; without one the toast is kept and a warning logged.
    pub fn add_toast(&self, message: impl Into<String>, kind: ToastKind, duration: Duration) -> ToastId {
        let toast = Toast {
            id: ToastId::new(),
            message: message.into(),
            kind,
        };
        let id = toast.id;
        debug!(toast_id = %id, %kind, message = %toast.message, "Adding toast");

        self.toasts.update(|all| {
            let mut next = all.clone();
            next.push(toast);
            next
        });

        if !duration.is_zero() {
            self.schedule_expiry(id, duration);
        }
        id
    }

    /// Appends a toast with the queue's default lifetime
    pub fn push(&self, message: impl Into<String>, kind: ToastKind) -> ToastId {
        self.add_toast(message, kind, self.default_duration)
    }

    /// Appends an info toast with the queue's default lifetime
    pub fn info(&self, message: impl Into<String>) -> ToastId {
        self.push(message, ToastKind::Info)
    }

    /// Removes the toast with `id`; unknown ids are ignored
    pub fn dismiss_toast(&self, id: ToastId) {
        self.toasts.update(|all| all.iter().filter(|t| t.id != id).cloned().collect());
    }

    fn schedule_expiry(&self, id: ToastId, duration: Duration) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(toast_id = %id, "No async runtime; toast will not expire");
            return;
        };
        let toasts = self.clone();
        handle.spawn(async move {
            tokio::time::sleep(duration).await;
            debug!(toast_id = %id, "Toast expired");
            toasts.dismiss_toast(id);
        });
    }
}

impl INotifier for ToastQueue {
    fn notify(&self, message: &str, kind: ToastKind) {
        self.push(message, kind);
    }
}
