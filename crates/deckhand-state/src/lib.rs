//! Deckhand State - Client-side state for the console
//!
//! Provides:
//! - A generic observable value with subscription and replay
//! - A toast queue with per-entry expiry
//! - Single-slot confirm and input dialogs that callers can await
//! - An optimistic sync store for instances and folders
//!
//! ## Modules
//!
//! - [`observable`] - `ObservableState<T>` and `Subscription`
//! - [`toast`] - `ToastQueue`, also the store's `INotifier`
//! - [`modal`] - `ModalBroker`, `Deferred`, `Resolver`
//! - [`store`] - `SyncStore` (optimistic edits, rollback by reload)
//! - [`console`] - `Console`, one wired session

pub mod console;
pub mod modal;
pub mod observable;
pub mod store;
pub mod toast;

pub use console::Console;
pub use modal::{ConfirmRequest, Deferred, InputRequest, ModalBroker, Resolver};
pub use observable::{ObservableState, Subscription};
pub use store::{Outcome, SyncState, SyncStore};
pub use toast::{Toast, ToastQueue};
