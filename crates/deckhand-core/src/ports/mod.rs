//! Port definitions (hexagonal architecture interfaces)
//!
//! Ports are the interfaces the state layer depends on; their
//! implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IConsoleApi`] - The remote instance/folder API
//! - [`INotifier`] - User-visible feedback (toasts)

pub mod console_api;
pub mod notification;

pub use console_api::{ApiError, IConsoleApi};
pub use notification::{INotifier, ToastKind};
