//! Deckhand API - HTTP client for the console server
//!
//! Provides:
//! - A typed client for the instance and folder endpoints
//! - The [`IConsoleApi`](deckhand_core::ports::IConsoleApi) adapter used by
//!   the sync store
//!
//! ## Modules
//!
//! - [`client`] - reqwest-based HTTP client
//! - [`provider`] - Port adapter mapping client errors to `ApiError`

pub mod client;
pub mod provider;

pub use client::ConsoleClient;
pub use provider::HttpConsoleApi;

use deckhand_core::ports::ApiError;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the console server
#[derive(Debug, Error)]
pub enum ClientError {
    /// A network-level error occurred
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// Status code returned by the server
        status: StatusCode,
        /// Response body, as text
        body: String,
    },

    /// The response body could not be parsed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NetworkError(e) => ApiError::Transport(e.to_string()),
            ClientError::UnexpectedStatus { status, body } => ApiError::Status {
                status: status.as_u16(),
                body,
            },
            ClientError::InvalidResponse(msg) => ApiError::InvalidResponse(msg),
        }
    }
}
