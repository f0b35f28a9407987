//! Error types
//!
//! Every failure the screen can hit collapses into one of three kinds. None of
//! them is fatal: they end up as a single line in the error banner.

use thiserror::Error;

use crate::constants::MSG_REQUIRED_FIELDS;
use crate::messages::network::Operation;

/// Failure of a book operation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BookError {
    /// A required form field was empty; nothing was sent
    #[error("title and author are required")]
    Validation,

    /// The server answered with a non-success status
    #[error("server responded with status {0}")]
    Request(u16),

    /// Connection, timeout or decoding failure
    #[error("transport failure: {0}")]
    Transport(String),
}

impl BookError {
    /// Localized banner text for this error raised by `operation`.
    ///
    /// Request and transport failures share the operation's message.
    pub fn user_message(&self, operation: Operation) -> &'static str {
        match self {
            BookError::Validation => MSG_REQUIRED_FIELDS,
            BookError::Request(_) | BookError::Transport(_) => operation.failure_message(),
        }
    }
}

impl From<reqwest::Error> for BookError {
    fn from(e: reqwest::Error) -> Self {
        let msg = if e.is_timeout() {
            "request timed out".to_string()
        } else if e.is_connect() {
            format!("connection failed: {}", e)
        } else if e.is_decode() {
            format!("invalid response body: {}", e)
        } else {
            format!("request failed: {}", e)
        };
        BookError::Transport(msg)
    }
}

/// Startup configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API base URL {url:?}: {reason}")]
    InvalidApiUrl { url: String, reason: String },
}
