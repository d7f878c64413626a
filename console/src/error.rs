//! Console error handling
//!
//! Every failure is scoped to the action that triggered it. Pages turn an
//! error into a single banner string with [`ConsoleError::user_message`].

use thiserror::Error;

/// Console error type
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Local form check failed; no request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// The API answered with a non-success status
    #[error("Request failed with status {status}")]
    Request {
        status: u16,
        /// `message` field of the error body, when the server sent one
        message: Option<String>,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConsoleError {
    /// Banner text: the server's message when present, else `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ConsoleError::Request {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            ConsoleError::Validation(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// HTTP status of a failed request
    pub fn status(&self) -> Option<u16> {
        match self {
            ConsoleError::Request { status, .. } => Some(*status),
            ConsoleError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for console operations
pub type ConsoleResult<T> = Result<T, ConsoleError>;
