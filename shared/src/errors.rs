//! Error types for the Fitware console

use thiserror::Error;

/// Errors raised while translating form values into API values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Invalid date-time: {0}")]
    InvalidDateTime(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown session status: {0}")]
    UnknownStatus(String),
}
