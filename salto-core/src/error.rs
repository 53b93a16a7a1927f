//! Error types for the salto ecosystem.

use thiserror::Error;

/// Errors that can occur when loading or validating an event program.
#[derive(Error, Debug)]
pub enum SaltoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session '{id}': {reason}")]
    InvalidSession { id: String, reason: String },

    #[error("Event program has no sessions")]
    EmptyProgram,

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for salto operations.
pub type SaltoResult<T> = Result<T, SaltoError>;
