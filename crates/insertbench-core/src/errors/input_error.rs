//! Caller-side input errors. Reported immediately, never retried.

use super::error_code::{self, ErrorCode};

/// Errors raised when an operation is handed an argument it cannot accept.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("{what} must not be absent")]
    Absent { what: &'static str },

    #[error("chunk size must be at least 1, but was: {value}")]
    ChunkSizeTooSmall { value: i64 },

    #[error("count must be non-negative, but was: {value}")]
    NegativeCount { value: i64 },

    #[error("required field {field} is missing")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },
}

impl ErrorCode for InputError {
    fn error_code(&self) -> &'static str {
        error_code::INVALID_INPUT
    }
}
