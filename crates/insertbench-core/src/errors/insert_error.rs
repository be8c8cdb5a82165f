//! Errors surfaced by an insertion strategy call.

use super::error_code::ErrorCode;
use super::{InputError, StorageError};

/// Either the caller handed bad input, or the store rejected the operation.
#[derive(Debug, thiserror::Error)]
pub enum InsertError {
    #[error(transparent)]
    InvalidInput(#[from] InputError),

    #[error(transparent)]
    Store(#[from] StorageError),
}

impl ErrorCode for InsertError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(e) => e.error_code(),
            Self::Store(e) => e.error_code(),
        }
    }
}
