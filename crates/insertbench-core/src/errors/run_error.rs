//! Run-level errors and non-fatal error collection.

use super::error_code::ErrorCode;
use super::{ConfigError, InputError, InsertError, ReportError, StorageError};

/// Errors that can occur during a benchmark run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Trial failed for {label} after {completed} completed iteration(s): {source}")]
    TrialAborted {
        label: String,
        completed: usize,
        #[source]
        source: StorageError,
    },
}

impl From<InsertError> for RunError {
    fn from(e: InsertError) -> Self {
        match e {
            InsertError::InvalidInput(e) => Self::InvalidInput(e),
            InsertError::Store(e) => Self::Storage(e),
        }
    }
}

impl ErrorCode for RunError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Report(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::TrialAborted { source, .. } => source.error_code(),
        }
    }
}

/// Outcome of a run that accumulates non-fatal errors.
/// Partial results are returned even when some configurations fail.
#[derive(Debug, Default)]
pub struct RunOutcome<T: Default = ()> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal errors collected during the run.
    pub errors: Vec<RunError>,
}

impl<T: Default> RunOutcome<T> {
    /// Create a new outcome with no errors.
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    /// Add a non-fatal error to the outcome.
    pub fn add_error(&mut self, error: RunError) {
        self.errors.push(error);
    }

    /// Returns true if there are no non-fatal errors.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of non-fatal errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
