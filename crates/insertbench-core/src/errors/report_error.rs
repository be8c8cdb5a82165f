//! Report sink errors. Logged as warnings, never fatal to a run.

use super::error_code::{self, ErrorCode};

/// Errors raised while rendering or persisting a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to create output directory {path}: {message}")]
    CreateDir { path: String, message: String },

    #[error("failed to write report {path}: {message}")]
    Write { path: String, message: String },

    #[error("failed to serialize report: {message}")]
    Serialize { message: String },
}

impl ErrorCode for ReportError {
    fn error_code(&self) -> &'static str {
        error_code::REPORT_ERROR
    }
}
