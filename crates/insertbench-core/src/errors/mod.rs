//! Error handling for insertbench.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod input_error;
pub mod insert_error;
pub mod report_error;
pub mod run_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use input_error::InputError;
pub use insert_error::InsertError;
pub use report_error::ReportError;
pub use run_error::{RunError, RunOutcome};
pub use storage_error::StorageError;
