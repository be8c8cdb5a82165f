//! # insertbench-core
//!
//! Shared foundation for the insertbench workspace: the record entity under
//! test, one error enum per subsystem, layered TOML configuration, and
//! tracing setup.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

pub use types::record::{Amount, Record, RecordStatus};
