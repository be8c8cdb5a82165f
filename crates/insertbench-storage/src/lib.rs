//! # insertbench-storage
//!
//! SQLite persistence for the benchmark table and the insertion strategies
//! measured against it. All strategies share one [`DatabaseManager`] and
//! therefore one logical table.

pub mod connection;
pub mod migrations;
pub mod queries;
pub mod strategy;

pub use connection::DatabaseManager;
pub use strategy::{
    BatchInsert, CachedSingleStrategy, InsertStrategy, MultiRowBatchStrategy,
    PreparedBatchStrategy, SingleInsert, SingleRowStrategy,
};

use insertbench_core::errors::StorageError;

/// Map a rusqlite error onto the storage error taxonomy.
pub(crate) fn sqlite_err(e: rusqlite::Error) -> StorageError {
    match e.sqlite_error_code() {
        Some(rusqlite::ErrorCode::DatabaseBusy) | Some(rusqlite::ErrorCode::DatabaseLocked) => {
            StorageError::Busy {
                message: e.to_string(),
            }
        }
        _ => StorageError::SqliteError {
            message: e.to_string(),
        },
    }
}
