//! Write connection utilities: BEGIN IMMEDIATE transactions and savepoints.

use insertbench_core::errors::StorageError;
use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::sqlite_err;

/// Execute a write operation inside a BEGIN IMMEDIATE transaction.
/// The write lock is taken at transaction start, so a busy store fails
/// before any row is written. Errors from `f` roll the whole transaction back.
pub fn with_immediate_transaction<F, T, E>(conn: &Connection, f: F) -> Result<T, E>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, E>,
    E: From<StorageError>,
{
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
        .map_err(|e| StorageError::SqliteError {
            message: format!("failed to begin immediate transaction: {e}"),
        })?;

    // Dropping `tx` on the error path rolls back.
    let result = f(&tx)?;

    tx.commit().map_err(|e| StorageError::SqliteError {
        message: format!("failed to commit: {e}"),
    })?;

    Ok(result)
}

/// Run `f` inside a named SAVEPOINT and RELEASE it afterwards.
/// On error the savepoint is rolled back and released before returning.
pub fn with_savepoint<F, T, E>(conn: &Connection, name: &str, f: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    E: From<StorageError>,
{
    conn.execute_batch(&format!("SAVEPOINT {name}"))
        .map_err(sqlite_err)?;

    match f() {
        Ok(value) => {
            conn.execute_batch(&format!("RELEASE {name}"))
                .map_err(sqlite_err)?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback) =
                conn.execute_batch(&format!("ROLLBACK TO {name}; RELEASE {name}"))
            {
                tracing::warn!(savepoint = name, error = %rollback, "savepoint rollback failed");
            }
            Err(e)
        }
    }
}
