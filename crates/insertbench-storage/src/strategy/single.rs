//! Single-row strategies: one statement execution per record.

use std::sync::Arc;

use insertbench_core::errors::{InsertError, StorageError};
use insertbench_core::Record;
use rusqlite::Connection;

use super::{
    acknowledged_rows, count_rows, require_records, truncate_table, InsertStrategy, RowAck,
    SingleInsert,
};
use crate::connection::writer::with_immediate_transaction;
use crate::connection::DatabaseManager;
use crate::queries::records;

/// Rows between progress events.
const PROGRESS_EVERY: usize = 1000;

type RowInserter = fn(&Connection, &Record) -> Result<usize, StorageError>;

fn insert_each(
    db: &DatabaseManager,
    label: &str,
    records: &[Record],
    insert_row: RowInserter,
) -> Result<usize, InsertError> {
    let inserted = db.with_writer(|conn| {
        with_immediate_transaction(conn, |tx| {
            let mut acks = Vec::with_capacity(records.len());
            for (i, record) in records.iter().enumerate() {
                acks.push(RowAck::Affected(insert_row(tx, record)?));
                if (i + 1) % PROGRESS_EVERY == 0 {
                    tracing::trace!(strategy = label, rows = i + 1, "single insert progress");
                }
            }
            Ok::<_, InsertError>(acknowledged_rows(acks))
        })
    })?;
    tracing::debug!(strategy = label, inserted, "single insert complete");
    Ok(inserted)
}

/// Parses, binds, and steps a fresh statement for every row.
pub struct SingleRowStrategy {
    db: Arc<DatabaseManager>,
}

impl SingleRowStrategy {
    const LABEL: &'static str = "SQLite-Single";

    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }
}

impl InsertStrategy for SingleRowStrategy {
    fn label(&self) -> &str {
        Self::LABEL
    }

    fn truncate(&self) -> Result<(), StorageError> {
        truncate_table(&self.db)
    }

    fn count(&self) -> Result<i64, StorageError> {
        count_rows(&self.db)
    }
}

impl SingleInsert for SingleRowStrategy {
    fn insert_single(&mut self, records: Option<&[Record]>) -> Result<usize, InsertError> {
        let records = require_records(records)?;
        if records.is_empty() {
            return Ok(0);
        }
        insert_each(&self.db, Self::LABEL, records, records::insert_adhoc)
    }
}

/// Reuses one cached statement, still one step per row.
pub struct CachedSingleStrategy {
    db: Arc<DatabaseManager>,
}

impl CachedSingleStrategy {
    const LABEL: &'static str = "SQLite-Single-Cached";

    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }
}

impl InsertStrategy for CachedSingleStrategy {
    fn label(&self) -> &str {
        Self::LABEL
    }

    fn truncate(&self) -> Result<(), StorageError> {
        truncate_table(&self.db)
    }

    fn count(&self) -> Result<i64, StorageError> {
        count_rows(&self.db)
    }
}

impl SingleInsert for CachedSingleStrategy {
    fn insert_single(&mut self, records: Option<&[Record]>) -> Result<usize, InsertError> {
        let records = require_records(records)?;
        if records.is_empty() {
            return Ok(0);
        }
        insert_each(&self.db, Self::LABEL, records, records::insert_cached)
    }
}
