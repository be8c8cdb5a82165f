//! Batch strategy: one cached prepared statement, a savepoint per chunk.

use std::sync::Arc;

use insertbench_core::errors::{InputError, InsertError, StorageError};
use insertbench_core::Record;

use super::{
    acknowledged_rows, count_rows, require_records, truncate_table, validate_chunk_size,
    BatchInsert, InsertStrategy, RowAck, DEFAULT_CHUNK_SIZE,
};
use crate::connection::writer::{with_immediate_transaction, with_savepoint};
use crate::connection::DatabaseManager;
use crate::queries::records;

const LABEL: &str = "SQLite-Prepared";

/// Steps a reused statement once per row and releases a savepoint at every
/// chunk boundary. The driver hands back only rowids, so each row is
/// acknowledged as [`RowAck::NoInfo`].
pub struct PreparedBatchStrategy {
    db: Arc<DatabaseManager>,
    chunk_size: usize,
    last_flushes: usize,
}

impl PreparedBatchStrategy {
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self {
            db,
            chunk_size: DEFAULT_CHUNK_SIZE,
            last_flushes: 0,
        }
    }
}

impl InsertStrategy for PreparedBatchStrategy {
    fn label(&self) -> &str {
        LABEL
    }

    fn truncate(&self) -> Result<(), StorageError> {
        truncate_table(&self.db)
    }

    fn count(&self) -> Result<i64, StorageError> {
        count_rows(&self.db)
    }
}

impl BatchInsert for PreparedBatchStrategy {
    fn insert_batch(&mut self, records: Option<&[Record]>) -> Result<usize, InsertError> {
        let records = require_records(records)?;
        self.last_flushes = 0;
        if records.is_empty() {
            return Ok(0);
        }

        let chunk_size = self.chunk_size;
        let (inserted, flushes) = self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                let mut acks = Vec::with_capacity(records.len());
                let mut flushes = 0;
                for chunk in records.chunks(chunk_size) {
                    with_savepoint(tx, "chunk", || {
                        for record in chunk {
                            records::insert_returning_rowid(tx, record)?;
                            acks.push(RowAck::NoInfo);
                        }
                        Ok::<_, InsertError>(())
                    })?;
                    flushes += 1;
                    tracing::trace!(chunk_rows = chunk.len(), flush = flushes, "released chunk");
                }
                Ok::<_, InsertError>((acknowledged_rows(acks), flushes))
            })
        })?;

        self.last_flushes = flushes;
        tracing::debug!(
            strategy = LABEL,
            inserted,
            flushes,
            chunk_size,
            "batch insert complete"
        );
        Ok(inserted)
    }

    fn set_chunk_size(&mut self, n: i64) -> Result<(), InputError> {
        self.chunk_size = validate_chunk_size(n)?;
        Ok(())
    }

    fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn last_flush_count(&self) -> usize {
        self.last_flushes
    }
}
