//! Insertion strategies under benchmark.
//!
//! Two capability contracts share a common base:
//! - [`BatchInsert`]: inserts in chunks of a configurable size, one flush per
//!   chunk (a trailing partial chunk gets its own flush).
//! - [`SingleInsert`]: one statement per row.
//!
//! Every insert call runs in one immediate transaction, so a failure leaves
//! the table as it was before the call.

pub mod multi_row;
pub mod prepared;
pub mod single;

use std::sync::Arc;

use insertbench_core::errors::{InputError, InsertError, StorageError};
use insertbench_core::Record;

use crate::connection::DatabaseManager;
use crate::queries::records;

pub use multi_row::MultiRowBatchStrategy;
pub use prepared::PreparedBatchStrategy;
pub use single::{CachedSingleStrategy, SingleRowStrategy};

/// Chunk size a batch strategy starts with.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Operations every strategy supports.
pub trait InsertStrategy {
    /// Human-readable name used in logs and reports.
    fn label(&self) -> &str;

    /// Remove every row from the shared table. Not reversible.
    fn truncate(&self) -> Result<(), StorageError>;

    /// Current row count of the shared table.
    fn count(&self) -> Result<i64, StorageError>;
}

/// A strategy that groups rows into chunks before flushing them.
pub trait BatchInsert: InsertStrategy {
    /// Insert `records` chunk by chunk; returns the acknowledged row count.
    /// `None` is rejected; an empty slice is a no-op returning 0.
    fn insert_batch(&mut self, records: Option<&[Record]>) -> Result<usize, InsertError>;

    /// Set the maximum rows per flush. Fails for `n < 1`.
    fn set_chunk_size(&mut self, n: i64) -> Result<(), InputError>;

    fn chunk_size(&self) -> usize;

    /// Flushes issued by the most recent `insert_batch` call.
    fn last_flush_count(&self) -> usize;
}

/// A strategy that issues one statement per row.
pub trait SingleInsert: InsertStrategy {
    /// Insert `records` one row at a time; returns the acknowledged row count.
    /// `None` is rejected; an empty slice is a no-op returning 0.
    fn insert_single(&mut self, records: Option<&[Record]>) -> Result<usize, InsertError>;
}

/// What the driver reported for one flushed unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAck {
    /// The driver reported this many changed rows.
    Affected(usize),
    /// The unit succeeded but the driver gave no row count.
    NoInfo,
}

/// Sum acknowledgements. A `NoInfo` unit counts as one row.
pub fn acknowledged_rows<I>(acks: I) -> usize
where
    I: IntoIterator<Item = RowAck>,
{
    acks.into_iter()
        .map(|ack| match ack {
            RowAck::Affected(n) => n,
            RowAck::NoInfo => 1,
        })
        .sum()
}

/// Validate a requested chunk size.
pub fn validate_chunk_size(n: i64) -> Result<usize, InputError> {
    if n < 1 {
        return Err(InputError::ChunkSizeTooSmall { value: n });
    }
    usize::try_from(n).map_err(|_| InputError::InvalidValue {
        field: "chunk_size",
        message: format!("{n} does not fit in usize"),
    })
}

/// Number of flushes `len` rows take at `chunk_size` rows per flush.
pub fn expected_flushes(len: usize, chunk_size: usize) -> usize {
    len.div_ceil(chunk_size.max(1))
}

fn require_records(records: Option<&[Record]>) -> Result<&[Record], InputError> {
    records.ok_or(InputError::Absent { what: "records" })
}

fn truncate_table(db: &DatabaseManager) -> Result<(), StorageError> {
    db.with_writer(records::delete_all).map(|deleted| {
        tracing::debug!(deleted, "truncated test_record");
    })
}

fn count_rows(db: &DatabaseManager) -> Result<i64, StorageError> {
    db.with_writer(records::count)
}

/// The strategies registered for a run, in registration order.
pub struct StrategySet {
    pub batch: Vec<Box<dyn BatchInsert>>,
    pub single: Vec<Box<dyn SingleInsert>>,
}

impl StrategySet {
    /// The four SQLite strategies, all sharing `db`.
    pub fn sqlite(db: Arc<DatabaseManager>) -> Self {
        Self {
            batch: vec![
                Box::new(MultiRowBatchStrategy::new(Arc::clone(&db))),
                Box::new(PreparedBatchStrategy::new(Arc::clone(&db))),
            ],
            single: vec![
                Box::new(SingleRowStrategy::new(Arc::clone(&db))),
                Box::new(CachedSingleStrategy::new(db)),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_info_counts_as_one_row() {
        let acks = [RowAck::Affected(3), RowAck::NoInfo, RowAck::NoInfo, RowAck::Affected(0)];
        assert_eq!(acknowledged_rows(acks), 5);
    }

    #[test]
    fn chunk_size_validation() {
        assert_eq!(validate_chunk_size(0), Err(InputError::ChunkSizeTooSmall { value: 0 }));
        assert_eq!(validate_chunk_size(-1), Err(InputError::ChunkSizeTooSmall { value: -1 }));
        assert_eq!(validate_chunk_size(500), Ok(500));
    }

    #[test]
    fn flushes_are_full_chunks_plus_remainder() {
        assert_eq!(expected_flushes(0, 10), 0);
        assert_eq!(expected_flushes(9, 10), 1);
        assert_eq!(expected_flushes(10, 10), 1);
        assert_eq!(expected_flushes(11, 10), 2);
        assert_eq!(expected_flushes(20, 10), 2);
        assert_eq!(expected_flushes(21, 10), 3);
    }

    #[test]
    fn absent_records_are_rejected() {
        assert_eq!(
            require_records(None).unwrap_err(),
            InputError::Absent { what: "records" }
        );
        assert!(require_records(Some(&[])).unwrap().is_empty());
    }
}
