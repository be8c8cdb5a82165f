//! Property: for any chunk size and row count, a batch strategy inserts
//! exactly the rows it was given, in the expected number of flushes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use insertbench_core::Record;
use insertbench_storage::strategy::expected_flushes;
use insertbench_storage::{
    BatchInsert, DatabaseManager, InsertStrategy, MultiRowBatchStrategy, PreparedBatchStrategy,
};
use proptest::prelude::*;

fn make_records(n: usize) -> Vec<Record> {
    let created_at = DateTime::<Utc>::from_timestamp_millis(1_700_000_000_000).unwrap();
    (0..n)
        .map(|i| Record::new(format!("row-{i}"), created_at).unwrap())
        .collect()
}

fn check(mut strategy: Box<dyn BatchInsert>, chunk: usize, n: usize) -> Result<(), TestCaseError> {
    strategy.set_chunk_size(chunk as i64).unwrap();
    strategy.truncate().unwrap();
    let inserted = strategy.insert_batch(Some(&make_records(n))).unwrap();
    prop_assert_eq!(inserted, n);
    prop_assert_eq!(strategy.count().unwrap(), n as i64);
    prop_assert_eq!(strategy.last_flush_count(), expected_flushes(n, chunk));
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn batch_inserts_every_row(chunk in 1usize..40, n in 0usize..120) {
        let db = Arc::new(DatabaseManager::open_in_memory().unwrap());
        check(Box::new(MultiRowBatchStrategy::new(Arc::clone(&db))), chunk, n)?;
        check(Box::new(PreparedBatchStrategy::new(db)), chunk, n)?;
    }
}
