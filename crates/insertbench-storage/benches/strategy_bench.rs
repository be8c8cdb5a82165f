//! Criterion benchmarks for the SQLite insertion strategies.
//!
//! Each iteration truncates the shared in-memory table before inserting a
//! fixed record set.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use criterion::{criterion_group, criterion_main, Criterion};

use insertbench_core::{Amount, Record};
use insertbench_storage::{
    BatchInsert, CachedSingleStrategy, DatabaseManager, InsertStrategy, MultiRowBatchStrategy,
    PreparedBatchStrategy, SingleInsert, SingleRowStrategy,
};

fn bench_records(n: usize) -> Vec<Record> {
    let created_at = DateTime::<Utc>::from_timestamp_millis(1_700_000_000_000).unwrap();
    (0..n)
        .map(|i| {
            Record::new(format!("{i:0>50}"), created_at)
                .unwrap()
                .with_secondary(Some(format!("{i:0>100}")))
                .with_amount(Some(Amount::from_cents(i as i64)))
        })
        .collect()
}

fn bench_batch(c: &mut Criterion) {
    let records = bench_records(5_000);
    let db = Arc::new(DatabaseManager::open_in_memory().unwrap());
    let strategies: Vec<Box<dyn BatchInsert>> = vec![
        Box::new(MultiRowBatchStrategy::new(Arc::clone(&db))),
        Box::new(PreparedBatchStrategy::new(Arc::clone(&db))),
    ];

    let mut group = c.benchmark_group("batch_5k");
    for mut strategy in strategies {
        strategy.set_chunk_size(1000).unwrap();
        let label = strategy.label().to_string();
        group.bench_function(label, |b| {
            b.iter(|| {
                strategy.truncate().unwrap();
                strategy.insert_batch(Some(&records)).unwrap()
            })
        });
    }
    group.finish();
}

fn bench_single(c: &mut Criterion) {
    let records = bench_records(1_000);
    let db = Arc::new(DatabaseManager::open_in_memory().unwrap());
    let strategies: Vec<Box<dyn SingleInsert>> = vec![
        Box::new(SingleRowStrategy::new(Arc::clone(&db))),
        Box::new(CachedSingleStrategy::new(Arc::clone(&db))),
    ];

    let mut group = c.benchmark_group("single_1k");
    for mut strategy in strategies {
        let label = strategy.label().to_string();
        group.bench_function(label, |b| {
            b.iter(|| {
                strategy.truncate().unwrap();
                strategy.insert_single(Some(&records)).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_batch, bench_single);
criterion_main!(benches);
