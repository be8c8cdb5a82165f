//! Trial parameters: chunk size, volume, repetitions, warmup.

use serde::{Deserialize, Serialize};

pub const DEFAULT_CHUNK_SIZE: i64 = 1000;
pub const DEFAULT_RECORD_COUNT: i64 = 100_000;
pub const DEFAULT_ITERATIONS: i64 = 3;
pub const DEFAULT_WARMUP_COUNT: i64 = 1000;

/// Configuration for the benchmark engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Rows per flush for batch-capable strategies. Default: 1000.
    pub chunk_size: Option<i64>,
    /// Rows per full-volume trial. Default: 100000.
    pub record_count: Option<i64>,
    /// Timed trials per strategy. Default: 3.
    pub iterations: Option<i64>,
    /// Rows inserted per batch strategy before timing starts; 0 disables. Default: 1000.
    pub warmup_count: Option<i64>,
    /// Fixed generator seed for reproducible runs. Default: random.
    pub seed: Option<u64>,
}

impl BenchmarkConfig {
    pub fn effective_chunk_size(&self) -> i64 {
        self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE)
    }

    pub fn effective_record_count(&self) -> i64 {
        self.record_count.unwrap_or(DEFAULT_RECORD_COUNT)
    }

    pub fn effective_iterations(&self) -> i64 {
        self.iterations.unwrap_or(DEFAULT_ITERATIONS)
    }

    pub fn effective_warmup_count(&self) -> i64 {
        self.warmup_count.unwrap_or(DEFAULT_WARMUP_COUNT)
    }
}
