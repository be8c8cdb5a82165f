//! # insertbench-bench
//!
//! The benchmark harness: synthetic record generation, the trial engine,
//! per-configuration statistics, and the report sink that renders them.
//!
//! Control flow: [`BenchmarkRunner`] warms up every batch strategy, runs the
//! timed trials for each registered strategy, and hands the resulting
//! [`BenchmarkResult`]s to a [`ReportSink`].

pub mod engine;
pub mod generator;
pub mod report;
pub mod result;

pub use engine::{BenchmarkRunner, RunPhase, RunSettings, SINGLE_RECORD_CAP};
pub use generator::{generate_with_seed, RecordGenerator};
pub use report::{compare, Comparison, ConsoleCsvReporter, ReportSink};
pub use result::BenchmarkResult;
