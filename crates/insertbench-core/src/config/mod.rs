//! Configuration system for insertbench.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod bench_config;
pub mod benchmark_config;
pub mod report_config;
pub mod storage_config;

pub use bench_config::{BenchConfig, CliOverrides};
pub use benchmark_config::BenchmarkConfig;
pub use report_config::ReportConfig;
pub use storage_config::StorageConfig;
