//! JSON sidecar: results, derived statistics, comparison, environment.

use chrono::{DateTime, Utc};
use serde::Serialize;

use insertbench_core::errors::ReportError;

use super::comparison::{compare, Comparison};
use crate::result::BenchmarkResult;

/// Host context captured at report time, so numbers from different machines
/// are not compared blindly.
#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentInfo {
    pub os: String,
    pub arch: String,
    pub cpu_count: usize,
    pub hostname: String,
    pub profile: String,
    pub version: String,
}

impl EnvironmentInfo {
    pub fn capture() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            cpu_count: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            hostname: std::env::var("HOSTNAME")
                .or_else(|_| std::env::var("COMPUTERNAME"))
                .unwrap_or_else(|_| "unknown".to_string()),
            profile: if cfg!(debug_assertions) {
                "debug".to_string()
            } else {
                "release".to_string()
            },
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// One result with its statistics materialized.
#[derive(Debug, Clone, Serialize)]
pub struct ResultSummary<'a> {
    #[serde(flatten)]
    pub result: &'a BenchmarkResult,
    pub average_duration_ms: f64,
    pub min_duration_ms: f64,
    pub max_duration_ms: f64,
    pub std_deviation_ms: f64,
    pub total_duration_ms: f64,
    pub throughput: f64,
}

impl<'a> From<&'a BenchmarkResult> for ResultSummary<'a> {
    fn from(result: &'a BenchmarkResult) -> Self {
        Self {
            result,
            average_duration_ms: result.average_duration(),
            min_duration_ms: result.min_duration(),
            max_duration_ms: result.max_duration(),
            std_deviation_ms: result.std_deviation(),
            total_duration_ms: result.total_duration(),
            throughput: result.throughput(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub environment: EnvironmentInfo,
    pub results: Vec<ResultSummary<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Comparison>,
}

impl<'a> JsonReport<'a> {
    pub fn build(results: &'a [BenchmarkResult]) -> Self {
        Self {
            generated_at: Utc::now(),
            environment: EnvironmentInfo::capture(),
            results: results.iter().map(ResultSummary::from).collect(),
            comparison: if results.len() >= 2 { compare(results) } else { None },
        }
    }
}

/// Render the pretty-printed JSON report.
pub fn render(results: &[BenchmarkResult]) -> Result<String, ReportError> {
    serde_json::to_string_pretty(&JsonReport::build(results)).map_err(|e| ReportError::Serialize {
        message: e.to_string(),
    })
}
