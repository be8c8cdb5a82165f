//! Per-configuration trial samples and the statistics derived from them.

use chrono::{DateTime, Utc};
use serde::Serialize;

use insertbench_core::errors::InputError;

/// Samples for one (strategy, record count, chunk size, iterations)
/// configuration. Immutable once built; statistics are computed on demand.
///
/// Durations are fractional milliseconds in execution order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkResult {
    label: String,
    record_count: usize,
    chunk_size: usize,
    iteration_count: usize,
    samples: Vec<f64>,
    created_at: DateTime<Utc>,
}

impl BenchmarkResult {
    pub fn new(
        label: impl Into<String>,
        record_count: usize,
        chunk_size: usize,
        iteration_count: usize,
        samples: Vec<f64>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, InputError> {
        let label = label.into();
        if label.is_empty() {
            return Err(InputError::MissingField { field: "label" });
        }
        if let Some(bad) = samples.iter().find(|s| !s.is_finite() || **s < 0.0) {
            return Err(InputError::InvalidValue {
                field: "samples",
                message: format!("{bad} is not a non-negative duration"),
            });
        }
        Ok(Self {
            label,
            record_count,
            chunk_size,
            iteration_count,
            samples,
            created_at,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn iteration_count(&self) -> usize {
        self.iteration_count
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Arithmetic mean; 0 without samples.
    pub fn average_duration(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.total_duration() / self.samples.len() as f64
    }

    /// Smallest sample; 0 without samples.
    pub fn min_duration(&self) -> f64 {
        self.samples.iter().copied().reduce(f64::min).unwrap_or(0.0)
    }

    /// Largest sample; 0 without samples.
    pub fn max_duration(&self) -> f64 {
        self.samples.iter().copied().reduce(f64::max).unwrap_or(0.0)
    }

    /// Sample standard deviation (n - 1 divisor). 0 with fewer than two samples.
    pub fn std_deviation(&self) -> f64 {
        let n = self.samples.len();
        if n < 2 {
            return 0.0;
        }
        let mean = self.average_duration();
        let squares: f64 = self.samples.iter().map(|s| (s - mean).powi(2)).sum();
        (squares / (n - 1) as f64).sqrt()
    }

    /// Records per second at the mean duration; 0 when the mean is not positive.
    pub fn throughput(&self) -> f64 {
        let mean = self.average_duration();
        if mean <= 0.0 {
            return 0.0;
        }
        self.record_count as f64 * 1000.0 / mean
    }

    pub fn total_duration(&self) -> f64 {
        self.samples.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(record_count: usize, samples: Vec<f64>) -> BenchmarkResult {
        let n = samples.len();
        BenchmarkResult::new("test", record_count, 100, n, samples, Utc::now()).unwrap()
    }

    #[test]
    fn empty_samples_yield_zeros() {
        let r = result(10, vec![]);
        assert_eq!(r.average_duration(), 0.0);
        assert_eq!(r.min_duration(), 0.0);
        assert_eq!(r.max_duration(), 0.0);
        assert_eq!(r.std_deviation(), 0.0);
        assert_eq!(r.throughput(), 0.0);
        assert_eq!(r.total_duration(), 0.0);
    }

    #[test]
    fn single_sample_has_zero_deviation() {
        let r = result(10, vec![42.0]);
        assert_eq!(r.std_deviation(), 0.0);
        assert_eq!(r.average_duration(), 42.0);
    }

    #[test]
    fn three_sample_statistics() {
        let r = result(10, vec![100.0, 200.0, 300.0]);
        assert_eq!(r.average_duration(), 200.0);
        assert_eq!(r.min_duration(), 100.0);
        assert_eq!(r.max_duration(), 300.0);
        assert!((r.std_deviation() - 100.0).abs() < 1e-9);
        assert_eq!(r.total_duration(), 600.0);
    }

    #[test]
    fn throughput_is_records_per_second() {
        let r = result(10_000, vec![100.0]);
        assert!((r.throughput() - 100_000.0).abs() < 1e-6);
        assert_eq!(result(10_000, vec![0.0, 0.0]).throughput(), 0.0);
    }

    #[test]
    fn label_is_required() {
        let err = BenchmarkResult::new("", 1, 1, 0, vec![], Utc::now()).unwrap_err();
        assert_eq!(err, InputError::MissingField { field: "label" });
    }

    #[test]
    fn negative_samples_are_rejected() {
        assert!(BenchmarkResult::new("x", 1, 1, 1, vec![-1.0], Utc::now()).is_err());
        assert!(BenchmarkResult::new("x", 1, 1, 1, vec![f64::NAN], Utc::now()).is_err());
    }

    #[test]
    fn sample_order_is_preserved() {
        let r = result(1, vec![3.0, 1.0, 2.0]);
        assert_eq!(r.samples(), &[3.0, 1.0, 2.0]);
    }
}
