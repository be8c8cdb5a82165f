//! Ranking results by throughput.

use serde::Serialize;

use crate::result::BenchmarkResult;

/// How many times faster the fastest result was than another one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ratio {
    pub index: usize,
    pub label: String,
    /// `None` when the other result had zero throughput.
    pub ratio: Option<f64>,
}

/// The fastest result and its ratio against every other result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub fastest_index: usize,
    pub fastest_label: String,
    pub fastest_throughput: f64,
    pub others: Vec<Ratio>,
}

/// Rank `results` by throughput.
///
/// Only a strictly higher throughput displaces the current leader, so ties
/// resolve to the earliest result. Returns `None` for an empty slice.
pub fn compare(results: &[BenchmarkResult]) -> Option<Comparison> {
    let first = results.first()?;
    let mut fastest_index = 0;
    let mut fastest_throughput = first.throughput();
    for (i, result) in results.iter().enumerate().skip(1) {
        let throughput = result.throughput();
        if throughput > fastest_throughput {
            fastest_index = i;
            fastest_throughput = throughput;
        }
    }

    let others = results
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != fastest_index)
        .map(|(index, result)| {
            let throughput = result.throughput();
            Ratio {
                index,
                label: result.label().to_string(),
                ratio: (throughput > 0.0).then(|| fastest_throughput / throughput),
            }
        })
        .collect();

    Some(Comparison {
        fastest_index,
        fastest_label: results[fastest_index].label().to_string(),
        fastest_throughput,
        others,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    /// A result whose throughput is exactly `tps` (1000 records, 1000/tps seconds).
    fn with_throughput(label: &str, tps: f64) -> BenchmarkResult {
        let samples = if tps > 0.0 { vec![1_000_000.0 / tps] } else { vec![0.0] };
        BenchmarkResult::new(label, 1000, 1, 1, samples, Utc::now()).unwrap()
    }

    #[test]
    fn fastest_and_ratios() {
        let results = [
            with_throughput("a", 500.0),
            with_throughput("b", 1000.0),
            with_throughput("c", 300.0),
        ];
        let cmp = compare(&results).unwrap();
        assert_eq!(cmp.fastest_index, 1);
        assert_eq!(cmp.fastest_label, "b");
        assert_eq!(cmp.others.len(), 2);
        assert_eq!(cmp.others[0].label, "a");
        assert!((cmp.others[0].ratio.unwrap() - 2.0).abs() < 1e-9);
        assert_eq!(cmp.others[1].label, "c");
        assert!((cmp.others[1].ratio.unwrap() - 10.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn ties_go_to_the_first_result() {
        let results = [
            with_throughput("first", 800.0),
            with_throughput("second", 800.0),
        ];
        let cmp = compare(&results).unwrap();
        assert_eq!(cmp.fastest_label, "first");
        assert!((cmp.others[0].ratio.unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_throughput_has_no_ratio() {
        let results = [with_throughput("fast", 100.0), with_throughput("idle", 0.0)];
        let cmp = compare(&results).unwrap();
        assert_eq!(cmp.others[0].ratio, None);
    }

    #[test]
    fn empty_has_no_comparison() {
        assert!(compare(&[]).is_none());
    }
}
