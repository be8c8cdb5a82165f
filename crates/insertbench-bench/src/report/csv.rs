//! CSV rendering, one row per result.

use std::fmt::Write;

use crate::result::BenchmarkResult;

pub const HEADER: &str =
    "Type,RecordCount,BatchSize,Iterations,AvgDuration(ms),MinDuration(ms),MaxDuration(ms),StdDev,AvgTPS";

/// Render the header plus one line per result. Durations, deviation and
/// throughput carry two decimals.
pub fn render(results: &[BenchmarkResult]) -> String {
    let mut out = String::with_capacity(HEADER.len() + 1 + results.len() * 96);
    out.push_str(HEADER);
    out.push('\n');
    for r in results {
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "{},{},{},{},{:.2},{:.2},{:.2},{:.2},{:.2}",
            escape(r.label()),
            r.record_count(),
            r.chunk_size(),
            r.iteration_count(),
            r.average_duration(),
            r.min_duration(),
            r.max_duration(),
            r.std_deviation(),
            r.throughput(),
        );
    }
    out
}

/// Quote a field containing a delimiter, quote, or line break.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn header_and_rows() {
        let r = BenchmarkResult::new("SQLite-Prepared", 10_000, 1000, 3, vec![100.0, 200.0, 300.0], Utc::now())
            .unwrap();
        let csv = render(&[r]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines[1],
            "SQLite-Prepared,10000,1000,3,200.00,100.00,300.00,100.00,50000.00"
        );
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn labels_with_commas_are_quoted() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
