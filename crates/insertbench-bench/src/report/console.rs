//! Human-readable console summary.

use std::io::{self, Write};

use super::comparison::compare;
use crate::result::BenchmarkResult;

const WIDE_RULE: usize = 120;
const NARROW_RULE: usize = 60;

/// Write the results table, a detail block per result, and, given at least
/// two results, the throughput comparison.
pub fn render<W: Write>(out: &mut W, results: &[BenchmarkResult]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(WIDE_RULE))?;
    writeln!(out, "BENCHMARK RESULTS SUMMARY")?;
    writeln!(out, "{}", "=".repeat(WIDE_RULE))?;
    writeln!(out)?;

    writeln!(
        out,
        "| {:<20} | {:>12} | {:>10} | {:>10} | {:>14} | {:>12} | {:>12} | {:>12} |",
        "Strategy", "Records", "ChunkSize", "Iterations", "Avg TPS", "Std Dev(ms)", "Min(ms)", "Max(ms)"
    )?;
    writeln!(out, "{}", "-".repeat(WIDE_RULE))?;
    for r in results {
        writeln!(
            out,
            "| {:<20} | {:>12} | {:>10} | {:>10} | {:>14.2} | {:>12.2} | {:>12.2} | {:>12.2} |",
            r.label(),
            r.record_count(),
            r.chunk_size(),
            r.iteration_count(),
            r.throughput(),
            r.std_deviation(),
            r.min_duration(),
            r.max_duration(),
        )?;
    }
    writeln!(out, "{}", "-".repeat(WIDE_RULE))?;
    writeln!(out)?;

    writeln!(out, "DETAILED RESULTS:")?;
    writeln!(out, "{}", "-".repeat(NARROW_RULE))?;
    for r in results {
        writeln!(out)?;
        writeln!(out, "[{}]", r.label())?;
        writeln!(
            out,
            "  Records: {}, ChunkSize: {}, Iterations: {}",
            r.record_count(),
            r.chunk_size(),
            r.iteration_count()
        )?;
        let durations: Vec<String> = r.samples().iter().map(|s| format!("{s:.2}")).collect();
        writeln!(out, "  Durations: [{}] ms", durations.join(", "))?;
        writeln!(out, "  Average Duration: {:.2} ms", r.average_duration())?;
        writeln!(out, "  Average TPS: {:.2}", r.throughput())?;
        writeln!(out, "  Std Deviation: {:.2} ms", r.std_deviation())?;
        writeln!(
            out,
            "  Min/Max: {:.2} / {:.2} ms",
            r.min_duration(),
            r.max_duration()
        )?;
    }
    writeln!(out)?;

    if results.len() >= 2 {
        if let Some(cmp) = compare(results) {
            writeln!(out, "PERFORMANCE COMPARISON:")?;
            writeln!(out, "{}", "-".repeat(NARROW_RULE))?;
            writeln!(
                out,
                "Fastest: {} with {:.2} TPS",
                cmp.fastest_label, cmp.fastest_throughput
            )?;
            writeln!(out)?;
            for other in &cmp.others {
                match other.ratio {
                    Some(ratio) => writeln!(out, "  vs {}: {ratio:.2}x faster", other.label)?,
                    None => writeln!(out, "  vs {}: n/a (zero throughput)", other.label)?,
                }
            }
            writeln!(out)?;
        }
    }
    out.flush()
}
