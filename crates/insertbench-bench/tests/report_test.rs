//! ConsoleCsvReporter writing into a temporary output directory.

use chrono::Utc;
use insertbench_bench::report::csv::HEADER;
use insertbench_bench::{BenchmarkResult, ConsoleCsvReporter, ReportSink};
use insertbench_core::errors::ReportError;

fn results() -> Vec<BenchmarkResult> {
    vec![
        BenchmarkResult::new("SQLite-MultiRow", 100, 50, 2, vec![4.0, 6.0], Utc::now()).unwrap(),
        BenchmarkResult::new("SQLite-Single", 100, 1, 2, vec![20.0, 30.0], Utc::now()).unwrap(),
    ]
}

#[test]
fn writes_console_csv_and_json() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("benchmark-results");
    let mut reporter = ConsoleCsvReporter::new(Vec::new(), &out_dir, true);

    reporter.report(&results()).unwrap();

    let files = reporter.written_files().to_vec();
    assert_eq!(files.len(), 2);
    let csv_path = &files[0];
    let name = csv_path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("benchmark_result_"));
    assert!(name.ends_with(".csv"));
    // benchmark_result_ + yyyyMMdd_HHmmss + .csv
    assert_eq!(name.len(), "benchmark_result_".len() + 15 + ".csv".len());

    let csv = std::fs::read_to_string(csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], HEADER);
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("SQLite-MultiRow,100,50,2,5.00,4.00,6.00,"));

    assert!(files[1].extension().is_some_and(|e| e == "json"));

    let console = String::from_utf8(reporter.into_inner()).unwrap();
    assert!(console.contains("PERFORMANCE COMPARISON"));
}

#[test]
fn json_sidecar_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let mut reporter = ConsoleCsvReporter::new(Vec::new(), dir.path(), false);
    reporter.report(&results()).unwrap();
    assert_eq!(reporter.written_files().len(), 1);
}

#[test]
fn empty_results_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("never-created");
    let mut reporter = ConsoleCsvReporter::new(Vec::new(), &out_dir, true);
    reporter.report(&[]).unwrap();
    assert!(!out_dir.exists());
    assert!(reporter.into_inner().is_empty());
}

#[test]
fn console_still_prints_when_directory_cannot_be_created() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the output directory should go.
    let blocker = dir.path().join("blocked");
    std::fs::write(&blocker, "x").unwrap();

    let mut reporter = ConsoleCsvReporter::new(Vec::new(), &blocker, true);
    match reporter.report(&results()) {
        Err(ReportError::CreateDir { .. }) => {}
        other => panic!("Expected CreateDir, got: {:?}", other),
    }
    assert!(reporter.written_files().is_empty());
    let console = String::from_utf8(reporter.into_inner()).unwrap();
    assert!(console.contains("BENCHMARK RESULTS SUMMARY"));
}

#[test]
fn back_to_back_reports_never_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let mut reporter = ConsoleCsvReporter::new(Vec::new(), dir.path(), true);

    reporter.report(&results()).unwrap();
    let first = reporter.written_files().to_vec();
    reporter.report(&results()).unwrap();
    let second = reporter.written_files().to_vec();

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert!(first.iter().all(|p| !second.contains(p)));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 4);
    for path in first.iter().chain(&second) {
        assert!(!std::fs::read_to_string(path).unwrap().is_empty());
    }
}
