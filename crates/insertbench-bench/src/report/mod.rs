//! Report sinks: console summary, CSV file, and JSON sidecar.

pub mod comparison;
pub mod console;
pub mod csv;
pub mod json;

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use insertbench_core::config::ReportConfig;
use insertbench_core::errors::ReportError;

use crate::result::BenchmarkResult;

pub use comparison::{compare, Comparison, Ratio};

/// File stamp format, e.g. `20240131_235959`.
pub const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Receives the ordered results of a run. Only reads them.
pub trait ReportSink {
    fn report(&mut self, results: &[BenchmarkResult]) -> Result<(), ReportError>;
}

/// Prints the console summary, then persists CSV (and optionally JSON).
///
/// The console summary is written even when persistence fails; the first
/// error encountered is returned after every step has been attempted.
pub struct ConsoleCsvReporter<W: Write> {
    out: W,
    output_dir: PathBuf,
    write_json: bool,
    written: Vec<PathBuf>,
}

impl<W: Write> ConsoleCsvReporter<W> {
    pub fn new(out: W, output_dir: impl Into<PathBuf>, write_json: bool) -> Self {
        Self {
            out,
            output_dir: output_dir.into(),
            write_json,
            written: Vec::new(),
        }
    }

    /// Console summary goes to `out`; files go where `config` says.
    pub fn from_config(out: W, config: &ReportConfig) -> Self {
        Self::new(out, config.effective_output_dir(), config.effective_write_json())
    }

    /// Files persisted by the most recent report.
    pub fn written_files(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn persist(&mut self, stamp: &str, results: &[BenchmarkResult]) -> Result<(), ReportError> {
        fs::create_dir_all(&self.output_dir).map_err(|e| ReportError::CreateDir {
            path: self.output_dir.display().to_string(),
            message: e.to_string(),
        })?;

        let (stem, csv_file) = self.claim_stem(stamp)?;
        let csv_path = self.output_dir.join(format!("{stem}.csv"));
        write_to(csv_file, &csv_path, &csv::render(results))?;
        tracing::info!(path = %csv_path.display(), "CSV report saved");
        self.written.push(csv_path);

        if self.write_json {
            let json_path = self.output_dir.join(format!("{stem}.json"));
            let json_file = create_new(&json_path)?.ok_or_else(|| ReportError::Write {
                path: json_path.display().to_string(),
                message: "file already exists".to_string(),
            })?;
            write_to(json_file, &json_path, &json::render(results)?)?;
            tracing::info!(path = %json_path.display(), "JSON report saved");
            self.written.push(json_path);
        }
        Ok(())
    }

    /// Pick a file stem no earlier report used and create its CSV.
    ///
    /// Reports within the same second get `_1`, `_2`, ... appended.
    fn claim_stem(&self, stamp: &str) -> Result<(String, File), ReportError> {
        for n in 0usize.. {
            let stem = match n {
                0 => format!("benchmark_result_{stamp}"),
                n => format!("benchmark_result_{stamp}_{n}"),
            };
            if self.write_json && self.output_dir.join(format!("{stem}.json")).exists() {
                continue;
            }
            if let Some(file) = create_new(&self.output_dir.join(format!("{stem}.csv")))? {
                return Ok((stem, file));
            }
        }
        Err(ReportError::Write {
            path: self.output_dir.display().to_string(),
            message: "no free report file name".to_string(),
        })
    }
}

impl<W: Write> ReportSink for ConsoleCsvReporter<W> {
    fn report(&mut self, results: &[BenchmarkResult]) -> Result<(), ReportError> {
        self.written.clear();
        if results.is_empty() {
            tracing::warn!("no benchmark results to report");
            return Ok(());
        }

        let console = console::render(&mut self.out, results).map_err(|e| ReportError::Write {
            path: "<console>".to_string(),
            message: e.to_string(),
        });
        if let Err(e) = &console {
            tracing::warn!(error = %e, "console summary failed");
        }

        let stamp = Local::now().format(FILE_STAMP_FORMAT).to_string();
        let persisted = self.persist(&stamp, results);
        if let Err(e) = &persisted {
            tracing::warn!(error = %e, "report persistence failed");
        }

        console.and(persisted)
    }
}

/// `Ok(None)` when `path` already exists.
fn create_new(path: &Path) -> Result<Option<File>, ReportError> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => Ok(Some(file)),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(None),
        Err(e) => Err(ReportError::Write {
            path: path.display().to_string(),
            message: e.to_string(),
        }),
    }
}

fn write_to(mut file: File, path: &Path, contents: &str) -> Result<(), ReportError> {
    file.write_all(contents.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|e| ReportError::Write {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn same_stamp_gets_a_numbered_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let results =
            vec![BenchmarkResult::new("a", 10, 1, 1, vec![1.0], Utc::now()).unwrap()];
        let mut reporter = ConsoleCsvReporter::new(Vec::new(), dir.path(), true);

        let mut names = Vec::new();
        for _ in 0..3 {
            reporter.written.clear();
            reporter.persist("20240131_235959", &results).unwrap();
            names.extend(
                reporter
                    .written_files()
                    .iter()
                    .map(|p| p.file_name().unwrap().to_string_lossy().into_owned()),
            );
        }

        assert_eq!(
            names,
            [
                "benchmark_result_20240131_235959.csv",
                "benchmark_result_20240131_235959.json",
                "benchmark_result_20240131_235959_1.csv",
                "benchmark_result_20240131_235959_1.json",
                "benchmark_result_20240131_235959_2.csv",
                "benchmark_result_20240131_235959_2.json",
            ]
        );
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 6);
    }

    #[test]
    fn stray_json_pushes_the_pair_to_the_next_suffix() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("benchmark_result_20240131_235959.json"), "{}").unwrap();
        let results =
            vec![BenchmarkResult::new("a", 10, 1, 1, vec![1.0], Utc::now()).unwrap()];
        let mut reporter = ConsoleCsvReporter::new(Vec::new(), dir.path(), true);

        reporter.persist("20240131_235959", &results).unwrap();

        let names: Vec<_> = reporter
            .written_files()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            [
                "benchmark_result_20240131_235959_1.csv",
                "benchmark_result_20240131_235959_1.json",
            ]
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("benchmark_result_20240131_235959.json")).unwrap(),
            "{}"
        );
    }
}
