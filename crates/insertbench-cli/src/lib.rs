//! Command-line interface for insertbench.
//!
//! `insertbench run` resolves configuration, opens the store, runs every
//! registered strategy, and writes the report. `insertbench config` prints
//! the resolved configuration as TOML.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use insertbench_bench::{BenchmarkResult, BenchmarkRunner, ConsoleCsvReporter, RunSettings};
use insertbench_core::config::{BenchConfig, CliOverrides};
use insertbench_core::errors::{ErrorCode, ReportError, RunError, RunOutcome};
use insertbench_storage::strategy::StrategySet;
use insertbench_storage::DatabaseManager;

/// Bulk-insert throughput benchmark.
#[derive(Parser, Debug)]
#[command(name = "insertbench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Warm up, run timed trials for every strategy, and write the report.
    Run(RunArgs),

    /// Print the resolved configuration.
    Config {
        /// Configuration file to use instead of ./insertbench.toml.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Configuration file to use instead of ./insertbench.toml.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Rows per flush for batch strategies.
    #[arg(long, allow_negative_numbers = true)]
    pub chunk_size: Option<i64>,

    /// Rows per full-volume trial.
    #[arg(long, allow_negative_numbers = true)]
    pub record_count: Option<i64>,

    /// Timed trials per strategy.
    #[arg(long, allow_negative_numbers = true)]
    pub iterations: Option<i64>,

    /// Warmup rows per batch strategy; 0 disables warmup.
    #[arg(long, allow_negative_numbers = true)]
    pub warmup_count: Option<i64>,

    /// Seed for reproducible record generation.
    #[arg(long)]
    pub seed: Option<u64>,

    /// SQLite database file, or `:memory:`.
    #[arg(long)]
    pub database: Option<String>,

    /// Directory for the CSV and JSON reports.
    #[arg(long)]
    pub output_dir: Option<String>,
}

impl RunArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            chunk_size: self.chunk_size,
            record_count: self.record_count,
            iterations: self.iterations,
            warmup_count: self.warmup_count,
            seed: self.seed,
            database_path: self.database.clone(),
            output_dir: self.output_dir.clone(),
        }
    }
}

/// Parse the process arguments and execute the command from the current
/// working directory.
pub fn run() -> Result<(), RunError> {
    insertbench_core::tracing::init_tracing();
    let cli = Cli::parse();
    execute(cli.command, Path::new("."), &mut std::io::stdout())
}

/// Execute `command` with `root` as the project directory.
pub fn execute<W: Write>(command: Commands, root: &Path, out: &mut W) -> Result<(), RunError> {
    match command {
        Commands::Run(args) => {
            let config = BenchConfig::load(root, args.config.as_deref(), Some(&args.overrides()))?;
            let outcome = run_benchmark(&config, &mut *out)?;
            for error in &outcome.errors {
                tracing::warn!(error = %error.coded_string(), "run completed with error");
            }
            writeln!(
                out,
                "Completed {} result(s) with {} error(s)",
                outcome.data.len(),
                outcome.error_count()
            )
            .map_err(console_error)?;
            Ok(())
        }
        Commands::Config { config } => {
            let config = BenchConfig::load(root, config.as_deref(), None)?;
            write!(out, "{}", config.to_toml()?).map_err(console_error)?;
            Ok(())
        }
    }
}

/// Open the configured store, run every SQLite strategy, and report.
/// The console summary is written to `out`.
pub fn run_benchmark<W: Write>(
    config: &BenchConfig,
    out: &mut W,
) -> Result<RunOutcome<Vec<BenchmarkResult>>, RunError> {
    let db = Arc::new(DatabaseManager::from_config(&config.storage)?);
    tracing::info!(
        database = %config.storage.effective_database_path(),
        "store opened"
    );

    let mut strategies = StrategySet::sqlite(Arc::clone(&db));
    let mut sink = ConsoleCsvReporter::from_config(out, &config.report);
    let mut runner = BenchmarkRunner::new(RunSettings::from_config(&config.benchmark));
    let outcome = runner.run(&mut strategies, &mut sink)?;

    if db.path().is_some() {
        if let Err(e) = db.checkpoint() {
            tracing::warn!(error = %e, "WAL checkpoint failed");
        }
    }
    if let Err(e) = db.optimize() {
        tracing::warn!(error = %e, "optimize failed");
    }
    Ok(outcome)
}

fn console_error(e: std::io::Error) -> RunError {
    ReportError::Write {
        path: "<stdout>".to_string(),
        message: e.to_string(),
    }
    .into()
}
