//! The benchmark execution engine.
//!
//! One run walks `Idle -> Warmup -> BatchTrials -> SingleTrials -> Reporting
//! -> Done` without branching back. Trials run strictly one after another
//! against the shared table; truncating before and after each configuration
//! is what keeps strategies from seeing each other's rows.

use std::fmt;
use std::time::Instant;

use chrono::Utc;

use insertbench_core::config::BenchmarkConfig;
use insertbench_core::errors::{InputError, InsertError, RunError, RunOutcome};
use insertbench_core::Record;
use insertbench_storage::strategy::StrategySet;
use insertbench_storage::{BatchInsert, InsertStrategy};

use crate::generator::RecordGenerator;
use crate::report::ReportSink;
use crate::result::BenchmarkResult;

/// Single-row trials never insert more than this many records.
pub const SINGLE_RECORD_CAP: usize = 1000;

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Warmup,
    BatchTrials,
    SingleTrials,
    Reporting,
    Done,
}

impl RunPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Warmup => "warmup",
            Self::BatchTrials => "batch_trials",
            Self::SingleTrials => "single_trials",
            Self::Reporting => "reporting",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trial parameters for one run, as resolved from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    pub chunk_size: i64,
    pub record_count: i64,
    pub iterations: i64,
    /// Zero or negative disables warmup.
    pub warmup_count: i64,
    pub seed: Option<u64>,
}

impl RunSettings {
    pub fn from_config(config: &BenchmarkConfig) -> Self {
        Self {
            chunk_size: config.effective_chunk_size(),
            record_count: config.effective_record_count(),
            iterations: config.effective_iterations(),
            warmup_count: config.effective_warmup_count(),
            seed: config.seed,
        }
    }
}

impl Default for RunSettings {
    fn default() -> Self {
        Self::from_config(&BenchmarkConfig::default())
    }
}

/// Parameters checked once before any trial runs.
struct Checked {
    chunk_size: usize,
    record_count: usize,
    iterations: usize,
}

/// Drives warmup, timed trials, and reporting for a [`StrategySet`].
pub struct BenchmarkRunner {
    settings: RunSettings,
    generator: RecordGenerator,
    phase: RunPhase,
}

impl BenchmarkRunner {
    pub fn new(settings: RunSettings) -> Self {
        let generator = match settings.seed {
            Some(seed) => RecordGenerator::with_seed(seed),
            None => RecordGenerator::new(),
        };
        Self {
            settings,
            generator,
            phase: RunPhase::Idle,
        }
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Execute a full run and report it.
    ///
    /// Invalid input aborts the run with `Err`. Storage failures abort only
    /// the affected configuration; they are collected in the outcome and the
    /// next strategy still runs.
    pub fn run(
        &mut self,
        strategies: &mut StrategySet,
        sink: &mut dyn ReportSink,
    ) -> Result<RunOutcome<Vec<BenchmarkResult>>, RunError> {
        let checked = self.check_settings()?;
        let mut outcome = RunOutcome::new(Vec::new());
        tracing::info!(
            chunk_size = checked.chunk_size,
            record_count = checked.record_count,
            iterations = checked.iterations,
            warmup_count = self.settings.warmup_count,
            seeded = self.settings.seed.is_some(),
            "starting benchmark run"
        );

        self.enter(RunPhase::Warmup);
        self.warmup(&mut strategies.batch)?;

        self.enter(RunPhase::BatchTrials);
        for strategy in strategies.batch.iter_mut() {
            strategy.set_chunk_size(self.settings.chunk_size)?;
            let result = self.run_configuration(
                &mut **strategy,
                checked.record_count,
                checked.chunk_size,
                checked.iterations,
                &mut outcome,
                |s, records| s.insert_batch(Some(records)),
            )?;
            outcome.data.extend(result);
        }

        self.enter(RunPhase::SingleTrials);
        let single_count = checked.record_count.min(SINGLE_RECORD_CAP);
        for strategy in strategies.single.iter_mut() {
            let result = self.run_configuration(
                &mut **strategy,
                single_count,
                1,
                checked.iterations,
                &mut outcome,
                |s, records| s.insert_single(Some(records)),
            )?;
            outcome.data.extend(result);
        }

        self.enter(RunPhase::Reporting);
        if outcome.data.is_empty() {
            tracing::warn!("no benchmark results to report");
        } else if let Err(e) = sink.report(&outcome.data) {
            tracing::warn!(error = %e, "report sink failed");
            outcome.add_error(e.into());
        }

        self.enter(RunPhase::Done);
        tracing::info!(
            results = outcome.data.len(),
            errors = outcome.error_count(),
            "benchmark run finished"
        );
        Ok(outcome)
    }

    fn check_settings(&self) -> Result<Checked, InputError> {
        let s = &self.settings;
        let chunk_size = insertbench_storage::strategy::validate_chunk_size(s.chunk_size)?;
        let record_count = usize::try_from(s.record_count)
            .map_err(|_| InputError::NegativeCount { value: s.record_count })?;
        let iterations = usize::try_from(s.iterations)
            .map_err(|_| InputError::NegativeCount { value: s.iterations })?;
        Ok(Checked {
            chunk_size,
            record_count,
            iterations,
        })
    }

    fn enter(&mut self, phase: RunPhase) {
        tracing::info!(from = %self.phase, to = %phase, "run phase");
        self.phase = phase;
    }

    /// Exercise every batch strategy once with discarded data.
    fn warmup(&mut self, batch: &mut [Box<dyn BatchInsert>]) -> Result<(), RunError> {
        let count = self.settings.warmup_count;
        if count <= 0 {
            tracing::info!("warmup disabled");
            return Ok(());
        }

        for strategy in batch.iter_mut() {
            let records = self.generator.generate(count)?;
            match warm(&mut **strategy, self.settings.chunk_size, &records) {
                Ok(()) => tracing::debug!(strategy = strategy.label(), count, "warmup complete"),
                Err(InsertError::InvalidInput(e)) => return Err(e.into()),
                Err(InsertError::Store(e)) => {
                    tracing::warn!(strategy = strategy.label(), error = %e, "warmup failed");
                }
            }
        }
        Ok(())
    }

    /// Run `iterations` timed trials of one strategy and assemble its result.
    ///
    /// Returns `Ok(None)` when a storage failure hit before any trial
    /// completed; the failure itself lands in `outcome`.
    fn run_configuration<S, F>(
        &mut self,
        strategy: &mut S,
        record_count: usize,
        chunk_size: usize,
        iterations: usize,
        outcome: &mut RunOutcome<Vec<BenchmarkResult>>,
        mut insert: F,
    ) -> Result<Option<BenchmarkResult>, RunError>
    where
        S: InsertStrategy + ?Sized,
        F: FnMut(&mut S, &[Record]) -> Result<usize, InsertError>,
    {
        let label = strategy.label().to_string();
        let mut samples = Vec::with_capacity(iterations);
        let mut aborted = false;

        for iteration in 0..iterations {
            match self.trial(strategy, record_count, &mut insert) {
                Ok(ms) => {
                    tracing::info!(strategy = %label, iteration = iteration + 1, duration_ms = ms, "trial complete");
                    samples.push(ms);
                }
                Err(InsertError::InvalidInput(e)) => return Err(e.into()),
                Err(InsertError::Store(source)) => {
                    tracing::warn!(
                        strategy = %label,
                        completed = samples.len(),
                        error = %source,
                        "trial failed, skipping remaining iterations"
                    );
                    outcome.add_error(RunError::TrialAborted {
                        label: label.clone(),
                        completed: samples.len(),
                        source,
                    });
                    aborted = true;
                    break;
                }
            }
        }

        if let Err(e) = strategy.truncate() {
            tracing::warn!(strategy = %label, error = %e, "cleanup truncate failed");
            outcome.add_error(e.into());
        }

        if aborted && samples.is_empty() {
            return Ok(None);
        }
        let completed = samples.len();
        let result =
            BenchmarkResult::new(label, record_count, chunk_size, completed, samples, Utc::now())?;
        Ok(Some(result))
    }

    /// One timed trial: reset, generate, insert. Only the insert is timed.
    fn trial<S, F>(
        &mut self,
        strategy: &mut S,
        record_count: usize,
        insert: &mut F,
    ) -> Result<f64, InsertError>
    where
        S: InsertStrategy + ?Sized,
        F: FnMut(&mut S, &[Record]) -> Result<usize, InsertError>,
    {
        strategy.truncate()?;
        let records = self.generator.generate(to_count(record_count))?;

        let start = Instant::now();
        let inserted = insert(strategy, &records)?;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        if inserted != records.len() {
            tracing::warn!(
                strategy = strategy.label(),
                expected = records.len(),
                acknowledged = inserted,
                "acknowledged row count differs from generated count"
            );
        }
        Ok(elapsed_ms)
    }
}

/// Truncate, set the chunk size, insert, truncate again.
fn warm(
    strategy: &mut dyn BatchInsert,
    chunk_size: i64,
    records: &[Record],
) -> Result<(), InsertError> {
    strategy.truncate()?;
    strategy.set_chunk_size(chunk_size)?;
    strategy.insert_batch(Some(records))?;
    strategy.truncate()?;
    Ok(())
}

/// `record_count` came from a validated `i64`, so it always fits back.
fn to_count(record_count: usize) -> i64 {
    i64::try_from(record_count).unwrap_or(i64::MAX)
}
