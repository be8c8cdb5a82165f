//! Top-level insertbench configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{BenchmarkConfig, ReportConfig, StorageConfig};
use crate::errors::ConfigError;

/// File name looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "insertbench.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`INSERTBENCH_*`)
/// 3. Project config (`insertbench.toml` in the project root, or an explicit file)
/// 4. User config (`~/.insertbench/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct BenchConfig {
    pub benchmark: BenchmarkConfig,
    pub storage: StorageConfig,
    pub report: ReportConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub chunk_size: Option<i64>,
    pub record_count: Option<i64>,
    pub iterations: Option<i64>,
    pub warmup_count: Option<i64>,
    pub seed: Option<u64>,
    pub database_path: Option<String>,
    pub output_dir: Option<String>,
}

impl BenchConfig {
    /// Load configuration with layered resolution.
    ///
    /// `config_file`, when given, replaces the project lookup and must exist.
    pub fn load(
        root: &Path,
        config_file: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        match config_file {
            Some(path) => Self::merge_toml_file(&mut config, path)?,
            None => {
                let project_config_path = root.join(PROJECT_CONFIG_FILE);
                if project_config_path.exists() {
                    Self::merge_toml_file(&mut config, &project_config_path)?;
                }
            }
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &BenchConfig) -> Result<(), ConfigError> {
        let chunk_size = config.benchmark.effective_chunk_size();
        if chunk_size < 1 {
            return Err(ConfigError::ValidationFailed {
                field: "benchmark.chunk_size".to_string(),
                message: format!("must be at least 1, but was {chunk_size}"),
            });
        }
        let record_count = config.benchmark.effective_record_count();
        if record_count < 0 {
            return Err(ConfigError::ValidationFailed {
                field: "benchmark.record_count".to_string(),
                message: format!("must be non-negative, but was {record_count}"),
            });
        }
        let iterations = config.benchmark.effective_iterations();
        if iterations < 0 {
            return Err(ConfigError::ValidationFailed {
                field: "benchmark.iterations".to_string(),
                message: format!("must be non-negative, but was {iterations}"),
            });
        }
        // TOML integers are i64, so larger seeds cannot be written back out.
        if let Some(seed) = config.benchmark.seed {
            if i64::try_from(seed).is_err() {
                return Err(ConfigError::ValidationFailed {
                    field: "benchmark.seed".to_string(),
                    message: format!("must be at most {}, but was {seed}", i64::MAX),
                });
            }
        }
        if config.storage.effective_database_path().trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "storage.database_path".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.insertbench/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".insertbench").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut BenchConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: BenchConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut BenchConfig, other: &BenchConfig) {
        // Benchmark
        if other.benchmark.chunk_size.is_some() {
            base.benchmark.chunk_size = other.benchmark.chunk_size;
        }
        if other.benchmark.record_count.is_some() {
            base.benchmark.record_count = other.benchmark.record_count;
        }
        if other.benchmark.iterations.is_some() {
            base.benchmark.iterations = other.benchmark.iterations;
        }
        if other.benchmark.warmup_count.is_some() {
            base.benchmark.warmup_count = other.benchmark.warmup_count;
        }
        if other.benchmark.seed.is_some() {
            base.benchmark.seed = other.benchmark.seed;
        }

        // Storage
        if other.storage.database_path.is_some() {
            base.storage.database_path = other.storage.database_path.clone();
        }

        // Report
        if other.report.output_dir.is_some() {
            base.report.output_dir = other.report.output_dir.clone();
        }
        if other.report.write_json.is_some() {
            base.report.write_json = other.report.write_json;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `INSERTBENCH_CHUNK_SIZE`, `INSERTBENCH_RECORD_COUNT`, etc.
    /// Unparseable values are ignored.
    fn apply_env_overrides(config: &mut BenchConfig) {
        if let Some(v) = env_parse::<i64>("INSERTBENCH_CHUNK_SIZE") {
            config.benchmark.chunk_size = Some(v);
        }
        if let Some(v) = env_parse::<i64>("INSERTBENCH_RECORD_COUNT") {
            config.benchmark.record_count = Some(v);
        }
        if let Some(v) = env_parse::<i64>("INSERTBENCH_ITERATIONS") {
            config.benchmark.iterations = Some(v);
        }
        if let Some(v) = env_parse::<i64>("INSERTBENCH_WARMUP_COUNT") {
            config.benchmark.warmup_count = Some(v);
        }
        if let Some(v) = env_parse::<u64>("INSERTBENCH_SEED") {
            config.benchmark.seed = Some(v);
        }
        if let Ok(val) = std::env::var("INSERTBENCH_DATABASE_PATH") {
            config.storage.database_path = Some(val);
        }
        if let Ok(val) = std::env::var("INSERTBENCH_OUTPUT_DIR") {
            config.report.output_dir = Some(val);
        }
        if let Some(v) = env_parse::<bool>("INSERTBENCH_WRITE_JSON") {
            config.report.write_json = Some(v);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut BenchConfig, cli: &CliOverrides) {
        if let Some(v) = cli.chunk_size {
            config.benchmark.chunk_size = Some(v);
        }
        if let Some(v) = cli.record_count {
            config.benchmark.record_count = Some(v);
        }
        if let Some(v) = cli.iterations {
            config.benchmark.iterations = Some(v);
        }
        if let Some(v) = cli.warmup_count {
            config.benchmark.warmup_count = Some(v);
        }
        if let Some(v) = cli.seed {
            config.benchmark.seed = Some(v);
        }
        if let Some(ref v) = cli.database_path {
            config.storage.database_path = Some(v.clone());
        }
        if let Some(ref v) = cli.output_dir {
            config.report.output_dir = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|val| val.trim().parse::<T>().ok())
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
