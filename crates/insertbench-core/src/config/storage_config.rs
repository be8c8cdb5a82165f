//! Storage configuration.

use serde::{Deserialize, Serialize};

/// Path value that selects an in-memory database.
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Where the benchmark table lives.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database file. `:memory:` selects an in-memory store.
    /// Default: `insertbench.db`.
    pub database_path: Option<String>,
}

impl StorageConfig {
    pub fn effective_database_path(&self) -> String {
        self.database_path
            .clone()
            .unwrap_or_else(|| "insertbench.db".to_string())
    }

    /// Whether the configured store is in-memory.
    pub fn is_in_memory(&self) -> bool {
        self.effective_database_path() == IN_MEMORY_PATH
    }
}
