//! Report sink configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the console/CSV/JSON report sink.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory that receives the CSV and JSON files. Default: `benchmark-results`.
    pub output_dir: Option<String>,
    /// Also write a JSON sidecar next to the CSV. Default: true.
    pub write_json: Option<bool>,
}

impl ReportConfig {
    pub fn effective_output_dir(&self) -> String {
        self.output_dir
            .clone()
            .unwrap_or_else(|| "benchmark-results".to_string())
    }

    pub fn effective_write_json(&self) -> bool {
        self.write_json.unwrap_or(true)
    }
}
