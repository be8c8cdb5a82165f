//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the filter directives.
pub const LOG_ENV_VAR: &str = "INSERTBENCH_LOG";

/// Filter used when `INSERTBENCH_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "insertbench=info";

/// Initialize the insertbench tracing/logging system.
///
/// Reads `INSERTBENCH_LOG` for per-module log levels.
/// Format: `INSERTBENCH_LOG=insertbench_bench=debug,insertbench_storage=warn`
///
/// Calling it more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .try_init();
    });
}
