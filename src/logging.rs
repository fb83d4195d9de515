//! Log file setup.
//!
//! Logs go to `<data dir>/logs/focusdeck.log` so they never interfere with
//! command output or the timer screen. `RUST_LOG` overrides the default
//! `focusdeck=info` filter.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::FocusdeckError;

/// Log file name inside the logs directory.
pub const LOG_FILE: &str = "focusdeck.log";

const DEFAULT_FILTER: &str = "focusdeck=info";

/// Install the global subscriber writing to `logs_dir`.
///
/// Keep the returned guard alive until exit; dropping it flushes and stops
/// the background writer.
///
/// # Errors
///
/// Returns an error if the logs directory cannot be created or a global
/// subscriber is already installed.
pub fn init(logs_dir: &Path) -> Result<WorkerGuard, FocusdeckError> {
    std::fs::create_dir_all(logs_dir)?;

    let appender = tracing_appender::rolling::never(logs_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| FocusdeckError::Config(format!("Failed to initialize logging: {e}")))?;

    Ok(guard)
}
