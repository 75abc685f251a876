//! Tracing setup
//!
//! Logs go to a daily rolling file under the user's cache directory. The
//! terminal belongs to the selector and stdout to the shell wrapper, so
//! nothing is ever logged to either.

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// File name prefix of the rolling log
pub const LOG_FILE: &str = "try.log";

/// Directory holding the log files, `<cache_dir>/try/logs`
#[must_use]
pub fn log_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("try").join("logs"))
}

/// Install the global subscriber
///
/// `RUST_LOG` overrides `default_filter` when set. Returns `None` (and logs
/// nowhere) when the log directory cannot be created. The guard must be
/// held until exit so buffered lines get flushed.
pub fn init_tracing(default_filter: &str) -> Option<WorkerGuard> {
    let dir = log_dir()?;
    std::fs::create_dir_all(&dir).ok()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::daily(&dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_writer(non_blocking_file);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();

    tracing::debug!(dir = %dir.display(), "logging initialised");
    Some(guard)
}
