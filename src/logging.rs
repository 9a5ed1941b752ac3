//! File-based logging.
//!
//! The TUI owns stdout, so all tracing output goes to
//! `~/.taskdeck/logs/taskdeck.log`.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Overrides the configured log level (same syntax as `RUST_LOG`).
pub const LOG_ENV: &str = "TASKDECK_LOG";

pub const LOG_FILE: &str = "taskdeck.log";

/// Build the filter: `TASKDECK_LOG` wins, then the configured level, then `info`.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to `dir/taskdeck.log`.
///
/// The returned guard must be held until shutdown so buffered lines get flushed.
/// Returns `None` when the log directory cannot be created; the app still runs.
pub fn init(level: &str, dir: &Path) -> Option<WorkerGuard> {
    std::fs::create_dir_all(dir).ok()?;

    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let installed = tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter(level))
        .with_ansi(false)
        .try_init();

    installed.is_ok().then_some(guard)
}
