//! Logging utilities for Barberbook.
//!
//! One place to set up the tracing subscriber for every binary in the
//! workspace. Output goes to stdout; when `LOG_DIR` is set a daily rolling
//! file is written as well.

use tracing::{error, info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// lifetime of the process when `LOG_DIR` is set.
///
/// ```
/// use barberbook_common::logging;
///
/// let _guard = logging::init();
/// ```
pub fn init() -> Option<WorkerGuard> {
    init_with_level(Level::INFO)
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` wins over `level` when it is set and parses.
pub fn init_with_level(level: Level) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    let (file_layer, guard) = match std::env::var("LOG_DIR") {
        Ok(dir) if !dir.trim().is_empty() => {
            let appender = tracing_appender::rolling::daily(dir, "barberbook.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    // try_init: tests and embedders may have installed a subscriber already
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .with(file_layer)
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
    guard
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}
