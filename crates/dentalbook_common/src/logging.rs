//! Logging utilities for the appointment service.
//!
//! This module provides the single place where the tracing subscriber is
//! installed, so every crate can simply use the `tracing` macros.

use dentalbook_config::LoggingConfig;
use tracing::{error, info, warn, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name prefix for the rolling log files.
const LOG_FILE_PREFIX: &str = "dentalbook.log";

/// Initialize the tracing subscriber from the `logging` config section.
///
/// Returns the guard of the background file writer when file logging is
/// enabled. The guard must be kept alive for as long as logs should be flushed.
pub fn init_with_config(config: Option<&LoggingConfig>) -> Option<WorkerGuard> {
    let level = match config.and_then(|c| c.level.as_deref()) {
        Some(raw) => match raw.parse::<Level>() {
            Ok(level) => level,
            Err(_) => {
                warn!("Unknown log level '{}', falling back to INFO", raw);
                Level::INFO
            }
        },
        None => Level::INFO,
    };

    init_with_level(level, config.and_then(|c| c.directory.as_deref()))
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` takes precedence over `level` when it is set. When `directory`
/// is given, a daily rolling file is written there in addition to stdout.
pub fn init_with_level(level: Level, directory: Option<&str>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dentalbook={level},tower_http={level}")));

    let (file_layer, guard) = match directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // try_init: a global subscriber may already be installed (tests, embedding).
    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(file_layer)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
        if let Some(dir) = directory {
            info!("Writing log files to {}", dir);
        }
    }

    guard
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}

/// Log a result, with different messages for success and error cases.
///
/// Returns the original result, so this can be used in a chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => log_error(e, error_context),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_result_passes_value_through() {
        init_with_level(Level::INFO, None);
        let ok: Result<u8, String> = Ok(3);
        assert_eq!(log_result(ok, "done", "failed"), Ok(3));

        let err: Result<u8, String> = Err("boom".to_string());
        assert_eq!(log_result(err, "done", "failed"), Err("boom".to_string()));
    }

    #[test]
    fn test_repeated_init_is_harmless() {
        init_with_level(Level::DEBUG, None);
        let guard = init_with_config(Some(&LoggingConfig {
            level: Some("not-a-level".to_string()),
            directory: None,
        }));
        assert!(guard.is_none());
    }
}
