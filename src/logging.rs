//! Logging initialization.
//!
//! TUI mode: logs to `<state>/logs/healthconnect-{datetime}.log` so output
//! never lands on the alternate screen.
//! CLI mode: logs to stderr

use anyhow::Result;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Result of logging initialization
pub struct LoggingHandle {
    /// Flushes buffered file output when dropped
    pub _guard: Option<WorkerGuard>,

    /// Path to the log file (only set in TUI mode with file logging enabled)
    pub log_file_path: Option<PathBuf>,
}

/// File name for a session log started now
pub fn log_file_name() -> String {
    let timestamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ");
    format!("healthconnect-{}.log", timestamp)
}

/// Level filter to apply: `--debug` wins over the configured level
pub fn effective_level(config: &Config, debug_override: bool) -> String {
    if debug_override {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    }
}

/// Only the TUI logs to a file, and only when the config allows it
pub fn writes_to_file(config: &Config, is_tui_mode: bool) -> bool {
    is_tui_mode && config.logging.to_file
}

/// Initialize logging based on mode and configuration.
///
/// The returned handle must be kept alive for the duration of the program.
pub fn init_logging(
    config: &Config,
    is_tui_mode: bool,
    debug_override: bool,
) -> Result<LoggingHandle> {
    let log_level = effective_level(config, debug_override);
    let filter = tracing_subscriber::EnvFilter::new(std::env::var("RUST_LOG").unwrap_or(log_level));

    if writes_to_file(config, is_tui_mode) {
        let logs_dir = config.logs_path();
        std::fs::create_dir_all(&logs_dir)?;

        let log_filename = log_file_name();
        let log_file_path = logs_dir.join(&log_filename);

        let file_appender = tracing_appender::rolling::never(&logs_dir, &log_filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();

        Ok(LoggingHandle {
            _guard: Some(guard),
            log_file_path: Some(log_file_path),
        })
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();

        Ok(LoggingHandle {
            _guard: None,
            log_file_path: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_name_format() {
        let name = log_file_name();
        assert!(name.starts_with("healthconnect-"));
        assert!(name.ends_with("Z.log"));
    }

    #[test]
    fn test_debug_flag_overrides_level() {
        let mut config = Config::default();
        config.logging.level = "warn".to_string();
        assert_eq!(effective_level(&config, false), "warn");
        assert_eq!(effective_level(&config, true), "debug");
    }

    #[test]
    fn test_file_logging_only_in_tui_mode() {
        let mut config = Config::default();
        assert!(writes_to_file(&config, true));
        assert!(!writes_to_file(&config, false));

        // Even in TUI mode, if to_file is false, logs go to stderr
        config.logging.to_file = false;
        assert!(!writes_to_file(&config, true));
    }
}
