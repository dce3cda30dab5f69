//! Logging initialization for stepper.
//!
//! TUI mode: logs to `<state>/logs/stepper-{datetime}.log`
//! CLI mode: logs to stderr

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Result of logging initialization
pub struct LoggingHandle {
    /// Flushes buffered file logs when dropped
    pub _guard: Option<WorkerGuard>,

    /// Path to the log file (only set in TUI mode with file logging enabled)
    pub log_file_path: Option<PathBuf>,
}

/// Initialize the global subscriber.
///
/// `RUST_LOG` wins over the configured level; `debug_override` (from
/// `--debug`) wins over both.
pub fn init_logging(
    config: &Config,
    is_tui_mode: bool,
    debug_override: bool,
) -> Result<LoggingHandle> {
    let filter = tracing_subscriber::EnvFilter::new(filter_directive(
        &config.logging.level,
        std::env::var("RUST_LOG").ok(),
        debug_override,
    ));

    if is_tui_mode && config.logging.to_file {
        // Stderr belongs to the terminal UI, so write to a file instead
        let logs_dir = config.logs_path();
        std::fs::create_dir_all(&logs_dir)?;

        let log_filename = log_file_name(chrono::Utc::now());
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

fn filter_directive(configured: &str, env: Option<String>, debug_override: bool) -> String {
    if debug_override {
        return "debug".to_string();
    }
    env.unwrap_or_else(|| configured.to_string())
}

fn log_file_name(now: chrono::DateTime<chrono::Utc>) -> String {
    format!("stepper-{}.log", now.format("%Y%m%dT%H%M%SZ"))
}

/// Print the session log location if anything was written to it
pub fn report_log_file(log_file_path: Option<&Path>) {
    if let Some(log_path) = log_file_path.filter(|p| has_log_output(p)) {
        eprintln!("Session log: {}", log_path.display());
    }
}

fn has_log_output(log_path: &Path) -> bool {
    log_path
        .metadata()
        .is_ok_and(|metadata| metadata.len() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_log_file_name_format() {
        let now = chrono::Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(log_file_name(now), "stepper-20260304T050607Z.log");
    }

    #[test]
    fn test_filter_precedence() {
        assert_eq!(filter_directive("warn", None, false), "warn");
        assert_eq!(
            filter_directive("warn", Some("stepper=trace".to_string()), false),
            "stepper=trace"
        );
        assert_eq!(
            filter_directive("warn", Some("stepper=trace".to_string()), true),
            "debug"
        );
    }

    #[test]
    fn test_logs_dir_lives_under_state() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.paths.state = temp_dir.path().to_string_lossy().to_string();

        let logs_dir = config.logs_path();
        assert!(logs_dir.ends_with("logs"));
        assert!(logs_dir.starts_with(temp_dir.path()));
    }

    #[test]
    fn test_only_non_empty_log_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("absent.log");
        let empty = temp_dir.path().join("empty.log");
        let written = temp_dir.path().join("written.log");
        std::fs::write(&empty, "").unwrap();
        std::fs::write(&written, "INFO stepper started\n").unwrap();

        assert!(!has_log_output(&missing));
        assert!(!has_log_output(&empty));
        assert!(has_log_output(&written));
    }
}
