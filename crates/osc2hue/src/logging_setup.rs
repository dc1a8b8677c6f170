//! Subscriber installation for the binary
//!
//! Console output goes to stderr. File output goes to one file per day under
//! `log_dir`, written by a background worker that lives as long as the
//! returned [`LogGuard`].

use std::fs::{File, OpenOptions};
use std::path::Path;

use anyhow::{Context, Result};
use osc2hue_core::LogConfig;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

/// Keeps the file writer flushing until dropped
pub struct LogGuard {
    _worker: WorkerGuard,
}

/// Open the day's log file for appending, creating it if needed
fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {:?}", path))
}

/// Prepare the log directory and the non-blocking file writer
fn file_writer(config: &LogConfig) -> Result<(NonBlocking, LogGuard)> {
    config
        .ensure_log_directory()
        .context("Failed to create log directory")?;

    match config.cleanup_old_logs() {
        Ok(0) => {}
        Ok(removed) => eprintln!("Removed {} old log file(s)", removed),
        Err(e) => eprintln!("Warning: Failed to cleanup old log files: {}", e),
    }

    let path = config.current_log_path();
    let file = open_log_file(&path)?;
    eprintln!("Logging to file: {:?}", path);

    let (writer, worker) = tracing_appender::non_blocking(file);
    Ok((writer, LogGuard { _worker: worker }))
}

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the configured level. Returns a guard when file
/// output is enabled.
pub fn init(config: &LogConfig) -> Result<Option<LogGuard>> {
    let filter = || {
        EnvFilter::builder()
            .with_default_directive(config.parse_level().into())
            .from_env_lossy()
    };

    let console = config.console_output.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(filter())
    });

    let (file, guard) = if config.file_output {
        let (writer, guard) = file_writer(config)?;
        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_filter(filter());
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry().with(console).with(file).init();

    tracing::info!("Logging initialized at level: {}", config.level);
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_log_file_is_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("osc2hue-2024-01-01.log");

        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_file_writer_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            file_output: true,
            log_dir: dir.path().join("nested"),
            ..LogConfig::default()
        };

        let (_writer, _guard) = file_writer(&config).unwrap();
        assert!(config.current_log_path().exists());
    }
}
