//! Logging setup.
//!
//! Installs a global `tracing` subscriber that writes to a daily-rolling log
//! file through a non-blocking writer. `RUST_LOG` takes precedence over the
//! configured level when set.
//!
//! ```ignore
//! let _guard = proxalarm::logging::init_logging(&LoggingConfig::default())?;
//! tracing::info!("started");
//! // Dropping the guard flushes buffered lines.
//! ```

use std::path::PathBuf;

use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::UtcOffset;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Default log level when neither config nor `RUST_LOG` says otherwise.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Base name of the rolling log file; the appender adds a date suffix.
pub const DEFAULT_LOG_FILE_NAME: &str = "proxalarm.log";

/// Errors from [`init_logging`].
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("A global logger is already installed: {0}")]
    AlreadyInitialized(String),
}

/// Where and how much to log.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directory for the rolling log files.
    pub directory: PathBuf,
    /// Log file base name.
    pub file_name: String,
    /// Filter directive, e.g. `info` or `proxalarm=debug`.
    pub level: String,
    /// Also write human-readable lines to stderr.
    pub stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_log_directory(),
            file_name: DEFAULT_LOG_FILE_NAME.to_string(),
            level: DEFAULT_LOG_LEVEL.to_string(),
            stderr: false,
        }
    }
}

impl LoggingConfig {
    /// Use `directory` for log files.
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Use `level` as the filter directive.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Mirror log lines to stderr.
    pub fn with_stderr(mut self, stderr: bool) -> Self {
        self.stderr = stderr;
        self
    }
}

/// Keeps the background log writer alive. Drop it last.
pub struct LoggingGuard {
    _worker: WorkerGuard,
    directory: PathBuf,
}

impl std::fmt::Debug for LoggingGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingGuard")
            .field("directory", &self.directory)
            .finish_non_exhaustive()
    }
}

impl LoggingGuard {
    /// Directory the log files are written to.
    pub fn directory(&self) -> &std::path::Path {
        &self.directory
    }
}

/// Default log directory: `<data dir>/proxalarm/logs`.
pub fn default_log_directory() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("proxalarm")
        .join("logs")
}

/// Build the filter: `RUST_LOG` if set, otherwise `level`.
fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|e| LoggingError::InvalidFilter {
        filter: level.to_string(),
        reason: e.to_string(),
    })
}

/// Install the global subscriber.
///
/// Must be called at most once per process, before any runtime threads
/// start (the local UTC offset can only be read reliably then).
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard, LoggingError> {
    std::fs::create_dir_all(&config.directory).map_err(|source| LoggingError::CreateDir {
        path: config.directory.clone(),
        source,
    })?;

    let filter = build_filter(&config.level)?;

    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let timer = OffsetTime::new(offset, Rfc3339);

    let appender = tracing_appender::rolling::daily(&config.directory, &config.file_name);
    let (writer, worker) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_timer(timer.clone())
        .with_target(true);

    let stderr_layer = config.stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_timer(timer)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    Ok(LoggingGuard {
        _worker: worker,
        directory: config.directory.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.file_name, "proxalarm.log");
        assert!(config.directory.ends_with("proxalarm/logs"));
        assert!(!config.stderr);
    }

    #[test]
    fn test_builder_methods() {
        let config = LoggingConfig::default()
            .with_directory("/tmp/logs")
            .with_level("debug")
            .with_stderr(true);
        assert_eq!(config.directory, PathBuf::from("/tmp/logs"));
        assert_eq!(config.level, "debug");
        assert!(config.stderr);
    }

    #[test]
    fn test_build_filter_accepts_directives() {
        assert!(EnvFilter::try_new("proxalarm=debug,warn").is_ok());
    }

    #[test]
    fn test_invalid_log_dir_is_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let config = LoggingConfig::default().with_directory(blocker.join("logs"));
        let result = init_logging(&config);

        assert!(matches!(result, Err(LoggingError::CreateDir { .. })));
    }
}
