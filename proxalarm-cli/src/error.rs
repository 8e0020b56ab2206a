//! CLI error type.

use std::fmt;

use proxalarm::app::AppError;
use proxalarm::config::ConfigFileError;
use proxalarm::coord::CoordError;
use proxalarm::engine::EngineError;
use proxalarm::logging::LoggingError;
use proxalarm::position::PositionError;
use proxalarm::store::StoreError;

/// Errors reported by CLI commands. Every variant exits non-zero.
#[derive(Debug)]
pub enum CliError {
    /// Configuration problem (file, key, or value).
    Config(String),

    /// A command-line argument could not be used.
    InvalidArgument(String),

    /// Application startup failed.
    App(AppError),

    /// Arming or disarming did not take effect.
    Engine(EngineError),

    /// Alarm state could not be read or written.
    Store(StoreError),

    /// A position track could not be loaded or replayed.
    Position(PositionError),

    /// Logging could not be initialised.
    Logging(LoggingError),

    /// The async runtime could not be created.
    Runtime(String),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) | CliError::InvalidArgument(_) => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::App(e) => write!(f, "{}", e),
            CliError::Engine(e) => write!(f, "{}", e),
            CliError::Store(e) => write!(f, "Alarm state error: {}", e),
            CliError::Position(e) => write!(f, "{}", e),
            CliError::Logging(e) => write!(f, "Logging error: {}", e),
            CliError::Runtime(msg) => write!(f, "Failed to start async runtime: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::App(e) => Some(e),
            CliError::Engine(e) => Some(e),
            CliError::Store(e) => Some(e),
            CliError::Position(e) => Some(e),
            CliError::Logging(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<CoordError> for CliError {
    fn from(e: CoordError) -> Self {
        CliError::InvalidArgument(e.to_string())
    }
}

impl From<AppError> for CliError {
    fn from(e: AppError) -> Self {
        CliError::App(e)
    }
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        CliError::Engine(e)
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        CliError::Store(e)
    }
}

impl From<PositionError> for CliError {
    fn from(e: PositionError) -> Self {
        CliError::Position(e)
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}
