//! Application error types.

use std::fmt;

use crate::dispatch::DispatchError;

/// Errors that can occur while starting the application.
#[derive(Debug)]
pub enum AppError {
    /// Notification channels could not be registered.
    ChannelSetup(DispatchError),

    /// Configuration error.
    Config(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ChannelSetup(e) => {
                write!(f, "Failed to set up notification channels: {}", e)
            }
            AppError::Config(msg) => {
                write!(f, "Configuration error: {}", msg)
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::ChannelSetup(e) => Some(e),
            AppError::Config(_) => None,
        }
    }
}

impl From<DispatchError> for AppError {
    fn from(e: DispatchError) -> Self {
        AppError::ChannelSetup(e)
    }
}
