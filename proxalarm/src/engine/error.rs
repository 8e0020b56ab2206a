//! Engine error types.

use thiserror::Error;

use crate::alarm::ConfigError;
use crate::store::StoreError;

/// Errors surfaced to callers of `arm` and `disarm`.
///
/// Observing samples never fails; problems during a trigger are reported
/// inside the observation instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The alarm configuration was rejected; nothing was written.
    #[error("Invalid alarm configuration: {0}")]
    Config(#[from] ConfigError),

    /// The store write did not take effect.
    #[error("Alarm state could not be saved: {0}")]
    Store(#[from] StoreError),

    /// The foreground tracking task panicked or was aborted.
    #[error("Tracking task failed: {0}")]
    Task(String),
}
