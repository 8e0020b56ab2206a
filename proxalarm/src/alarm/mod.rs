//! Alarm domain types.
//!
//! - [`AlarmConfig`]: the armed geofence (target + radius) and its alert preferences
//! - [`AlertPreferences`]: sound and vibration selection
//! - [`ArmingState`]: the Idle / Armed / Triggered lifecycle

mod config;
mod preferences;
mod state;

pub use config::{AlarmConfig, AlarmConfigBuilder, ConfigError};
pub use preferences::{
    available_sounds, AlertPreferences, SoundAsset, SoundId, VibrationPattern,
    DEFAULT_CUSTOM_VIBRATION_MS,
};
pub use state::ArmingState;
