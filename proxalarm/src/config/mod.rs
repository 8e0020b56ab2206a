//! User configuration.
//!
//! Settings live in `~/.config/proxalarm/config.ini`:
//!
//! ```text
//! [storage]
//! path = ~/.local/share/proxalarm/state.json
//!
//! [alarm]
//! default_radius = 500
//!
//! [foreground]
//! interval_ms = 2000
//! distance_m = 5
//!
//! [background]
//! interval_ms = 5000
//! distance_m = 10
//!
//! [engine]
//! timeout_ms = 10000
//!
//! [logging]
//! level = info
//! directory = ~/.local/share/proxalarm/logs
//! ```

mod file;
mod keys;

pub use file::{
    config_directory, config_file_path, default_state_path, AlarmSettings, ConfigFile,
    ConfigFileError, EngineSettings, LoggingSettings, StorageSettings, DEFAULT_RADIUS_METERS,
    DEFAULT_TIMEOUT_MS,
};
pub use keys::ConfigKey;
