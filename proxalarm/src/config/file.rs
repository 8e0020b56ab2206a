//! INI configuration file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use thiserror::Error;
use tracing::debug;

use crate::logging::{default_log_directory, LoggingConfig, DEFAULT_LOG_LEVEL};
use crate::position::SubscriptionOptions;

/// Default radius offered when arming without an explicit one.
pub const DEFAULT_RADIUS_METERS: f64 = 500.0;

/// Default bound on store and notification calls.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Failed to read config file {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),
}

/// `[storage]`
#[derive(Debug, Clone, PartialEq)]
pub struct StorageSettings {
    /// Path of the JSON state file.
    pub path: PathBuf,
}

/// `[alarm]`
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmSettings {
    pub default_radius: f64,
}

/// `[engine]`
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    /// Bound on every store and dispatch call.
    pub timeout_ms: u64,
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub level: String,
    pub directory: PathBuf,
}

/// Parsed `config.ini`. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub storage: StorageSettings,
    pub alarm: AlarmSettings,
    /// `[foreground]` subscription thresholds.
    pub foreground: SubscriptionOptions,
    /// `[background]` subscription thresholds.
    pub background: SubscriptionOptions,
    pub engine: EngineSettings,
    pub logging: LoggingSettings,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            storage: StorageSettings {
                path: default_state_path(),
            },
            alarm: AlarmSettings {
                default_radius: DEFAULT_RADIUS_METERS,
            },
            foreground: SubscriptionOptions::foreground(),
            background: SubscriptionOptions::background(),
            engine: EngineSettings {
                timeout_ms: DEFAULT_TIMEOUT_MS,
            },
            logging: LoggingSettings {
                level: DEFAULT_LOG_LEVEL.to_string(),
                directory: default_log_directory(),
            },
        }
    }
}

/// `<config dir>/proxalarm/config.ini`
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

/// `<config dir>/proxalarm`
pub fn config_directory() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("proxalarm")
}

/// `<data dir>/proxalarm/state.json`
pub fn default_state_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("proxalarm")
        .join("state.json")
}

impl ConfigFile {
    /// Load from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigFileError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    /// Parse INI text.
    pub fn parse(text: &str) -> Result<Self, ConfigFileError> {
        let ini = Ini::load_from_str(text).map_err(|e| ConfigFileError::Read {
            path: PathBuf::from("<string>"),
            reason: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigFileError> {
        let mut config = Self::default();
        for key in super::ConfigKey::all() {
            if let Some(value) = ini
                .section(Some(key.section()))
                .and_then(|s| s.get(key.key_name()))
            {
                let value = value.trim();
                if !value.is_empty() {
                    key.set(&mut config, value)?;
                }
            }
        }
        Ok(config)
    }

    /// Save to the default location, creating the directory if needed.
    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&config_file_path())
    }

    /// Save to `path`, creating the parent directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        let write_err = |source| ConfigFileError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        self.to_ini().write_to_file(path).map_err(write_err)
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        for key in super::ConfigKey::all() {
            ini.with_section(Some(key.section()))
                .set(key.key_name(), key.get(self));
        }
        ini
    }

    /// Bound applied to store and dispatch calls.
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.engine.timeout_ms)
    }

    /// Logging setup derived from `[logging]`.
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig::default()
            .with_directory(self.logging.directory.clone())
            .with_level(self.logging.level.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ConfigFile::default();
        assert_eq!(config.alarm.default_radius, 500.0);
        assert_eq!(config.foreground.min_interval_ms, 2_000);
        assert_eq!(config.foreground.min_distance_meters, 5.0);
        assert_eq!(config.background.min_interval_ms, 5_000);
        assert_eq!(config.background.min_distance_meters, 10.0);
        assert_eq!(config.operation_timeout(), Duration::from_secs(10));
        assert!(config.storage.path.ends_with("proxalarm/state.json"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigFile::load_from(&dir.path().join("config.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_parse_partial_file() {
        let config = ConfigFile::parse(
            "[alarm]\ndefault_radius = 250\n\n[background]\ninterval_ms = 15000\n",
        )
        .unwrap();

        assert_eq!(config.alarm.default_radius, 250.0);
        assert_eq!(config.background.min_interval_ms, 15_000);
        assert_eq!(config.background.min_distance_meters, 10.0);
    }

    #[test]
    fn test_parse_rejects_bad_number() {
        let result = ConfigFile::parse("[engine]\ntimeout_ms = soon\n");
        assert!(matches!(result, Err(ConfigFileError::InvalidValue { .. })));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.storage.path = dir.path().join("state.json");
        config.engine.timeout_ms = 2_500;
        config.logging.level = "debug".to_string();
        config.save_to(&path).unwrap();

        let reloaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_logging_config_follows_settings() {
        let mut config = ConfigFile::default();
        config.logging.level = "trace".to_string();
        config.logging.directory = PathBuf::from("/var/log/proxalarm");

        let logging = config.logging_config();
        assert_eq!(logging.level, "trace");
        assert_eq!(logging.directory, PathBuf::from("/var/log/proxalarm"));
    }
}
