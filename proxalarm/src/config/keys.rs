//! Typed access to configuration keys by `section.key` name.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::file::{ConfigFile, ConfigFileError};

/// Every settable configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    StoragePath,
    AlarmDefaultRadius,
    ForegroundIntervalMs,
    ForegroundDistanceM,
    BackgroundIntervalMs,
    BackgroundDistanceM,
    EngineTimeoutMs,
    LoggingLevel,
    LoggingDirectory,
}

const ALL_KEYS: &[ConfigKey] = &[
    ConfigKey::StoragePath,
    ConfigKey::AlarmDefaultRadius,
    ConfigKey::ForegroundIntervalMs,
    ConfigKey::ForegroundDistanceM,
    ConfigKey::BackgroundIntervalMs,
    ConfigKey::BackgroundDistanceM,
    ConfigKey::EngineTimeoutMs,
    ConfigKey::LoggingLevel,
    ConfigKey::LoggingDirectory,
];

impl ConfigKey {
    /// All keys, grouped by section.
    pub fn all() -> &'static [ConfigKey] {
        ALL_KEYS
    }

    /// INI section name.
    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::StoragePath => "storage",
            ConfigKey::AlarmDefaultRadius => "alarm",
            ConfigKey::ForegroundIntervalMs | ConfigKey::ForegroundDistanceM => "foreground",
            ConfigKey::BackgroundIntervalMs | ConfigKey::BackgroundDistanceM => "background",
            ConfigKey::EngineTimeoutMs => "engine",
            ConfigKey::LoggingLevel | ConfigKey::LoggingDirectory => "logging",
        }
    }

    /// Key name within the section.
    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::StoragePath => "path",
            ConfigKey::AlarmDefaultRadius => "default_radius",
            ConfigKey::ForegroundIntervalMs | ConfigKey::BackgroundIntervalMs => "interval_ms",
            ConfigKey::ForegroundDistanceM | ConfigKey::BackgroundDistanceM => "distance_m",
            ConfigKey::EngineTimeoutMs => "timeout_ms",
            ConfigKey::LoggingLevel => "level",
            ConfigKey::LoggingDirectory => "directory",
        }
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Current value as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::StoragePath => config.storage.path.display().to_string(),
            ConfigKey::AlarmDefaultRadius => config.alarm.default_radius.to_string(),
            ConfigKey::ForegroundIntervalMs => config.foreground.min_interval_ms.to_string(),
            ConfigKey::ForegroundDistanceM => config.foreground.min_distance_meters.to_string(),
            ConfigKey::BackgroundIntervalMs => config.background.min_interval_ms.to_string(),
            ConfigKey::BackgroundDistanceM => config.background.min_distance_meters.to_string(),
            ConfigKey::EngineTimeoutMs => config.engine.timeout_ms.to_string(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
            ConfigKey::LoggingDirectory => config.logging.directory.display().to_string(),
        }
    }

    /// Validate and store `value`.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigFileError> {
        match self {
            ConfigKey::StoragePath => config.storage.path = self.parse_path(value)?,
            ConfigKey::AlarmDefaultRadius => config.alarm.default_radius = self.parse_positive(value)?,
            ConfigKey::ForegroundIntervalMs => {
                config.foreground.min_interval_ms = self.parse_u64(value)?
            }
            ConfigKey::ForegroundDistanceM => {
                config.foreground.min_distance_meters = self.parse_non_negative(value)?
            }
            ConfigKey::BackgroundIntervalMs => {
                config.background.min_interval_ms = self.parse_u64(value)?
            }
            ConfigKey::BackgroundDistanceM => {
                config.background.min_distance_meters = self.parse_non_negative(value)?
            }
            ConfigKey::EngineTimeoutMs => {
                let ms = self.parse_u64(value)?;
                if ms == 0 {
                    return Err(self.invalid(value, "must be greater than zero"));
                }
                config.engine.timeout_ms = ms;
            }
            ConfigKey::LoggingLevel => {
                if value.trim().is_empty() {
                    return Err(self.invalid(value, "must not be empty"));
                }
                config.logging.level = value.trim().to_string();
            }
            ConfigKey::LoggingDirectory => config.logging.directory = self.parse_path(value)?,
        }
        Ok(())
    }

    fn invalid(&self, value: &str, reason: impl Into<String>) -> ConfigFileError {
        ConfigFileError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    fn parse_u64(&self, value: &str) -> Result<u64, ConfigFileError> {
        value
            .trim()
            .parse()
            .map_err(|_| self.invalid(value, "expected a whole number"))
    }

    fn parse_f64(&self, value: &str) -> Result<f64, ConfigFileError> {
        let parsed: f64 = value
            .trim()
            .parse()
            .map_err(|_| self.invalid(value, "expected a number"))?;
        if !parsed.is_finite() {
            return Err(self.invalid(value, "must be finite"));
        }
        Ok(parsed)
    }

    fn parse_positive(&self, value: &str) -> Result<f64, ConfigFileError> {
        let parsed = self.parse_f64(value)?;
        if parsed <= 0.0 {
            return Err(self.invalid(value, "must be greater than zero"));
        }
        Ok(parsed)
    }

    fn parse_non_negative(&self, value: &str) -> Result<f64, ConfigFileError> {
        let parsed = self.parse_f64(value)?;
        if parsed < 0.0 {
            return Err(self.invalid(value, "must not be negative"));
        }
        Ok(parsed)
    }

    fn parse_path(&self, value: &str) -> Result<PathBuf, ConfigFileError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(self.invalid(value, "must not be empty"));
        }
        Ok(expand_tilde(trimmed))
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.key_name())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ALL_KEYS
            .iter()
            .copied()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| ConfigFileError::UnknownKey(s.to_string()))
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_tilde(value: &str) -> PathBuf {
    match value.strip_prefix("~/") {
        Some(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(value),
        },
        None => PathBuf::from(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_names() {
        assert_eq!(
            "alarm.default_radius".parse::<ConfigKey>().unwrap(),
            ConfigKey::AlarmDefaultRadius
        );
        assert_eq!(
            "Background.Interval_MS".parse::<ConfigKey>().unwrap(),
            ConfigKey::BackgroundIntervalMs
        );
        assert!(matches!(
            "alarm.sound".parse::<ConfigKey>(),
            Err(ConfigFileError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<String> = ConfigKey::all().iter().map(|k| k.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ConfigKey::all().len());
    }

    #[test]
    fn test_get_set_radius() {
        let mut config = ConfigFile::default();
        ConfigKey::AlarmDefaultRadius.set(&mut config, "750").unwrap();
        assert_eq!(ConfigKey::AlarmDefaultRadius.get(&config), "750");
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let mut config = ConfigFile::default();
        for bad in ["0", "-5", "NaN", "inf", "far"] {
            assert!(
                ConfigKey::AlarmDefaultRadius.set(&mut config, bad).is_err(),
                "accepted {}",
                bad
            );
        }
        assert_eq!(config.alarm.default_radius, 500.0);
    }

    #[test]
    fn test_zero_distance_threshold_allowed() {
        let mut config = ConfigFile::default();
        ConfigKey::ForegroundDistanceM.set(&mut config, "0").unwrap();
        assert_eq!(config.foreground.min_distance_meters, 0.0);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = ConfigFile::default();
        assert!(ConfigKey::EngineTimeoutMs.set(&mut config, "0").is_err());
    }

    #[test]
    fn test_tilde_expansion() {
        let mut config = ConfigFile::default();
        ConfigKey::StoragePath
            .set(&mut config, "~/alarm/state.json")
            .unwrap();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.storage.path, home.join("alarm/state.json"));
        }
    }
}
