//! Alarm configuration and its validation.

use thiserror::Error;

use super::preferences::AlertPreferences;
use crate::coord::{CoordError, Coordinate};

/// Reasons an alarm configuration is rejected before arming.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Radius is zero, negative, or not finite.
    #[error("Invalid alarm radius: {0} (must be a positive number of meters)")]
    InvalidRadius(f64),

    /// No destination was chosen.
    #[error("No destination selected")]
    MissingTarget,

    /// Destination coordinates are out of range.
    #[error("Invalid destination: {0}")]
    InvalidTarget(#[from] CoordError),
}

/// An armed geofence: where to alert, how close, and how loudly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlarmConfig {
    /// Destination.
    pub target: Coordinate,
    /// Alert radius in meters. Entering at exactly this distance triggers.
    pub radius_meters: f64,
    /// Sound and vibration for the alert.
    pub preferences: AlertPreferences,
}

impl AlarmConfig {
    /// Create a config with default preferences.
    ///
    /// The result is not validated; [`AlarmConfig::validate`] runs when the
    /// config is armed.
    pub fn new(target: Coordinate, radius_meters: f64) -> Self {
        Self {
            target,
            radius_meters,
            preferences: AlertPreferences::default(),
        }
    }

    /// Start building a config from optional parts.
    pub fn builder() -> AlarmConfigBuilder {
        AlarmConfigBuilder::default()
    }

    /// Replace the alert preferences.
    pub fn with_preferences(mut self, preferences: AlertPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Check that the config can be armed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Written so NaN fails too
        if !(self.radius_meters > 0.0 && self.radius_meters.is_finite()) {
            return Err(ConfigError::InvalidRadius(self.radius_meters));
        }
        self.target.validate()?;
        Ok(())
    }
}

/// Builder for [`AlarmConfig`] when the target may not be chosen yet.
///
/// # Example
///
/// ```
/// use proxalarm::alarm::{AlarmConfig, ConfigError};
/// use proxalarm::coord::Coordinate;
///
/// let missing = AlarmConfig::builder().radius_meters(500.0).build();
/// assert_eq!(missing, Err(ConfigError::MissingTarget));
///
/// let config = AlarmConfig::builder()
///     .target(Coordinate::new(48.8566, 2.3522).unwrap())
///     .radius_meters(500.0)
///     .build()
///     .unwrap();
/// assert_eq!(config.radius_meters, 500.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AlarmConfigBuilder {
    target: Option<Coordinate>,
    radius_meters: Option<f64>,
    preferences: AlertPreferences,
}

impl AlarmConfigBuilder {
    /// Set the destination.
    pub fn target(mut self, target: Coordinate) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the radius in meters.
    pub fn radius_meters(mut self, radius: f64) -> Self {
        self.radius_meters = Some(radius);
        self
    }

    /// Set the alert preferences.
    pub fn preferences(mut self, preferences: AlertPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Build and validate the config.
    pub fn build(self) -> Result<AlarmConfig, ConfigError> {
        let target = self.target.ok_or(ConfigError::MissingTarget)?;
        let radius = self.radius_meters.unwrap_or(f64::NAN);
        let config = AlarmConfig {
            target,
            radius_meters: radius,
            preferences: self.preferences,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> Coordinate {
        Coordinate::new(0.0, 0.0).unwrap()
    }

    #[test]
    fn test_positive_radius_is_valid() {
        assert!(AlarmConfig::new(target(), 0.5).validate().is_ok());
    }

    #[test]
    fn test_zero_and_negative_radius_rejected() {
        assert_eq!(
            AlarmConfig::new(target(), 0.0).validate(),
            Err(ConfigError::InvalidRadius(0.0))
        );
        assert_eq!(
            AlarmConfig::new(target(), -10.0).validate(),
            Err(ConfigError::InvalidRadius(-10.0))
        );
    }

    #[test]
    fn test_non_finite_radius_rejected() {
        assert!(AlarmConfig::new(target(), f64::NAN).validate().is_err());
        assert!(AlarmConfig::new(target(), f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_unchecked_target_is_validated() {
        let config = AlarmConfig::new(Coordinate::new_unchecked(95.0, 0.0), 100.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTarget(CoordError::InvalidLatitude(_)))
        ));
    }

    #[test]
    fn test_builder_requires_radius() {
        let result = AlarmConfig::builder().target(target()).build();
        assert!(matches!(result, Err(ConfigError::InvalidRadius(_))));
    }
}
