//! Coordinate value type and validation errors.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum valid latitude in degrees.
pub const MIN_LAT: f64 = -90.0;
/// Maximum valid latitude in degrees.
pub const MAX_LAT: f64 = 90.0;
/// Minimum valid longitude in degrees.
pub const MIN_LON: f64 = -180.0;
/// Maximum valid longitude in degrees.
pub const MAX_LON: f64 = 180.0;

/// Errors produced when constructing a [`Coordinate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Latitude outside [-90, 90] or not a number.
    #[error("Invalid latitude: {0} (must be between -90 and 90)")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180] or not a number.
    #[error("Invalid longitude: {0} (must be between -180 and 180)")]
    InvalidLongitude(f64),
}

/// A point on the Earth's surface in decimal degrees.
///
/// Serializes as `{"latitude": .., "longitude": ..}`, which is also the
/// persisted form of the alarm target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Create a validated coordinate.
    ///
    /// # Errors
    ///
    /// Returns `CoordError` if either component is out of range or NaN.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordError> {
        let coord = Self {
            latitude,
            longitude,
        };
        coord.validate()?;
        Ok(coord)
    }

    /// Create a coordinate without range checks.
    ///
    /// Geodesy accepts any input, so this exists for callers that handle
    /// validation elsewhere (or to exercise NaN behaviour).
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude in degrees.
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Check both components against their valid ranges.
    ///
    /// Deserialized coordinates bypass [`Coordinate::new`], so readers of
    /// persisted data call this explicitly.
    pub fn validate(&self) -> Result<(), CoordError> {
        if !(MIN_LAT..=MAX_LAT).contains(&self.latitude) {
            return Err(CoordError::InvalidLatitude(self.latitude));
        }
        if !(MIN_LON..=MAX_LON).contains(&self.longitude) {
            return Err(CoordError::InvalidLongitude(self.longitude));
        }
        Ok(())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}
