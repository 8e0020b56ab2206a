//! Position samples delivered by a location source.

use serde::{Deserialize, Serialize};

use crate::coord::Coordinate;

/// A single position fix.
///
/// Samples are ephemeral: only the alarm state derived from them is
/// persisted. The serialized form is what track files contain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    /// Reported position.
    pub coord: Coordinate,
    /// Fix time in milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
    /// Horizontal accuracy radius in meters, when the platform reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy_meters: Option<f64>,
}

impl PositionSample {
    /// Create a sample with an explicit timestamp.
    pub fn new(coord: Coordinate, timestamp_ms: i64) -> Self {
        Self {
            coord,
            timestamp_ms,
            accuracy_meters: None,
        }
    }

    /// Create a sample stamped with the current wall-clock time.
    pub fn now(coord: Coordinate) -> Self {
        Self::new(coord, chrono::Utc::now().timestamp_millis())
    }

    /// Attach an accuracy estimate.
    pub fn with_accuracy(mut self, accuracy_meters: f64) -> Self {
        self.accuracy_meters = Some(accuracy_meters);
        self
    }
}

/// The most recent sample of a batch by timestamp.
///
/// Platforms deliver background fixes in batches with no ordering promise.
/// Ties go to the later element.
pub fn latest(batch: &[PositionSample]) -> Option<&PositionSample> {
    batch.iter().max_by_key(|s| s.timestamp_ms)
}
