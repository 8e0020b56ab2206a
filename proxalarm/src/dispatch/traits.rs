//! Alert dispatch interface and request type.

use std::time::Duration;

use thiserror::Error;

use crate::alarm::{AlertPreferences, SoundId, VibrationPattern};
use crate::store::BoxFuture;

/// Title used for arrival alerts.
pub const ARRIVAL_TITLE: &str = "Arrived!";

/// Errors that can occur while handing an alert to the platform.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The notification service refused the request.
    #[error("Notification rejected: {0}")]
    Rejected(String),

    /// The notification service did not accept the request in time.
    #[error("Notification dispatch timed out after {0:?}")]
    Timeout(Duration),

    /// A notification channel could not be registered.
    #[error("Failed to register notification channel '{channel}': {reason}")]
    ChannelSetup { channel: String, reason: String },
}

/// Everything needed to raise one alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRequest {
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
    /// Sound to play.
    pub sound: SoundId,
    /// Vibration pattern.
    pub vibration: VibrationPattern,
    /// Pulse length for [`VibrationPattern::Custom`].
    pub custom_vibration_ms: u64,
}

impl AlertRequest {
    /// Build the standard "arrived" alert for a trigger at `distance_meters`.
    pub fn arrival(distance_meters: f64, preferences: &AlertPreferences) -> Self {
        Self {
            title: ARRIVAL_TITLE.to_string(),
            body: format!(
                "You are within {}m of your destination!",
                distance_meters.round()
            ),
            sound: preferences.sound,
            vibration: preferences.vibration,
            custom_vibration_ms: preferences.custom_vibration_ms,
        }
    }

    /// Concrete vibration timings for this alert.
    pub fn vibration_timings(&self) -> Vec<u64> {
        self.vibration.timings(self.custom_vibration_ms)
    }
}

/// Turns a trigger decision into a user-visible notification.
///
/// Implementations return once the platform has accepted the request, not
/// once the user has seen it. Calling at most once per trigger is the
/// engine's responsibility.
pub trait AlertDispatcher: Send + Sync {
    /// Enqueue one alert.
    fn dispatch(&self, alert: AlertRequest) -> BoxFuture<'_, Result<(), DispatchError>>;
}
