//! Outcomes of evaluating a position sample.

use crate::dispatch::{AlertRequest, DispatchError};
use crate::store::StoreError;

/// Why a sample produced no decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No alarm is armed.
    NotArmed,
    /// A newer sample has already been evaluated.
    Stale {
        /// Timestamp of the ignored sample.
        timestamp_ms: i64,
        /// Newest timestamp evaluated so far.
        newest_ms: i64,
    },
    /// A background batch contained no samples.
    EmptyBatch,
}

/// What happened when the radius was entered.
#[derive(Debug)]
pub struct TriggerReport {
    /// Distance to the target at the triggering sample.
    pub distance_meters: f64,
    /// The alert that was handed to the dispatcher.
    pub alert: AlertRequest,
    /// Dispatcher result. A failure here still disarms.
    pub dispatch: Result<(), DispatchError>,
    /// Result of persisting the disarm. A failure leaves a stale armed flag.
    pub disarm: Result<(), StoreError>,
}

impl TriggerReport {
    /// Whether the alert was accepted and the disarm persisted.
    pub fn is_clean(&self) -> bool {
        self.dispatch.is_ok() && self.disarm.is_ok()
    }
}

/// Result of [`ProximityEngine::observe`](super::ProximityEngine::observe).
#[derive(Debug)]
pub enum Observation {
    /// The sample was not evaluated.
    Ignored(IgnoreReason),
    /// Still outside the radius.
    Outside {
        /// Distance to the target.
        distance_meters: f64,
        /// Configured radius.
        radius_meters: f64,
    },
    /// The radius was entered and an alert was raised.
    Triggered(TriggerReport),
    /// The radius was entered but the store no longer reports the alarm as
    /// armed (disarmed or already triggered elsewhere); no alert was raised.
    Cancelled {
        /// Distance to the target.
        distance_meters: f64,
    },
}

impl Observation {
    /// Whether this observation raised an alert.
    pub fn is_triggered(&self) -> bool {
        matches!(self, Observation::Triggered(_))
    }

    /// Distance computed for the sample, if it was evaluated.
    pub fn distance_meters(&self) -> Option<f64> {
        match self {
            Observation::Ignored(_) => None,
            Observation::Outside {
                distance_meters, ..
            }
            | Observation::Cancelled { distance_meters } => Some(*distance_meters),
            Observation::Triggered(report) => Some(report.distance_meters),
        }
    }
}
