//! Arming lifecycle state.

use std::fmt;

/// Lifecycle of a single alarm.
///
/// ```text
/// Idle --arm--> Armed --in radius--> Triggered --disarm persisted--> Idle
///                 │
///                 └--disarm--> Idle
/// ```
///
/// `Triggered` is momentary: the engine folds it into `Idle` as soon as the
/// post-alert disarm has been attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArmingState {
    /// No active alarm.
    #[default]
    Idle,
    /// Evaluating incoming positions against the geofence.
    Armed,
    /// Alert dispatched for the current arming.
    Triggered,
}

impl ArmingState {
    /// User-facing label.
    pub fn display_status(&self) -> &'static str {
        match self {
            ArmingState::Idle => "Idle",
            ArmingState::Armed => "Armed",
            ArmingState::Triggered => "Arrived",
        }
    }

    /// Whether positions are currently being evaluated.
    pub fn is_armed(&self) -> bool {
        matches!(self, ArmingState::Armed)
    }
}

impl fmt::Display for ArmingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_status())
    }
}
