//! Proximity State Machine
//!
//! Decides, exactly once per arming, when the device has entered the alarm
//! radius around the target.
//!
//! # Architecture
//!
//! ```text
//!                ┌──────────────────────┐
//!  arm/disarm ──►│   ProximityEngine    │──► AlertDispatcher (once)
//!                │ Idle / Armed / Trig. │
//!  samples ─────►│ cached AlarmConfig   │◄──► AlarmStore (durable truth)
//!                └──────────────────────┘
//!                   ▲               ▲
//!   ForegroundTracker (long-lived)  evaluate_background (fresh per call)
//! ```
//!
//! The engine only caches what the store says. Any instance that cannot
//! prove continuity with an earlier one recovers from the store before
//! deciding anything.

mod background;
mod error;
mod machine;
mod observation;
mod tracker;

#[cfg(test)]
mod test_support;

pub use background::{evaluate_background, evaluate_background_with_timeout};
pub use error::EngineError;
pub use machine::{ProximityEngine, DEFAULT_OPERATION_TIMEOUT};
pub use observation::{IgnoreReason, Observation, TriggerReport};
pub use tracker::{ForegroundTracker, TrackingHandle, TrackingOutcome, TrackingStatus};
