//! Position Source Adapter
//!
//! The engine consumes positions through two contracts:
//!
//! - **Foreground**: [`PositionSource::subscribe`] returns a [`Subscription`],
//!   a single-consumer channel the engine drains while the app is open.
//! - **Background**: the platform re-invokes a fixed entry point with a batch
//!   of samples and no process continuity. See
//!   [`crate::engine::evaluate_background`].
//!
//! [`ReplaySource`] implements the foreground contract from a recorded track.

mod replay;
mod sample;
mod source;

pub use replay::{load_track, ReplaySource};
pub use sample::{latest, PositionSample};
pub use source::{
    PositionError, PositionSource, SampleFilter, Subscription, SubscriptionOptions,
    BACKGROUND_DISTANCE_M, BACKGROUND_INTERVAL_MS, FOREGROUND_DISTANCE_M, FOREGROUND_INTERVAL_MS,
};
