//! Position source contract and subscriptions.
//!
//! A subscription is a single-consumer channel of samples plus a
//! cancellation token. Cancelling the token (or dropping the subscription)
//! tells the producer to stop, which closes the channel; the consumer's
//! only suspension point is [`Subscription::next`].

use std::path::PathBuf;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::sample::PositionSample;
use crate::coord::distance_meters;

/// Foreground update interval (interactive map tracking).
pub const FOREGROUND_INTERVAL_MS: u64 = 2_000;
/// Foreground minimum displacement.
pub const FOREGROUND_DISTANCE_M: f64 = 5.0;
/// Background update interval (platform-scheduled).
pub const BACKGROUND_INTERVAL_MS: u64 = 5_000;
/// Background minimum displacement.
pub const BACKGROUND_DISTANCE_M: f64 = 10.0;

/// Errors raised by position sources.
#[derive(Debug, Error)]
pub enum PositionError {
    /// The source cannot start delivering samples.
    #[error("Position source unavailable: {0}")]
    Unavailable(String),

    /// A track file could not be read.
    #[error("Failed to read track {path}: {source}")]
    TrackRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A track file could not be parsed.
    #[error("Failed to parse track {path}: {reason}")]
    TrackParse { path: PathBuf, reason: String },
}

/// Delivery thresholds requested from a position source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubscriptionOptions {
    /// Minimum time between delivered samples.
    pub min_interval_ms: u64,
    /// Minimum displacement between delivered samples.
    pub min_distance_meters: f64,
}

impl SubscriptionOptions {
    /// Thresholds for interactive foreground tracking.
    pub fn foreground() -> Self {
        Self {
            min_interval_ms: FOREGROUND_INTERVAL_MS,
            min_distance_meters: FOREGROUND_DISTANCE_M,
        }
    }

    /// Thresholds for platform-scheduled background updates.
    pub fn background() -> Self {
        Self {
            min_interval_ms: BACKGROUND_INTERVAL_MS,
            min_distance_meters: BACKGROUND_DISTANCE_M,
        }
    }

    /// Deliver every sample.
    pub fn unfiltered() -> Self {
        Self {
            min_interval_ms: 0,
            min_distance_meters: 0.0,
        }
    }
}

/// Applies [`SubscriptionOptions`] thresholds to a sample sequence.
///
/// The first sample always passes. Later samples pass only when both the
/// interval and the displacement since the last delivered sample meet the
/// thresholds.
#[derive(Debug, Clone)]
pub struct SampleFilter {
    options: SubscriptionOptions,
    last: Option<PositionSample>,
}

impl SampleFilter {
    /// Create a filter for the given thresholds.
    pub fn new(options: SubscriptionOptions) -> Self {
        Self {
            options,
            last: None,
        }
    }

    /// Whether `sample` should be delivered. Accepted samples become the
    /// new reference point.
    pub fn accept(&mut self, sample: &PositionSample) -> bool {
        let pass = match &self.last {
            None => true,
            Some(last) => {
                let elapsed = sample.timestamp_ms.saturating_sub(last.timestamp_ms);
                let moved = distance_meters(&last.coord, &sample.coord);
                elapsed >= self.options.min_interval_ms as i64
                    && moved >= self.options.min_distance_meters
            }
        };
        if pass {
            self.last = Some(*sample);
        }
        pass
    }
}

/// Receiving end of a position subscription.
#[derive(Debug)]
pub struct Subscription {
    receiver: mpsc::Receiver<PositionSample>,
    cancel: CancellationToken,
}

impl Subscription {
    /// Wrap a receiver and the token its producer watches.
    pub fn new(receiver: mpsc::Receiver<PositionSample>, cancel: CancellationToken) -> Self {
        Self { receiver, cancel }
    }

    /// Wait for the next sample.
    ///
    /// Returns `None` once the subscription is cancelled or the producer has
    /// closed the channel. Samples already queued when cancellation happens
    /// are discarded.
    pub async fn next(&mut self) -> Option<PositionSample> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                self.receiver.close();
                None
            }
            sample = self.receiver.recv() => sample,
        }
    }

    /// Stop delivery.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether delivery has been stopped.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Token that cancels this subscription, for handing to other tasks.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// A supplier of live position samples.
pub trait PositionSource: Send + Sync {
    /// Start delivering samples that satisfy `options`.
    ///
    /// Must be called from within a Tokio runtime.
    fn subscribe(&self, options: SubscriptionOptions) -> Result<Subscription, PositionError>;
}
