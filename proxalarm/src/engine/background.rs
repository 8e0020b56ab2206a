//! Background entry point.
//!
//! The platform re-invokes the app with a batch of samples and no memory of
//! earlier invocations. Each call here is a pure function of the persisted
//! state and the batch: build a fresh engine, recover from the store, and
//! evaluate the newest sample.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::machine::ProximityEngine;
use super::observation::{IgnoreReason, Observation};
use crate::dispatch::AlertDispatcher;
use crate::position::{latest, PositionSample};
use crate::store::AlarmStore;

/// Evaluate one background batch.
///
/// Only the most recent sample is considered; earlier samples in the batch
/// describe positions the device has already left.
pub async fn evaluate_background(
    store: AlarmStore,
    dispatcher: Arc<dyn AlertDispatcher>,
    batch: &[PositionSample],
) -> Observation {
    evaluate_with(ProximityEngine::new(store, dispatcher), batch).await
}

/// [`evaluate_background`] with every store and dispatch call bounded by
/// `timeout`.
pub async fn evaluate_background_with_timeout(
    store: AlarmStore,
    dispatcher: Arc<dyn AlertDispatcher>,
    batch: &[PositionSample],
    timeout: Duration,
) -> Observation {
    let engine = ProximityEngine::new(store, dispatcher).with_operation_timeout(timeout);
    evaluate_with(engine, batch).await
}

async fn evaluate_with(mut engine: ProximityEngine, batch: &[PositionSample]) -> Observation {
    let Some(sample) = latest(batch) else {
        debug!("Background invocation with empty batch");
        return Observation::Ignored(IgnoreReason::EmptyBatch);
    };

    debug!(
        batch_len = batch.len(),
        timestamp_ms = sample.timestamp_ms,
        "Background invocation"
    );
    engine.observe(*sample).await
}
