//! Foreground tracking task.
//!
//! Runs an engine against a live subscription on the tokio runtime and
//! publishes a [`TrackingStatus`] after every sample so a UI can show the
//! distance readout.
//!
//! ```text
//! PositionSource ──mpsc──► ProximityEngine::run ──watch──► TrackingHandle::status
//!        ▲                                                      │
//!        └────────────── CancellationToken ◄──── detach()/stop() ┘
//! ```

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::error::EngineError;
use super::machine::ProximityEngine;
use super::observation::TriggerReport;
use crate::alarm::ArmingState;
use crate::position::Subscription;

/// Snapshot published after each foreground sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackingStatus {
    /// Engine state after the sample.
    pub state: ArmingState,
    /// Distance to the target, once a sample has been evaluated.
    pub distance_meters: Option<f64>,
    /// Samples received from the subscription.
    pub samples_seen: u64,
}

/// How a foreground tracking run ended.
#[derive(Debug)]
pub enum TrackingOutcome {
    /// The radius was entered and the alarm fired.
    Triggered(TriggerReport),
    /// The alarm was disarmed (here or in another context) before arrival.
    Disarmed {
        /// Distance at the sample that revealed the disarm, if evaluated.
        distance_meters: Option<f64>,
    },
    /// No alarm was armed when tracking started.
    NotArmed,
    /// The subscription was cancelled; the alarm stays armed.
    Detached,
    /// The position source ran out of samples; the alarm stays armed.
    SourceClosed,
}

/// Spawns foreground tracking tasks.
pub struct ForegroundTracker;

impl ForegroundTracker {
    /// Start draining `subscription` into `engine` on the current runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn(mut engine: ProximityEngine, mut subscription: Subscription) -> TrackingHandle {
        let cancel = subscription.cancellation_token();
        let (status_tx, status_rx) = watch::channel(TrackingStatus {
            state: engine.state(),
            distance_meters: engine.last_distance_meters(),
            samples_seen: 0,
        });

        let task = tokio::spawn(async move {
            let outcome = engine
                .run_with_status(&mut subscription, Some(&status_tx))
                .await;
            (engine, outcome)
        });

        TrackingHandle {
            cancel,
            status: status_rx,
            task,
        }
    }
}

/// Handle to a running foreground tracking task.
pub struct TrackingHandle {
    cancel: CancellationToken,
    status: watch::Receiver<TrackingStatus>,
    task: JoinHandle<(ProximityEngine, TrackingOutcome)>,
}

impl std::fmt::Debug for TrackingHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackingHandle")
            .field("status", &*self.status.borrow())
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl TrackingHandle {
    /// Latest published status.
    pub fn status(&self) -> TrackingStatus {
        *self.status.borrow()
    }

    /// A receiver that is notified on every status change.
    pub fn subscribe_status(&self) -> watch::Receiver<TrackingStatus> {
        self.status.clone()
    }

    /// Token that stops the subscription when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Whether the task has finished.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the run to end on its own.
    pub async fn wait(self) -> Result<TrackingOutcome, EngineError> {
        self.join().await.map(|(_, outcome)| outcome)
    }

    /// Stop tracking but leave the alarm armed, e.g. when the app moves to
    /// the background and the platform takes over delivery.
    pub async fn detach(self) -> Result<TrackingOutcome, EngineError> {
        self.cancel.cancel();
        let outcome = self.wait().await?;
        info!("Foreground tracking detached");
        Ok(outcome)
    }

    /// Stop tracking and disarm the alarm.
    pub async fn stop(self) -> Result<TrackingOutcome, EngineError> {
        self.cancel.cancel();
        let (mut engine, outcome) = self.join().await?;
        if matches!(outcome, TrackingOutcome::Detached | TrackingOutcome::SourceClosed) {
            engine.disarm().await?;
            return Ok(TrackingOutcome::Disarmed {
                distance_meters: None,
            });
        }
        Ok(outcome)
    }

    async fn join(self) -> Result<(ProximityEngine, TrackingOutcome), EngineError> {
        self.task
            .await
            .map_err(|e| EngineError::Task(e.to_string()))
    }
}
