//! The proximity state machine.
//!
//! # State Machine
//!
//! ```text
//! Idle --arm(config)--> Armed                       (save_arming must succeed)
//! Armed --observe(d > radius)--> Armed              (update last distance)
//! Armed --observe(d <= radius)--> Triggered --> Idle (dispatch once, then clear_arming)
//! Armed --disarm()--> Idle                          (clear_arming)
//! ```
//!
//! # Recovery
//!
//! A new engine instance knows nothing about earlier process lifetimes. The
//! first operation on it loads the persisted arming, so an engine built
//! inside a background invocation resumes `Armed` when the store says so.
//!
//! # Races
//!
//! A foreground engine and a background invocation may evaluate the same
//! arming concurrently. Before dispatching, the engine re-reads the armed
//! flag, which closes most of the window; two contexts that both pass the
//! re-check before either clears the flag will both alert. That single
//! duplicate is accepted, since the store offers no cross-process lock.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::error::EngineError;
use super::observation::{IgnoreReason, Observation, TriggerReport};
use super::tracker::{TrackingOutcome, TrackingStatus};
use crate::alarm::{AlarmConfig, ArmingState};
use crate::coord::distance_meters;
use crate::dispatch::{AlertDispatcher, AlertRequest, DispatchError};
use crate::position::{PositionSample, Subscription};
use crate::store::AlarmStore;

/// Default bound on any single store or dispatch call.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Proximity alarm engine.
///
/// Owns a cached view of the persisted alarm and decides when a sample
/// enters the radius. Store and dispatcher are injected so tests can use
/// in-memory fakes.
///
/// # Example
///
/// ```ignore
/// use proxalarm::engine::ProximityEngine;
///
/// let mut engine = ProximityEngine::new(store, dispatcher);
/// engine.arm(config).await?;
///
/// let observation = engine.observe(sample).await;
/// if observation.is_triggered() {
///     println!("Arrived!");
/// }
/// ```
pub struct ProximityEngine {
    store: AlarmStore,
    dispatcher: Arc<dyn AlertDispatcher>,
    dispatch_timeout: Option<Duration>,
    state: ArmingState,
    config: Option<AlarmConfig>,
    last_distance: Option<f64>,
    newest_timestamp: Option<i64>,
    recovered: bool,
}

impl std::fmt::Debug for ProximityEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProximityEngine")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("last_distance", &self.last_distance)
            .field("newest_timestamp", &self.newest_timestamp)
            .field("recovered", &self.recovered)
            .finish_non_exhaustive()
    }
}

impl ProximityEngine {
    /// Create an engine. No storage is touched until the first operation.
    pub fn new(store: AlarmStore, dispatcher: Arc<dyn AlertDispatcher>) -> Self {
        Self {
            store,
            dispatcher,
            dispatch_timeout: None,
            state: ArmingState::Idle,
            config: None,
            last_distance: None,
            newest_timestamp: None,
            recovered: false,
        }
    }

    /// Bound every store and dispatch call by `timeout`.
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.store = self.store.with_timeout(timeout);
        self.dispatch_timeout = Some(timeout);
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ArmingState {
        self.state
    }

    /// The armed configuration, if any.
    pub fn config(&self) -> Option<&AlarmConfig> {
        self.config.as_ref()
    }

    /// Distance computed from the most recent evaluated sample.
    pub fn last_distance_meters(&self) -> Option<f64> {
        self.last_distance
    }

    /// Whether persisted state has been loaded (or superseded) yet.
    pub fn is_recovered(&self) -> bool {
        self.recovered
    }

    /// Load persisted state if this instance has not done so yet.
    ///
    /// A read failure is treated as "not armed".
    pub async fn recover(&mut self) -> ArmingState {
        if self.recovered {
            return self.state;
        }
        self.recovered = true;

        match self.store.load_arming().await {
            Ok(Some(config)) => {
                info!(
                    target = %config.target,
                    radius_m = config.radius_meters,
                    "Resumed armed alarm from store"
                );
                self.state = ArmingState::Armed;
                self.config = Some(config);
            }
            Ok(None) => {
                debug!("No armed alarm in store");
                self.fold_to_idle();
            }
            Err(e) => {
                warn!(error = %e, "Failed to load alarm state, assuming not armed");
                self.fold_to_idle();
            }
        }
        self.state
    }

    /// Arm the alarm.
    ///
    /// Replaces any existing arming once the new one is persisted.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Config`] if the config is invalid; nothing is written
    /// - [`EngineError::Store`] if the write failed; the previous state is kept
    pub async fn arm(&mut self, config: AlarmConfig) -> Result<(), EngineError> {
        config.validate()?;

        if let Err(e) = self.store.save_arming(&config).await {
            error!(error = %e, "Failed to persist arming");
            return Err(e.into());
        }

        self.recovered = true;
        self.state = ArmingState::Armed;
        self.config = Some(config);
        self.last_distance = None;

        info!(
            target = %config.target,
            radius_m = config.radius_meters,
            sound = %config.preferences.sound,
            vibration = %config.preferences.vibration,
            "Alarm armed"
        );
        Ok(())
    }

    /// Disarm the alarm without alerting.
    ///
    /// Idempotent: disarming while idle still clears the persisted flag, so
    /// a stale flag left by a failed post-trigger write can be removed.
    ///
    /// # Errors
    ///
    /// [`EngineError::Store`] if the flag could not be cleared; the in-memory
    /// state is left unchanged so the caller can retry.
    pub async fn disarm(&mut self) -> Result<(), EngineError> {
        if let Err(e) = self.store.clear_arming().await {
            error!(error = %e, "Failed to persist disarm");
            return Err(e.into());
        }

        self.recovered = true;
        let was = self.state;
        self.fold_to_idle();
        info!(previous = %was, "Alarm disarmed");
        Ok(())
    }

    /// Evaluate one position sample.
    ///
    /// Samples older than the newest one already evaluated are ignored.
    /// Entering the radius (inclusive) dispatches exactly one alert and then
    /// disarms; see [`TriggerReport`] for the failure cases.
    pub async fn observe(&mut self, sample: PositionSample) -> Observation {
        self.recover().await;

        let Some(config) = self.config.filter(|_| self.state.is_armed()) else {
            return Observation::Ignored(IgnoreReason::NotArmed);
        };

        if let Some(newest) = self.newest_timestamp {
            if sample.timestamp_ms < newest {
                debug!(
                    timestamp_ms = sample.timestamp_ms,
                    newest_ms = newest,
                    "Ignoring out-of-order sample"
                );
                return Observation::Ignored(IgnoreReason::Stale {
                    timestamp_ms: sample.timestamp_ms,
                    newest_ms: newest,
                });
            }
        }
        self.newest_timestamp = Some(sample.timestamp_ms);

        let distance = distance_meters(&sample.coord, &config.target);
        self.last_distance = Some(distance);

        // NaN distances fall through to "outside"
        if !(distance <= config.radius_meters) {
            debug!(
                distance_m = distance,
                radius_m = config.radius_meters,
                accuracy_m = ?sample.accuracy_meters,
                "Outside alarm radius"
            );
            return Observation::Outside {
                distance_meters: distance,
                radius_meters: config.radius_meters,
            };
        }

        self.trigger(config, distance).await
    }

    async fn trigger(&mut self, config: AlarmConfig, distance: f64) -> Observation {
        // Another context may have disarmed or already alerted
        match self.store.load_arming().await {
            Ok(Some(_)) => {}
            Ok(None) => {
                info!(
                    distance_m = distance,
                    "Radius entered but alarm no longer armed in store, not alerting"
                );
                self.fold_to_idle();
                return Observation::Cancelled {
                    distance_meters: distance,
                };
            }
            Err(e) => {
                warn!(
                    error = %e,
                    "Failed to re-check alarm state before alerting, assuming not armed"
                );
                self.fold_to_idle();
                return Observation::Cancelled {
                    distance_meters: distance,
                };
            }
        }

        self.state = ArmingState::Triggered;
        info!(
            distance_m = distance,
            radius_m = config.radius_meters,
            "Alarm radius entered"
        );

        let alert = AlertRequest::arrival(distance, &config.preferences);
        let dispatch = self.dispatch(alert.clone()).await;
        if let Err(e) = &dispatch {
            error!(error = %e, "Alert dispatch failed, disarming anyway");
        }

        let disarm = self.store.clear_arming().await;
        if let Err(e) = &disarm {
            error!(
                error = %e,
                "Failed to persist disarm after alert; armed flag may be stale until disarmed manually"
            );
        }

        self.fold_to_idle();

        Observation::Triggered(TriggerReport {
            distance_meters: distance,
            alert,
            dispatch,
            disarm,
        })
    }

    async fn dispatch(&self, alert: AlertRequest) -> Result<(), DispatchError> {
        let fut = self.dispatcher.dispatch(alert);
        match self.dispatch_timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| DispatchError::Timeout(limit))?,
            None => fut.await,
        }
    }

    fn fold_to_idle(&mut self) {
        self.state = ArmingState::Idle;
        self.config = None;
        self.last_distance = None;
    }

    /// Drain a foreground subscription until the alarm resolves.
    ///
    /// Returns when the radius is entered, the alarm turns out to be
    /// disarmed, or the subscription ends (cancelled or source exhausted).
    /// A cancelled subscription leaves the alarm armed.
    pub async fn run(&mut self, subscription: &mut Subscription) -> TrackingOutcome {
        self.run_with_status(subscription, None).await
    }

    /// [`ProximityEngine::run`], publishing a status after every sample.
    pub async fn run_with_status(
        &mut self,
        subscription: &mut Subscription,
        status: Option<&watch::Sender<TrackingStatus>>,
    ) -> TrackingOutcome {
        let mut samples_seen = 0u64;
        let publish = |engine: &Self, samples_seen: u64| {
            if let Some(tx) = status {
                tx.send_replace(TrackingStatus {
                    state: engine.state,
                    distance_meters: engine.last_distance,
                    samples_seen,
                });
            }
        };

        if !self.recover().await.is_armed() {
            publish(&*self, samples_seen);
            return TrackingOutcome::NotArmed;
        }
        publish(&*self, samples_seen);

        while let Some(sample) = subscription.next().await {
            samples_seen += 1;
            let observation = self.observe(sample).await;
            publish(&*self, samples_seen);

            match observation {
                Observation::Triggered(report) => {
                    subscription.cancel();
                    if let Some(tx) = status {
                        tx.send_modify(|s| {
                            s.state = ArmingState::Triggered;
                            s.distance_meters = Some(report.distance_meters);
                        });
                    }
                    return TrackingOutcome::Triggered(report);
                }
                Observation::Cancelled { distance_meters } => {
                    subscription.cancel();
                    return TrackingOutcome::Disarmed {
                        distance_meters: Some(distance_meters),
                    };
                }
                Observation::Ignored(IgnoreReason::NotArmed) => {
                    subscription.cancel();
                    return TrackingOutcome::Disarmed {
                        distance_meters: None,
                    };
                }
                Observation::Outside { .. } | Observation::Ignored(_) => {}
            }
        }

        if subscription.is_cancelled() {
            debug!(samples_seen, "Tracking detached, alarm left armed");
            TrackingOutcome::Detached
        } else {
            debug!(samples_seen, "Position subscription ended");
            TrackingOutcome::SourceClosed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::{AlertPreferences, SoundId, VibrationPattern};
    use crate::coord::Coordinate;
    use crate::engine::test_support::{CountingDispatcher, FlakyStore};
    use crate::position::{ReplaySource, PositionSource, SubscriptionOptions};
    use crate::store::KEY_ARMED;

    fn target() -> Coordinate {
        Coordinate::new(0.0, 0.0).unwrap()
    }

    fn config() -> AlarmConfig {
        AlarmConfig::new(target(), 1000.0)
    }

    fn sample(lat: f64, ts: i64) -> PositionSample {
        PositionSample::new(Coordinate::new(lat, 0.0).unwrap(), ts)
    }

    struct Harness {
        kv: Arc<FlakyStore>,
        dispatcher: Arc<CountingDispatcher>,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                kv: Arc::new(FlakyStore::new()),
                dispatcher: Arc::new(CountingDispatcher::new()),
            }
        }

        fn store(&self) -> AlarmStore {
            AlarmStore::new(self.kv.clone())
        }

        fn engine(&self) -> ProximityEngine {
            ProximityEngine::new(self.store(), self.dispatcher.clone())
        }
    }

    #[tokio::test]
    async fn test_new_engine_on_empty_store_is_idle() {
        let h = Harness::new();
        let mut engine = h.engine();

        assert!(!engine.is_recovered());
        assert_eq!(engine.recover().await, ArmingState::Idle);
        assert!(engine.is_recovered());
    }

    #[tokio::test]
    async fn test_arm_persists_and_arms() {
        let h = Harness::new();
        let mut engine = h.engine();

        engine.arm(config()).await.unwrap();

        assert_eq!(engine.state(), ArmingState::Armed);
        assert_eq!(h.store().load_arming().await.unwrap(), Some(config()));
    }

    #[tokio::test]
    async fn test_arm_rejects_bad_radius_without_writing() {
        let h = Harness::new();
        let mut engine = h.engine();

        for radius in [0.0, -1.0] {
            let result = engine.arm(AlarmConfig::new(target(), radius)).await;
            assert!(matches!(result, Err(EngineError::Config(_))));
        }

        assert_eq!(engine.state(), ArmingState::Idle);
        assert_eq!(h.kv.write_count(), 0);
    }

    #[tokio::test]
    async fn test_arm_store_failure_stays_idle() {
        let h = Harness::new();
        h.kv.fail_writes(true);
        let mut engine = h.engine();

        let result = engine.arm(config()).await;

        assert!(matches!(result, Err(EngineError::Store(_))));
        assert_eq!(engine.state(), ArmingState::Idle);
        assert!(engine.config().is_none());
    }

    #[tokio::test]
    async fn test_outside_radius_updates_distance_only() {
        let h = Harness::new();
        let mut engine = h.engine();
        engine.arm(config()).await.unwrap();

        let observation = engine.observe(sample(0.05, 1)).await;

        assert!(matches!(observation, Observation::Outside { .. }));
        assert_eq!(engine.state(), ArmingState::Armed);
        let d = engine.last_distance_meters().unwrap();
        assert!((d - 5559.7).abs() < 1.0, "got {}", d);
        assert_eq!(h.dispatcher.count(), 0);
    }

    #[tokio::test]
    async fn test_boundary_is_inclusive() {
        let h = Harness::new();
        let mut engine = h.engine();
        let exact = distance_meters(&target(), &sample(0.008983, 0).coord);
        engine
            .arm(AlarmConfig::new(target(), exact))
            .await
            .unwrap();

        let observation = engine.observe(sample(0.008983, 1)).await;

        assert!(observation.is_triggered());
        assert_eq!(h.dispatcher.count(), 1);
    }

    #[tokio::test]
    async fn test_one_kilometre_boundary_samples() {
        let h = Harness::new();
        let mut engine = h.engine();
        engine.arm(config()).await.unwrap();

        let outside = engine.observe(sample(0.0090, 1)).await;
        assert!(matches!(outside, Observation::Outside { .. }));

        let inside = engine.observe(sample(0.008983, 2)).await;
        assert!(inside.is_triggered());
    }

    #[tokio::test]
    async fn test_trigger_dispatches_once_and_disarms() {
        let h = Harness::new();
        let mut engine = h.engine();
        let prefs = AlertPreferences::default()
            .with_sound(SoundId::Siren)
            .with_vibration(VibrationPattern::Heavy);
        engine
            .arm(config().with_preferences(prefs))
            .await
            .unwrap();

        let first = engine.observe(sample(0.001, 1)).await;
        let Observation::Triggered(report) = first else {
            panic!("expected trigger, got {:?}", first);
        };
        assert!(report.is_clean());
        assert_eq!(report.alert.sound, SoundId::Siren);
        assert_eq!(report.alert.body, "You are within 111m of your destination!");

        assert_eq!(engine.state(), ArmingState::Idle);
        assert!(h.store().load_arming().await.unwrap().is_none());

        let second = engine.observe(sample(0.001, 2)).await;
        assert!(matches!(second, Observation::Ignored(IgnoreReason::NotArmed)));
        assert_eq!(h.dispatcher.count(), 1);
    }

    #[tokio::test]
    async fn test_disarm_prevents_alert() {
        let h = Harness::new();
        let mut engine = h.engine();
        engine.arm(config()).await.unwrap();
        engine.observe(sample(0.05, 1)).await;

        engine.disarm().await.unwrap();

        assert_eq!(engine.state(), ArmingState::Idle);
        assert!(engine.last_distance_meters().is_none());
        let observation = engine.observe(sample(0.0, 2)).await;
        assert!(matches!(observation, Observation::Ignored(IgnoreReason::NotArmed)));
        assert_eq!(h.dispatcher.count(), 0);
    }

    #[tokio::test]
    async fn test_disarm_failure_keeps_state() {
        let h = Harness::new();
        let mut engine = h.engine();
        engine.arm(config()).await.unwrap();
        h.kv.fail_writes(true);

        assert!(engine.disarm().await.is_err());
        assert_eq!(engine.state(), ArmingState::Armed);
    }

    #[tokio::test]
    async fn test_disarm_while_idle_clears_stale_flag() {
        let h = Harness::new();
        h.store().save_arming(&config()).await.unwrap();
        let mut engine = h.engine();

        engine.disarm().await.unwrap();

        assert_eq!(h.kv.peek(KEY_ARMED).as_deref(), Some("false"));
    }

    #[tokio::test]
    async fn test_fresh_engine_resumes_armed() {
        let h = Harness::new();
        h.engine().arm(config()).await.unwrap();

        // New process lifetime: nothing carried over but the store
        let mut engine = h.engine();
        assert_eq!(engine.recover().await, ArmingState::Armed);
        assert_eq!(engine.config(), Some(&config()));

        assert!(engine.observe(sample(0.0, 1)).await.is_triggered());
        assert!(!engine.observe(sample(0.0, 2)).await.is_triggered());
        assert_eq!(h.dispatcher.count(), 1);
    }

    #[tokio::test]
    async fn test_recover_read_failure_is_idle() {
        let h = Harness::new();
        h.store().save_arming(&config()).await.unwrap();
        h.kv.fail_reads(true);

        let mut engine = h.engine();
        assert_eq!(engine.recover().await, ArmingState::Idle);
    }

    #[tokio::test]
    async fn test_stale_sample_is_ignored() {
        let h = Harness::new();
        let mut engine = h.engine();
        engine.arm(config()).await.unwrap();

        let newer = engine.observe(sample(0.05, 2_000)).await;
        assert!(matches!(newer, Observation::Outside { .. }));

        // Older fix lands inside the radius but must not count
        let older = engine.observe(sample(0.0, 1_000)).await;
        assert!(matches!(
            older,
            Observation::Ignored(IgnoreReason::Stale {
                timestamp_ms: 1_000,
                newest_ms: 2_000
            })
        ));
        assert_eq!(engine.state(), ArmingState::Armed);
        assert_eq!(h.dispatcher.count(), 0);
    }

    #[tokio::test]
    async fn test_equal_timestamp_is_evaluated() {
        let h = Harness::new();
        let mut engine = h.engine();
        engine.arm(config()).await.unwrap();

        engine.observe(sample(0.05, 1_000)).await;
        assert!(engine.observe(sample(0.0, 1_000)).await.is_triggered());
    }

    #[tokio::test]
    async fn test_disarmed_elsewhere_is_not_alerted() {
        let h = Harness::new();
        let mut foreground = h.engine();
        foreground.arm(config()).await.unwrap();

        // Another context clears the flag behind the foreground engine's back
        h.store().clear_arming().await.unwrap();

        let observation = foreground.observe(sample(0.0, 1)).await;
        assert!(matches!(observation, Observation::Cancelled { .. }));
        assert_eq!(foreground.state(), ArmingState::Idle);
        assert_eq!(h.dispatcher.count(), 0);
    }

    #[tokio::test]
    async fn test_dispatch_failure_still_disarms() {
        let h = Harness::new();
        h.dispatcher.fail_next();
        let mut engine = h.engine();
        engine.arm(config()).await.unwrap();

        let Observation::Triggered(report) = engine.observe(sample(0.0, 1)).await else {
            panic!("expected trigger");
        };

        assert!(report.dispatch.is_err());
        assert!(report.disarm.is_ok());
        assert!(h.store().load_arming().await.unwrap().is_none());
        assert_eq!(engine.state(), ArmingState::Idle);
    }

    #[tokio::test]
    async fn test_disarm_write_failure_after_alert_is_not_retried() {
        let h = Harness::new();
        let mut engine = h.engine();
        engine.arm(config()).await.unwrap();
        h.kv.fail_writes(true);

        let Observation::Triggered(report) = engine.observe(sample(0.0, 1)).await else {
            panic!("expected trigger");
        };
        assert!(report.dispatch.is_ok());
        assert!(report.disarm.is_err());

        // Engine is idle in memory; the stale persisted flag stays behind
        assert_eq!(engine.state(), ArmingState::Idle);
        assert_eq!(h.kv.peek(KEY_ARMED).as_deref(), Some("true"));
        engine.observe(sample(0.0, 2)).await;
        assert_eq!(h.dispatcher.count(), 1);

        // Manual disarm clears it once the store recovers
        h.kv.fail_writes(false);
        engine.disarm().await.unwrap();
        assert!(h.store().load_arming().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_dispatch_timeout_is_reported() {
        let h = Harness::new();
        h.dispatcher.stall(true);
        let mut engine = h.engine().with_operation_timeout(Duration::from_millis(20));
        engine.arm(config()).await.unwrap();

        let Observation::Triggered(report) = engine.observe(sample(0.0, 1)).await else {
            panic!("expected trigger");
        };
        assert!(matches!(report.dispatch, Err(DispatchError::Timeout(_))));
        assert!(report.disarm.is_ok());
    }

    #[tokio::test]
    async fn test_nan_sample_never_triggers() {
        let h = Harness::new();
        let mut engine = h.engine();
        engine.arm(config()).await.unwrap();

        let nan = PositionSample::new(Coordinate::new_unchecked(f64::NAN, 0.0), 1);
        let observation = engine.observe(nan).await;

        assert!(matches!(observation, Observation::Outside { .. }));
        assert_eq!(h.dispatcher.count(), 0);
    }

    #[tokio::test]
    async fn test_run_stops_at_trigger() {
        let h = Harness::new();
        let mut engine = h.engine();
        engine.arm(config()).await.unwrap();

        let track = vec![sample(0.05, 0), sample(0.02, 10_000), sample(0.005, 20_000), sample(0.0, 30_000)];
        let mut subscription = ReplaySource::new(track)
            .subscribe(SubscriptionOptions::unfiltered())
            .unwrap();

        let outcome = engine.run(&mut subscription).await;

        let TrackingOutcome::Triggered(report) = outcome else {
            panic!("expected trigger, got {:?}", outcome);
        };
        assert!(report.distance_meters < 1000.0);
        assert!(subscription.is_cancelled());
        assert_eq!(h.dispatcher.count(), 1);
    }

    #[tokio::test]
    async fn test_run_when_not_armed() {
        let h = Harness::new();
        let mut engine = h.engine();
        let mut subscription = ReplaySource::new(vec![sample(0.0, 0)])
            .subscribe(SubscriptionOptions::unfiltered())
            .unwrap();

        assert!(matches!(
            engine.run(&mut subscription).await,
            TrackingOutcome::NotArmed
        ));
    }

    #[tokio::test]
    async fn test_run_source_exhausted_stays_armed() {
        let h = Harness::new();
        let mut engine = h.engine();
        engine.arm(config()).await.unwrap();
        let mut subscription = ReplaySource::new(vec![sample(0.05, 0), sample(0.04, 10_000)])
            .subscribe(SubscriptionOptions::unfiltered())
            .unwrap();

        assert!(matches!(
            engine.run(&mut subscription).await,
            TrackingOutcome::SourceClosed
        ));
        assert_eq!(engine.state(), ArmingState::Armed);
        assert!(h.store().load_arming().await.unwrap().is_some());
    }
}
