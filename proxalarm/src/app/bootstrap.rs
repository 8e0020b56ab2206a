//! Application bootstrap.
//!
//! Wires the durable store, the notification dispatcher and engine
//! construction from a [`ConfigFile`], in this order:
//!
//! 1. Open the file-backed store at `[storage] path`
//! 2. Register notification channels with the sink
//! 3. Hand out engines that share the store and dispatcher

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::error::AppError;
use crate::config::ConfigFile;
use crate::dispatch::{AlertDispatcher, NotificationDispatcher, NotificationSink};
use crate::engine::{evaluate_background_with_timeout, Observation, ProximityEngine};
use crate::position::PositionSample;
use crate::store::{AlarmStore, FileStore, KeyValueStore};

/// A configured proximity alarm application.
///
/// # Example
///
/// ```ignore
/// use proxalarm::app::AlarmApp;
///
/// let app = AlarmApp::start(ConfigFile::load()?, sink).await?;
///
/// // Foreground
/// let mut engine = app.engine();
/// engine.arm(config).await?;
///
/// // Background re-invocation
/// let observation = app.evaluate_background(&batch).await;
/// ```
pub struct AlarmApp {
    config: ConfigFile,
    store: AlarmStore,
    dispatcher: Arc<NotificationDispatcher>,
}

impl std::fmt::Debug for AlarmApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlarmApp")
            .field("storage", &self.config.storage.path)
            .field("timeout", &self.timeout())
            .finish_non_exhaustive()
    }
}

impl AlarmApp {
    /// Start with the file-backed store named in the configuration.
    pub async fn start(
        config: ConfigFile,
        sink: Arc<dyn NotificationSink>,
    ) -> Result<Self, AppError> {
        let kv: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config.storage.path.clone()));
        info!(path = %config.storage.path.display(), "Using file-backed alarm store");
        Self::start_with_store(config, kv, sink).await
    }

    /// Start with an explicit key/value store.
    pub async fn start_with_store(
        config: ConfigFile,
        kv: Arc<dyn KeyValueStore>,
        sink: Arc<dyn NotificationSink>,
    ) -> Result<Self, AppError> {
        if config.engine.timeout_ms == 0 {
            return Err(AppError::Config(
                "engine.timeout_ms must be greater than zero".to_string(),
            ));
        }
        let timeout = config.operation_timeout();

        let store = AlarmStore::new(kv).with_timeout(timeout);
        let dispatcher = Arc::new(NotificationDispatcher::new(sink).with_timeout(timeout));
        dispatcher.setup_channels().await?;

        info!(timeout_ms = config.engine.timeout_ms, "Alarm application started");

        Ok(Self {
            config,
            store,
            dispatcher,
        })
    }

    /// A new engine sharing this application's store and dispatcher.
    ///
    /// Each engine recovers from the store on first use.
    pub fn engine(&self) -> ProximityEngine {
        ProximityEngine::new(self.store.clone(), self.dispatcher())
            .with_operation_timeout(self.timeout())
    }

    /// Run one background invocation against the shared store.
    pub async fn evaluate_background(&self, batch: &[PositionSample]) -> Observation {
        evaluate_background_with_timeout(
            self.store.clone(),
            self.dispatcher(),
            batch,
            self.timeout(),
        )
        .await
    }

    /// The alarm store.
    pub fn store(&self) -> &AlarmStore {
        &self.store
    }

    /// The dispatcher as a trait object.
    pub fn dispatcher(&self) -> Arc<dyn AlertDispatcher> {
        self.dispatcher.clone()
    }

    /// Loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    fn timeout(&self) -> Duration {
        self.config.operation_timeout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::AlarmConfig;
    use crate::coord::Coordinate;
    use crate::dispatch::{DispatchError, MemorySink, ALARM_CHANNEL_ID};
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> ConfigFile {
        let mut config = ConfigFile::default();
        config.storage.path = dir.path().join("state.json");
        config
    }

    #[tokio::test]
    async fn test_start_registers_channels() {
        let dir = TempDir::new().unwrap();
        let sink = Arc::new(MemorySink::new());

        AlarmApp::start(config_in(&dir), sink.clone()).await.unwrap();

        let ids: Vec<String> = sink.channels().into_iter().map(|c| c.id).collect();
        assert!(ids.iter().any(|id| id == ALARM_CHANNEL_ID));
    }

    #[tokio::test]
    async fn test_channel_failure_aborts_start() {
        let dir = TempDir::new().unwrap();
        let sink = Arc::new(MemorySink::new());
        sink.fail_channel(ALARM_CHANNEL_ID, "notifications disabled");

        let result = AlarmApp::start(config_in(&dir), sink).await;

        assert!(matches!(
            result,
            Err(AppError::ChannelSetup(DispatchError::ChannelSetup { ref channel, .. }))
                if channel == ALARM_CHANNEL_ID
        ));
    }

    #[tokio::test]
    async fn test_zero_timeout_rejected() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.engine.timeout_ms = 0;

        let result = AlarmApp::start(config, Arc::new(MemorySink::new())).await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_background_invocation_sees_foreground_arming() {
        let dir = TempDir::new().unwrap();
        let sink = Arc::new(MemorySink::new());
        let app = AlarmApp::start(config_in(&dir), sink.clone()).await.unwrap();

        let target = Coordinate::new(51.5007, -0.1246).unwrap();
        app.engine()
            .arm(AlarmConfig::new(target, 200.0))
            .await
            .unwrap();

        // Fresh app over the same file: a new process lifetime
        let app = AlarmApp::start(config_in(&dir), sink.clone()).await.unwrap();
        let observation = app
            .evaluate_background(&[PositionSample::new(target, 1)])
            .await;

        assert!(observation.is_triggered());
        assert_eq!(sink.scheduled().len(), 1);
        assert!(app.store().load_arming().await.unwrap().is_none());
    }
}
