//! Notification-backed alert dispatcher.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::notification::{
    ChannelImportance, NotificationChannel, NotificationContent, NotificationPriority,
    NotificationSink,
};
use super::traits::{AlertDispatcher, AlertRequest, DispatchError};
use crate::alarm::{SoundId, VibrationPattern};
use crate::store::BoxFuture;

/// Channel arrival alarms are posted to.
pub const ALARM_CHANNEL_ID: &str = "alarm_channel";

/// Fallback channel for everything else.
pub const DEFAULT_CHANNEL_ID: &str = "default";

/// Dispatches alerts as platform notifications.
///
/// Resolves the alert's sound to its platform asset and its vibration
/// pattern to concrete timings, then hands the result to a
/// [`NotificationSink`].
pub struct NotificationDispatcher {
    sink: Arc<dyn NotificationSink>,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl NotificationDispatcher {
    /// Create a dispatcher over the given sink.
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            sink,
            timeout: None,
        }
    }

    /// Fail a dispatch that the sink has not accepted within `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Channel definitions registered by [`NotificationDispatcher::setup_channels`].
    pub fn channels() -> Vec<NotificationChannel> {
        vec![
            NotificationChannel {
                id: ALARM_CHANNEL_ID.to_string(),
                name: "Alarm Notifications".to_string(),
                importance: ChannelImportance::Max,
                vibration: Some(VibrationPattern::Medium.timings(0)),
                sound: Some(SoundId::Alarm.asset().android_id.to_string()),
                bypass_dnd: true,
                enable_lights: true,
            },
            NotificationChannel {
                id: DEFAULT_CHANNEL_ID.to_string(),
                name: "Default Notifications".to_string(),
                importance: ChannelImportance::Default,
                vibration: Some(Vec::new()),
                sound: None,
                bypass_dnd: false,
                enable_lights: false,
            },
        ]
    }

    /// Register the notification channels with the sink.
    ///
    /// Every channel is attempted; the first failure is returned after the
    /// rest have been tried.
    pub async fn setup_channels(&self) -> Result<(), DispatchError> {
        let mut first_error = None;
        for channel in Self::channels() {
            let id = channel.id.clone();
            match self.sink.register_channel(channel).await {
                Ok(()) => debug!(channel = %id, "Notification channel registered"),
                Err(e) => {
                    warn!(channel = %id, error = %e, "Failed to register notification channel");
                    first_error.get_or_insert(DispatchError::ChannelSetup {
                        channel: id,
                        reason: e.to_string(),
                    });
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Resolve an alert into platform notification content.
    pub fn build_content(alert: &AlertRequest) -> NotificationContent {
        NotificationContent {
            channel_id: ALARM_CHANNEL_ID.to_string(),
            title: alert.title.clone(),
            body: alert.body.clone(),
            sound: *alert.sound.asset(),
            vibration: alert.vibration_timings(),
            priority: NotificationPriority::Max,
            badge: Some(1),
        }
    }
}

impl AlertDispatcher for NotificationDispatcher {
    fn dispatch(&self, alert: AlertRequest) -> BoxFuture<'_, Result<(), DispatchError>> {
        Box::pin(async move {
            let content = Self::build_content(&alert);
            let schedule = self.sink.schedule(content);

            match self.timeout {
                Some(limit) => tokio::time::timeout(limit, schedule)
                    .await
                    .map_err(|_| DispatchError::Timeout(limit))??,
                None => schedule.await?,
            }

            info!(
                sound = %alert.sound,
                vibration = %alert.vibration,
                body = %alert.body,
                "Alert dispatched"
            );
            Ok(())
        })
    }
}
