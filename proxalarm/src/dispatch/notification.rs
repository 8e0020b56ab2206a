//! Platform notification content and the sink that accepts it.

use crate::alarm::SoundAsset;
use crate::store::BoxFuture;

use super::traits::DispatchError;

/// Delivery priority of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPriority {
    /// Normal priority.
    Default,
    /// Heads-up priority.
    High,
    /// Highest priority; used for arrival alarms.
    Max,
}

/// Importance of a notification channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelImportance {
    /// Regular notifications.
    Default,
    /// Makes noise and peeks on screen.
    Max,
}

/// A fully resolved notification, ready for the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    /// Channel the notification is posted to.
    pub channel_id: String,
    /// Title line.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Sound asset to play.
    pub sound: SoundAsset,
    /// Vibration timings in milliseconds, alternating wait/vibrate.
    pub vibration: Vec<u64>,
    /// Delivery priority.
    pub priority: NotificationPriority,
    /// App badge count to set, if any.
    pub badge: Option<u32>,
}

/// A notification channel definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationChannel {
    /// Channel identifier.
    pub id: String,
    /// Name shown in system settings.
    pub name: String,
    /// Channel importance.
    pub importance: ChannelImportance,
    /// Default vibration timings, if vibration is enabled.
    pub vibration: Option<Vec<u64>>,
    /// Default sound resource id.
    pub sound: Option<String>,
    /// Whether the channel may sound during do-not-disturb.
    pub bypass_dnd: bool,
    /// Whether the notification light is used.
    pub enable_lights: bool,
}

/// Platform notification service.
///
/// `schedule` is fire-and-forget from the engine's point of view: it
/// resolves once the platform has queued the notification.
pub trait NotificationSink: Send + Sync {
    /// Create or update a notification channel.
    fn register_channel(
        &self,
        channel: NotificationChannel,
    ) -> BoxFuture<'_, Result<(), DispatchError>>;

    /// Queue a notification for immediate delivery.
    fn schedule(&self, content: NotificationContent) -> BoxFuture<'_, Result<(), DispatchError>>;
}
