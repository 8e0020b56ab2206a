//! In-memory notification sink.

use parking_lot::Mutex;

use super::notification::{NotificationChannel, NotificationContent, NotificationSink};
use super::traits::DispatchError;
use crate::store::BoxFuture;

/// [`NotificationSink`] that records what it is given.
///
/// Used for dry runs and tests. Failures can be armed with
/// [`MemorySink::fail_next_schedule`] and [`MemorySink::fail_channel`] to
/// exercise dispatch error paths.
#[derive(Debug, Default)]
pub struct MemorySink {
    scheduled: Mutex<Vec<NotificationContent>>,
    channels: Mutex<Vec<NotificationChannel>>,
    pending_failure: Mutex<Option<String>>,
    channel_failures: Mutex<Vec<(String, String)>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications accepted so far, oldest first.
    pub fn scheduled(&self) -> Vec<NotificationContent> {
        self.scheduled.lock().clone()
    }

    /// Channels registered so far.
    pub fn channels(&self) -> Vec<NotificationChannel> {
        self.channels.lock().clone()
    }

    /// Reject the next `schedule` call with the given reason.
    pub fn fail_next_schedule(&self, reason: impl Into<String>) {
        *self.pending_failure.lock() = Some(reason.into());
    }

    /// Reject every registration of channel `id` with the given reason.
    pub fn fail_channel(&self, id: impl Into<String>, reason: impl Into<String>) {
        self.channel_failures
            .lock()
            .push((id.into(), reason.into()));
    }
}

impl NotificationSink for MemorySink {
    fn register_channel(
        &self,
        channel: NotificationChannel,
    ) -> BoxFuture<'_, Result<(), DispatchError>> {
        Box::pin(async move {
            let failure = self
                .channel_failures
                .lock()
                .iter()
                .find(|(id, _)| *id == channel.id)
                .map(|(_, reason)| reason.clone());
            if let Some(reason) = failure {
                return Err(DispatchError::Rejected(reason));
            }
            let mut channels = self.channels.lock();
            channels.retain(|c| c.id != channel.id);
            channels.push(channel);
            Ok(())
        })
    }

    fn schedule(&self, content: NotificationContent) -> BoxFuture<'_, Result<(), DispatchError>> {
        Box::pin(async move {
            if let Some(reason) = self.pending_failure.lock().take() {
                return Err(DispatchError::Rejected(reason));
            }
            self.scheduled.lock().push(content);
            Ok(())
        })
    }
}
