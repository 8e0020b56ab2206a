//! Terminal notification sink.
//!
//! Stands in for the platform notification service: alerts are printed as a
//! highlighted block and ring the terminal bell.

use console::{style, Term};
use proxalarm::dispatch::{
    DispatchError, NotificationChannel, NotificationContent, NotificationPriority,
    NotificationSink,
};
use proxalarm::store::BoxFuture;
use tracing::debug;

/// [`NotificationSink`] that renders to stdout.
pub struct ConsoleNotificationSink {
    term: Term,
}

impl ConsoleNotificationSink {
    /// Render to stdout, ringing the bell on alerts.
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    fn render(&self, content: &NotificationContent) -> std::io::Result<()> {
        let heading = match content.priority {
            NotificationPriority::Max => style(format!("🔔 {}", content.title)).red().bold(),
            NotificationPriority::High => style(format!("🔔 {}", content.title)).yellow().bold(),
            NotificationPriority::Default => style(content.title.clone()).bold(),
        };

        self.term.write_line("")?;
        self.term.write_line(&heading.to_string())?;
        self.term.write_line(&format!("   {}", content.body))?;
        self.term.write_line(&format!(
            "   {} {} ({})",
            style("sound:").dim(),
            content.sound.display_name,
            content.sound.ios_sound
        ))?;
        self.term.write_line(&format!(
            "   {} {:?}",
            style("vibration:").dim(),
            content.vibration
        ))?;
        self.term.write_line("")?;

        if self.term.features().is_attended() {
            self.term.write_str("\x07")?;
        }
        Ok(())
    }
}

impl Default for ConsoleNotificationSink {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for ConsoleNotificationSink {
    fn register_channel(
        &self,
        channel: NotificationChannel,
    ) -> BoxFuture<'_, Result<(), DispatchError>> {
        Box::pin(async move {
            debug!(channel = %channel.id, importance = ?channel.importance, "Channel registered");
            Ok(())
        })
    }

    fn schedule(&self, content: NotificationContent) -> BoxFuture<'_, Result<(), DispatchError>> {
        Box::pin(async move {
            self.render(&content)
                .map_err(|e| DispatchError::Rejected(format!("terminal write failed: {}", e)))
        })
    }
}
