//! Alert dispatch.
//!
//! Translates a trigger decision into a platform notification:
//!
//! ```text
//! AlertRequest ──► NotificationDispatcher ──► NotificationContent ──► NotificationSink
//!   (title, body,     (sound asset lookup,       (channel, priority,      (platform)
//!    sound, pattern)   vibration timings)         timings, badge)
//! ```

mod dispatcher;
mod memory;
mod notification;
mod traits;

pub use dispatcher::{NotificationDispatcher, ALARM_CHANNEL_ID, DEFAULT_CHANNEL_ID};
pub use memory::MemorySink;
pub use notification::{
    ChannelImportance, NotificationChannel, NotificationContent, NotificationPriority,
    NotificationSink,
};
pub use traits::{AlertDispatcher, AlertRequest, DispatchError, ARRIVAL_TITLE};
