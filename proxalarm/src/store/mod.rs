//! Durable alarm state.
//!
//! ```text
//! AlarmStore (typed: AlarmConfig, AlertPreferences)
//!     └── Arc<dyn KeyValueStore> (strings)
//!             ├── FileStore   (JSON file, survives restarts)
//!             └── MemoryStore (tests, dry runs)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use proxalarm::store::{AlarmStore, FileStore};
//!
//! let store = AlarmStore::new(Arc::new(FileStore::new("/tmp/proxalarm/state.json")));
//! if let Some(config) = store.load_arming().await? {
//!     println!("Armed for {} within {}m", config.target, config.radius_meters);
//! }
//! ```

mod alarm_store;
mod file;
mod memory;
mod traits;

pub use alarm_store::{
    AlarmStore, KEY_ARMED, KEY_ARMED_CUSTOM_VIBRATION, KEY_ARMED_SOUND, KEY_ARMED_VIBRATION,
    KEY_CUSTOM_VIBRATION, KEY_RADIUS, KEY_SOUND, KEY_TARGET, KEY_VIBRATION,
};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::{BoxFuture, KeyValueStore, StoreError};
