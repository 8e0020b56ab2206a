//! Proxalarm - proximity alarm engine
//!
//! This library arms a circular geofence around a destination, evaluates
//! position samples against it, and raises exactly one alert when the
//! device enters the radius. State is persisted so the evaluation can be
//! re-invoked by a platform background scheduler with no in-memory
//! continuity between invocations.
//!
//! # Architecture
//!
//! ```text
//! PositionSource ──samples──► ProximityEngine ──AlertRequest──► AlertDispatcher
//!                                  │  ▲                              │
//!                       save/clear │  │ load_arming                  ▼
//!                                  ▼  │                        NotificationSink
//!                               AlarmStore ──► KeyValueStore
//! ```

pub mod alarm;
pub mod app;
pub mod config;
pub mod coord;
pub mod dispatch;
pub mod engine;
pub mod logging;
pub mod position;
pub mod store;

/// Crate version, for banners and startup logging.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
