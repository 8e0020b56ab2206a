//! Alarm configuration store.
//!
//! Maps [`AlarmConfig`] and [`AlertPreferences`] onto string keys of a
//! [`KeyValueStore`]. This is the single owner of durable alarm state; the
//! engine only ever holds a cached copy.
//!
//! # Write ordering
//!
//! `save_arming` submits target, radius and preferences before the armed
//! flag in one `set_many` batch. Stores that commit batches atomically make
//! the whole arm a single write; the rest write in order, so a reader never
//! sees `isTracking=true` without a target and radius already in place.
//!
//! # Armed preferences
//!
//! Arming records its alert preferences twice: under the shared preference
//! keys (so they become the remembered selection) and under `armed*` keys
//! that only `save_arming` writes. `load_arming` reads the `armed*` copy, so
//! a later `save_preferences` changes the next arming but never the alert of
//! the alarm already armed, whichever process ends up firing it.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::traits::{KeyValueStore, StoreError};
use crate::alarm::{AlarmConfig, AlertPreferences, SoundId, VibrationPattern};
use crate::coord::Coordinate;

/// Serialized [`Coordinate`] of the destination.
pub const KEY_TARGET: &str = "targetLocation";
/// Alarm radius in meters.
pub const KEY_RADIUS: &str = "alarmRadius";
/// Armed flag, `"true"` or `"false"`.
pub const KEY_ARMED: &str = "isTracking";
/// Sound selection.
pub const KEY_SOUND: &str = "alarmSound";
/// Vibration pattern selection.
pub const KEY_VIBRATION: &str = "vibrationPattern";
/// Custom vibration duration in milliseconds.
pub const KEY_CUSTOM_VIBRATION: &str = "customVibrationDuration";
/// Sound the armed alarm will alert with.
pub const KEY_ARMED_SOUND: &str = "armedAlarmSound";
/// Vibration pattern the armed alarm will alert with.
pub const KEY_ARMED_VIBRATION: &str = "armedVibrationPattern";
/// Custom vibration duration the armed alarm will alert with.
pub const KEY_ARMED_CUSTOM_VIBRATION: &str = "armedCustomVibrationDuration";

const SHARED_PREFERENCE_KEYS: PreferenceKeys = PreferenceKeys {
    sound: KEY_SOUND,
    vibration: KEY_VIBRATION,
    custom_vibration: KEY_CUSTOM_VIBRATION,
};

const ARMED_PREFERENCE_KEYS: PreferenceKeys = PreferenceKeys {
    sound: KEY_ARMED_SOUND,
    vibration: KEY_ARMED_VIBRATION,
    custom_vibration: KEY_ARMED_CUSTOM_VIBRATION,
};

/// Key names for one copy of [`AlertPreferences`].
#[derive(Debug, Clone, Copy)]
struct PreferenceKeys {
    sound: &'static str,
    vibration: &'static str,
    custom_vibration: &'static str,
}

/// Durable alarm state on top of a [`KeyValueStore`].
#[derive(Clone)]
pub struct AlarmStore {
    kv: Arc<dyn KeyValueStore>,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for AlarmStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlarmStore")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl AlarmStore {
    /// Wrap a key/value store with no operation timeout.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv, timeout: None }
    }

    /// Bound every storage call by `timeout`.
    ///
    /// An expired call surfaces as [`StoreError::Timeout`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Persist an armed alarm.
    ///
    /// # Errors
    ///
    /// Any storage failure is returned; the arm must then be reported as not
    /// having taken effect.
    pub async fn save_arming(&self, config: &AlarmConfig) -> Result<(), StoreError> {
        let target = serde_json::to_string(&config.target)?;

        let mut entries = vec![
            (KEY_TARGET.to_string(), target),
            (KEY_RADIUS.to_string(), config.radius_meters.to_string()),
        ];
        entries.extend(preference_entries(SHARED_PREFERENCE_KEYS, &config.preferences));
        entries.extend(preference_entries(ARMED_PREFERENCE_KEYS, &config.preferences));
        // Must stay last
        entries.push((KEY_ARMED.to_string(), "true".to_string()));

        self.bounded(self.kv.set_many(entries)).await?;
        debug!(target = %config.target, radius_m = config.radius_meters, "Arming persisted");
        Ok(())
    }

    /// Load the armed alarm, if any.
    ///
    /// Returns `Ok(None)` when the armed flag is not `"true"`, or when it is
    /// set but the target or radius key is absent. Preferences come from the
    /// copy written at arm time; state written without that copy falls back
    /// to the shared preferences.
    ///
    /// # Errors
    ///
    /// Storage failures, and values that are present but unparseable
    /// ([`StoreError::Corrupt`]). Callers treat any error as "not armed".
    pub async fn load_arming(&self) -> Result<Option<AlarmConfig>, StoreError> {
        let armed = self.get(KEY_ARMED).await?;
        if armed.as_deref().map(str::trim) != Some("true") {
            return Ok(None);
        }

        let (Some(raw_target), Some(raw_radius)) =
            (self.get(KEY_TARGET).await?, self.get(KEY_RADIUS).await?)
        else {
            warn!("Armed flag set without target or radius, treating as not armed");
            return Ok(None);
        };

        let target = parse_target(&raw_target)?;
        let radius_meters = parse_radius(&raw_radius)?;
        let preferences = if self.get(KEY_ARMED_SOUND).await?.is_some() {
            self.read_preferences(ARMED_PREFERENCE_KEYS).await?
        } else {
            self.read_preferences(SHARED_PREFERENCE_KEYS).await?
        };

        Ok(Some(AlarmConfig {
            target,
            radius_meters,
            preferences,
        }))
    }

    /// Mark the alarm as not armed.
    ///
    /// Target and radius stay in place; they are ignored while disarmed.
    pub async fn clear_arming(&self) -> Result<(), StoreError> {
        self.bounded(self.kv.set(KEY_ARMED, "false".to_string()))
            .await?;
        debug!("Arming cleared");
        Ok(())
    }

    /// Persist alert preferences on their own.
    ///
    /// They apply to the next arming; an alarm that is already armed keeps
    /// the preferences it was armed with.
    pub async fn save_preferences(&self, prefs: &AlertPreferences) -> Result<(), StoreError> {
        self.bounded(self.kv.set_many(preference_entries(SHARED_PREFERENCE_KEYS, prefs)))
            .await
    }

    /// Load alert preferences.
    ///
    /// Unset or unrecognised values fall back to the defaults (`alarm`,
    /// `medium`, 500 ms). Only storage failures are errors.
    pub async fn load_preferences(&self) -> Result<AlertPreferences, StoreError> {
        self.read_preferences(SHARED_PREFERENCE_KEYS).await
    }

    /// Load preferences, falling back to defaults on storage failure.
    pub async fn load_preferences_or_default(&self) -> AlertPreferences {
        match self.load_preferences().await {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!(error = %e, "Failed to read alert preferences, using defaults");
                AlertPreferences::default()
            }
        }
    }

    async fn read_preferences(&self, keys: PreferenceKeys) -> Result<AlertPreferences, StoreError> {
        let defaults = AlertPreferences::default();

        let sound = parse_or_default::<SoundId>(keys.sound, self.get(keys.sound).await?)
            .unwrap_or(defaults.sound);
        let vibration =
            parse_or_default::<VibrationPattern>(keys.vibration, self.get(keys.vibration).await?)
                .unwrap_or(defaults.vibration);
        let custom_vibration_ms = parse_or_default::<u64>(
            keys.custom_vibration,
            self.get(keys.custom_vibration).await?,
        )
        .unwrap_or(defaults.custom_vibration_ms);

        Ok(AlertPreferences {
            sound,
            vibration,
            custom_vibration_ms,
        })
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.bounded(self.kv.get(key)).await
    }

    async fn bounded<T>(
        &self,
        op: impl std::future::Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, op)
                .await
                .map_err(|_| StoreError::Timeout(limit))?,
            None => op.await,
        }
    }
}

fn preference_entries(keys: PreferenceKeys, prefs: &AlertPreferences) -> Vec<(String, String)> {
    vec![
        (keys.sound.to_string(), prefs.sound.as_str().to_string()),
        (
            keys.vibration.to_string(),
            prefs.vibration.as_str().to_string(),
        ),
        (
            keys.custom_vibration.to_string(),
            prefs.custom_vibration_ms.to_string(),
        ),
    ]
}

fn parse_target(raw: &str) -> Result<Coordinate, StoreError> {
    let target: Coordinate = serde_json::from_str(raw).map_err(|e| StoreError::Corrupt {
        key: KEY_TARGET.to_string(),
        reason: e.to_string(),
    })?;
    target.validate().map_err(|e| StoreError::Corrupt {
        key: KEY_TARGET.to_string(),
        reason: e.to_string(),
    })?;
    Ok(target)
}

fn parse_radius(raw: &str) -> Result<f64, StoreError> {
    match raw.trim().parse::<f64>() {
        Ok(radius) if radius > 0.0 && radius.is_finite() => Ok(radius),
        Ok(radius) => Err(StoreError::Corrupt {
            key: KEY_RADIUS.to_string(),
            reason: format!("radius {} is not positive", radius),
        }),
        Err(e) => Err(StoreError::Corrupt {
            key: KEY_RADIUS.to_string(),
            reason: e.to_string(),
        }),
    }
}

fn parse_or_default<T: std::str::FromStr>(key: &str, raw: Option<String>) -> Option<T> {
    let raw = raw?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Unrecognised stored preference, using default");
            None
        }
    }
}
