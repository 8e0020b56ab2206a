//! Alert preferences: which sound to play and how to vibrate.
//!
//! Both selections are closed enums. Persisted strings are parsed at the
//! store boundary; anything unrecognised falls back to the default rather
//! than surfacing an invalid variant.

use std::fmt;
use std::str::FromStr;

/// Default duration of a custom vibration pulse in milliseconds.
pub const DEFAULT_CUSTOM_VIBRATION_MS: u64 = 500;

/// Notification sound selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SoundId {
    /// Bell ring
    Bell,
    /// Alarm clock
    #[default]
    Alarm,
    /// Chime
    Chime,
    /// Beep
    Beep,
    /// Siren
    Siren,
}

/// Platform sound asset for a [`SoundId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundAsset {
    /// Sound selection this asset belongs to.
    pub id: SoundId,
    /// Human-readable name for settings screens.
    pub display_name: &'static str,
    /// Bundled sound file used on iOS.
    pub ios_sound: &'static str,
    /// Raw resource id used on Android.
    pub android_id: &'static str,
}

const SOUND_ASSETS: [SoundAsset; 5] = [
    SoundAsset {
        id: SoundId::Bell,
        display_name: "Bell Ring",
        ios_sound: "notification_bell.wav",
        android_id: "bell",
    },
    SoundAsset {
        id: SoundId::Alarm,
        display_name: "Alarm Clock",
        ios_sound: "notification_alarm.wav",
        android_id: "alarm",
    },
    SoundAsset {
        id: SoundId::Chime,
        display_name: "Chime",
        ios_sound: "notification_chime.wav",
        android_id: "chime",
    },
    SoundAsset {
        id: SoundId::Beep,
        display_name: "Beep",
        ios_sound: "notification_beep.wav",
        android_id: "beep",
    },
    SoundAsset {
        id: SoundId::Siren,
        display_name: "Siren",
        ios_sound: "notification_siren.wav",
        android_id: "siren",
    },
];

/// All selectable sounds, in display order.
pub fn available_sounds() -> &'static [SoundAsset] {
    &SOUND_ASSETS
}

impl SoundId {
    /// Persisted string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundId::Bell => "bell",
            SoundId::Alarm => "alarm",
            SoundId::Chime => "chime",
            SoundId::Beep => "beep",
            SoundId::Siren => "siren",
        }
    }

    /// Platform assets for this sound.
    pub fn asset(&self) -> &'static SoundAsset {
        match self {
            SoundId::Bell => &SOUND_ASSETS[0],
            SoundId::Alarm => &SOUND_ASSETS[1],
            SoundId::Chime => &SOUND_ASSETS[2],
            SoundId::Beep => &SOUND_ASSETS[3],
            SoundId::Siren => &SOUND_ASSETS[4],
        }
    }
}

impl fmt::Display for SoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoundId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bell" => Ok(SoundId::Bell),
            "alarm" => Ok(SoundId::Alarm),
            "chime" => Ok(SoundId::Chime),
            "beep" => Ok(SoundId::Beep),
            "siren" => Ok(SoundId::Siren),
            other => Err(format!("unknown sound '{}'", other)),
        }
    }
}

/// Vibration pattern selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VibrationPattern {
    /// Single short pulse
    Light,
    /// Two medium pulses
    #[default]
    Medium,
    /// Two long pulses
    Heavy,
    /// Three long pulses with short gaps
    Intense,
    /// Single pulse of user-chosen length
    Custom,
}

impl VibrationPattern {
    /// Persisted string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            VibrationPattern::Light => "light",
            VibrationPattern::Medium => "medium",
            VibrationPattern::Heavy => "heavy",
            VibrationPattern::Intense => "intense",
            VibrationPattern::Custom => "custom",
        }
    }

    /// Resolve to a platform timing sequence in milliseconds.
    ///
    /// Sequences alternate wait/vibrate starting with a wait, so `[0, 500]`
    /// vibrates immediately for half a second. `custom_ms` is only read for
    /// [`VibrationPattern::Custom`].
    pub fn timings(&self, custom_ms: u64) -> Vec<u64> {
        match self {
            VibrationPattern::Light => vec![0, 200],
            VibrationPattern::Medium => vec![0, 500, 250, 500],
            VibrationPattern::Heavy => vec![0, 800, 300, 800],
            VibrationPattern::Intense => vec![0, 1000, 200, 1000, 200, 1000],
            VibrationPattern::Custom => vec![0, custom_ms],
        }
    }
}

impl fmt::Display for VibrationPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VibrationPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(VibrationPattern::Light),
            "medium" => Ok(VibrationPattern::Medium),
            "heavy" => Ok(VibrationPattern::Heavy),
            "intense" => Ok(VibrationPattern::Intense),
            "custom" => Ok(VibrationPattern::Custom),
            other => Err(format!("unknown vibration pattern '{}'", other)),
        }
    }
}

/// Sound and vibration settings applied to an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertPreferences {
    /// Notification sound.
    pub sound: SoundId,
    /// Vibration pattern.
    pub vibration: VibrationPattern,
    /// Pulse length for [`VibrationPattern::Custom`].
    pub custom_vibration_ms: u64,
}

impl Default for AlertPreferences {
    fn default() -> Self {
        Self {
            sound: SoundId::default(),
            vibration: VibrationPattern::default(),
            custom_vibration_ms: DEFAULT_CUSTOM_VIBRATION_MS,
        }
    }
}

impl AlertPreferences {
    /// Set the sound.
    pub fn with_sound(mut self, sound: SoundId) -> Self {
        self.sound = sound;
        self
    }

    /// Set the vibration pattern.
    pub fn with_vibration(mut self, vibration: VibrationPattern) -> Self {
        self.vibration = vibration;
        self
    }

    /// Set the custom vibration length.
    pub fn with_custom_vibration_ms(mut self, ms: u64) -> Self {
        self.custom_vibration_ms = ms;
        self
    }

    /// Timing sequence for the selected vibration pattern.
    pub fn vibration_timings(&self) -> Vec<u64> {
        self.vibration.timings(self.custom_vibration_ms)
    }
}
