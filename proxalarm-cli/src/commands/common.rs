//! Helpers shared across CLI commands.

use console::style;
use proxalarm::alarm::{AlarmConfig, AlertPreferences, SoundId, VibrationPattern};
use proxalarm::coord::Coordinate;

use crate::error::CliError;

/// Parse `LAT,LON` into a validated coordinate.
pub fn parse_position(value: &str) -> Result<Coordinate, CliError> {
    let (lat, lon) = value.split_once(',').ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "Expected LAT,LON (e.g. 51.5007,-0.1246), got '{}'",
            value
        ))
    })?;

    let parse = |part: &str| {
        part.trim().parse::<f64>().map_err(|_| {
            CliError::InvalidArgument(format!("'{}' is not a number in '{}'", part.trim(), value))
        })
    };

    Ok(Coordinate::new(parse(lat)?, parse(lon)?)?)
}

/// Human-readable distance: meters below 1 km, kilometres above.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{:.0} m", meters)
    } else {
        format!("{:.2} km", meters / 1000.0)
    }
}

/// Override saved preferences with whichever flags were given.
///
/// A custom vibration duration of zero is allowed and means no pulse.
pub fn apply_preference_flags(
    mut prefs: AlertPreferences,
    sound: Option<SoundId>,
    vibration: Option<VibrationPattern>,
    custom_vibration_ms: Option<u64>,
) -> AlertPreferences {
    if let Some(sound) = sound {
        prefs = prefs.with_sound(sound);
    }
    if let Some(vibration) = vibration {
        prefs = prefs.with_vibration(vibration);
    }
    if let Some(ms) = custom_vibration_ms {
        prefs = prefs.with_custom_vibration_ms(ms);
    }
    prefs
}

/// Print alert preferences as indented lines.
pub fn print_preferences(prefs: &AlertPreferences) {
    println!(
        "  Sound:      {} ({})",
        prefs.sound.asset().display_name,
        prefs.sound
    );
    println!("  Vibration:  {}", prefs.vibration);
    println!("  Timings:    {:?} ms", prefs.vibration_timings());
}

/// Print an armed configuration.
pub fn print_arming(config: &AlarmConfig) {
    println!("  Target:     {}", config.target);
    println!("  Radius:     {}", format_distance(config.radius_meters));
    print_preferences(&config.preferences);
}

/// Styled state label.
pub fn state_label(armed: bool) -> String {
    if armed {
        style("ARMED").green().bold().to_string()
    } else {
        style("IDLE").dim().to_string()
    }
}
