//! Arm, disarm and status commands.

use console::style;
use proxalarm::alarm::{AlarmConfig, SoundId, VibrationPattern};
use proxalarm::coord::distance_meters;

use super::common::{
    apply_preference_flags, format_distance, parse_position, print_arming, state_label,
};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the arm command.
pub struct ArmArgs {
    pub target: String,
    pub radius: Option<f64>,
    pub sound: Option<SoundId>,
    pub vibration: Option<VibrationPattern>,
    pub custom_vibration_ms: Option<u64>,
    pub verbose: bool,
}

/// Run the arm command.
pub fn run_arm(args: ArmArgs) -> Result<(), CliError> {
    let target = parse_position(&args.target)?;

    let runner = CliRunner::new(args.verbose)?;
    runner.log_startup("arm");
    let radius = args.radius.unwrap_or(runner.config().alarm.default_radius);

    // Saved preferences are the base; flags override them
    let saved = runner.block_on(runner.app().store().load_preferences_or_default());
    let prefs = apply_preference_flags(
        saved,
        args.sound,
        args.vibration,
        args.custom_vibration_ms,
    );

    let config = AlarmConfig::builder()
        .target(target)
        .radius_meters(radius)
        .preferences(prefs)
        .build()
        .map_err(|e| CliError::InvalidArgument(e.to_string()))?;

    let mut engine = runner.app().engine();
    runner.block_on(engine.arm(config))?;

    println!("{} Alarm {}", style("✓").green(), state_label(true));
    print_arming(&config);
    Ok(())
}

/// Run the disarm command.
pub fn run_disarm(verbose: bool) -> Result<(), CliError> {
    let runner = CliRunner::new(verbose)?;
    runner.log_startup("disarm");

    let mut engine = runner.app().engine();
    let was_armed = runner.block_on(engine.recover()).is_armed();
    runner.block_on(engine.disarm())?;

    if was_armed {
        println!("{} Alarm disarmed", style("✓").green());
    } else {
        println!("Alarm was not armed");
    }
    Ok(())
}

/// Run the status command, optionally reporting distance from `from`.
pub fn run_status(from: Option<String>, verbose: bool) -> Result<(), CliError> {
    let from = from.as_deref().map(parse_position).transpose()?;

    let runner = CliRunner::new(verbose)?;
    let arming = runner.block_on(runner.app().store().load_arming())?;

    match arming {
        Some(config) => {
            println!("Alarm: {}", state_label(true));
            print_arming(&config);
            if let Some(position) = from {
                let distance = distance_meters(&position, &config.target);
                let inside = distance <= config.radius_meters;
                println!(
                    "  Distance:   {}{}",
                    format_distance(distance),
                    if inside { " (inside radius)" } else { "" }
                );
            }
        }
        None => {
            println!("Alarm: {}", state_label(false));
            let prefs = runner.block_on(runner.app().store().load_preferences_or_default());
            println!("  Sound:      {}", prefs.sound.asset().display_name);
            println!("  Vibration:  {}", prefs.vibration);
        }
    }
    Ok(())
}
