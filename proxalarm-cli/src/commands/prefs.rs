//! Alert preference commands.

use console::style;
use proxalarm::alarm::{available_sounds, SoundId, VibrationPattern, DEFAULT_CUSTOM_VIBRATION_MS};

use super::common::{apply_preference_flags, print_preferences};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the prefs command.
pub struct PrefsArgs {
    pub sound: Option<SoundId>,
    pub vibration: Option<VibrationPattern>,
    pub custom_vibration_ms: Option<u64>,
    pub verbose: bool,
}

impl PrefsArgs {
    fn is_update(&self) -> bool {
        self.sound.is_some() || self.vibration.is_some() || self.custom_vibration_ms.is_some()
    }
}

/// Show saved preferences, or update them when any flag is given.
///
/// Preferences apply to the next arming; an already armed alarm keeps the
/// preferences it was armed with until re-armed.
pub fn run(args: PrefsArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(args.verbose)?;
    let store = runner.app().store();
    let saved = runner.block_on(store.load_preferences_or_default());

    if !args.is_update() {
        println!("Alert preferences");
        print_preferences(&saved);
        return Ok(());
    }

    runner.log_startup("prefs");
    let prefs = apply_preference_flags(
        saved,
        args.sound,
        args.vibration,
        args.custom_vibration_ms,
    );

    runner.block_on(store.save_preferences(&prefs))?;

    println!("{} Preferences saved", style("✓").green());
    print_preferences(&prefs);
    Ok(())
}

/// List the sound catalogue and vibration patterns.
pub fn run_sounds() -> Result<(), CliError> {
    println!("Sounds");
    println!("======");
    for asset in available_sounds() {
        println!(
            "  {:<8} {:<12} ios: {:<24} android: {}",
            asset.id.as_str(),
            asset.display_name,
            asset.ios_sound,
            asset.android_id
        );
    }

    println!();
    println!("Vibration patterns");
    println!("==================");
    for pattern in [
        VibrationPattern::Light,
        VibrationPattern::Medium,
        VibrationPattern::Heavy,
        VibrationPattern::Intense,
        VibrationPattern::Custom,
    ] {
        println!(
            "  {:<8} {:?}",
            pattern.as_str(),
            pattern.timings(DEFAULT_CUSTOM_VIBRATION_MS)
        );
    }
    Ok(())
}
