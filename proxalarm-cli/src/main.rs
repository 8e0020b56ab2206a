//! Proxalarm CLI - command-line front end for the proximity alarm engine.
//!
//! Arms and disarms the alarm, runs single background-style evaluations,
//! replays recorded tracks in the foreground, and prints alerts to the
//! terminal.

mod commands;
mod error;
mod notifier;
mod runner;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use console::style;
use proxalarm::alarm::{SoundId, VibrationPattern};

use commands::alarm::ArmArgs;
use commands::config::ConfigCommands;
use commands::evaluate::EvaluateArgs;
use commands::prefs::PrefsArgs;
use commands::track::TrackArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "proxalarm", version, about = "Get alerted when you arrive near a destination")]
struct Cli {
    /// Mirror log output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Arm the alarm around a destination
    Arm {
        /// Destination as LAT,LON
        #[arg(allow_hyphen_values = true)]
        target: String,

        /// Alarm radius in meters (default: alarm.default_radius)
        #[arg(short, long)]
        radius: Option<f64>,

        /// Alert sound: bell, alarm, chime, beep, siren
        #[arg(long)]
        sound: Option<SoundId>,

        /// Vibration pattern: light, medium, heavy, intense, custom
        #[arg(long)]
        vibration: Option<VibrationPattern>,

        /// Pulse length in ms for the custom vibration pattern
        #[arg(long)]
        custom_vibration_ms: Option<u64>,
    },

    /// Disarm the alarm without alerting
    Disarm,

    /// Show whether the alarm is armed
    Status {
        /// Current position as LAT,LON, to show the remaining distance
        #[arg(long, allow_hyphen_values = true)]
        from: Option<String>,
    },

    /// Show or change the saved alert preferences
    Prefs {
        /// Alert sound: bell, alarm, chime, beep, siren
        #[arg(long)]
        sound: Option<SoundId>,

        /// Vibration pattern: light, medium, heavy, intense, custom
        #[arg(long)]
        vibration: Option<VibrationPattern>,

        /// Pulse length in ms for the custom vibration pattern
        #[arg(long)]
        custom_vibration_ms: Option<u64>,
    },

    /// List available sounds and vibration patterns
    Sounds,

    /// Evaluate one batch of positions as a background invocation would
    Evaluate {
        /// Position as LAT,LON; repeat for a batch, oldest first
        #[arg(long = "at", allow_hyphen_values = true)]
        positions: Vec<String>,

        /// JSON track file to use as the batch
        #[arg(long)]
        file: Option<PathBuf>,

        /// Evaluate the whole batch, ignoring the background thresholds
        #[arg(long)]
        unfiltered: bool,
    },

    /// Track a recorded route in the foreground until arrival
    Track {
        /// JSON track file (array of samples)
        file: PathBuf,

        /// Delay between samples in milliseconds
        #[arg(long, default_value_t = 0)]
        pace_ms: u64,

        /// Deliver every sample, ignoring the foreground thresholds
        #[arg(long)]
        unfiltered: bool,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn run(cli: Cli) -> Result<(), CliError> {
    let verbose = cli.verbose;
    match cli.command {
        Commands::Arm {
            target,
            radius,
            sound,
            vibration,
            custom_vibration_ms,
        } => commands::alarm::run_arm(ArmArgs {
            target,
            radius,
            sound,
            vibration,
            custom_vibration_ms,
            verbose,
        }),
        Commands::Disarm => commands::alarm::run_disarm(verbose),
        Commands::Status { from } => commands::alarm::run_status(from, verbose),
        Commands::Prefs {
            sound,
            vibration,
            custom_vibration_ms,
        } => commands::prefs::run(PrefsArgs {
            sound,
            vibration,
            custom_vibration_ms,
            verbose,
        }),
        Commands::Sounds => commands::prefs::run_sounds(),
        Commands::Evaluate {
            positions,
            file,
            unfiltered,
        } => commands::evaluate::run(EvaluateArgs {
            positions,
            file,
            unfiltered,
            verbose,
        }),
        Commands::Track {
            file,
            pace_ms,
            unfiltered,
        } => commands::track::run(TrackArgs {
            file,
            pace_ms,
            unfiltered,
            verbose,
        }),
        Commands::Config { command } => commands::config::run(command),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_arm_with_negative_longitude() {
        let cli = Cli::try_parse_from([
            "proxalarm",
            "arm",
            "51.5007,-0.1246",
            "--radius",
            "250",
            "--sound",
            "siren",
            "--vibration",
            "heavy",
        ])
        .unwrap();

        let Commands::Arm {
            target,
            radius,
            sound,
            vibration,
            ..
        } = cli.command
        else {
            panic!("expected arm");
        };
        assert_eq!(target, "51.5007,-0.1246");
        assert_eq!(radius, Some(250.0));
        assert_eq!(sound, Some(SoundId::Siren));
        assert_eq!(vibration, Some(VibrationPattern::Heavy));
    }

    #[test]
    fn test_parse_evaluate_batch() {
        let cli =
            Cli::try_parse_from(["proxalarm", "evaluate", "--at", "1,2", "--at", "-3,4"]).unwrap();
        let Commands::Evaluate { positions, .. } = cli.command else {
            panic!("expected evaluate");
        };
        assert_eq!(positions, vec!["1,2", "-3,4"]);
    }

    #[test]
    fn test_unknown_sound_rejected() {
        assert!(Cli::try_parse_from(["proxalarm", "prefs", "--sound", "gong"]).is_err());
    }
}
