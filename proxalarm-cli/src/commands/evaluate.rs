//! Evaluate command - one background invocation.
//!
//! Simulates the platform waking the app with a batch of fixes: the batch is
//! thinned with the `[background]` thresholds, then a fresh engine recovers
//! from the store and evaluates the newest remaining sample.

use std::path::PathBuf;

use console::style;
use proxalarm::engine::{IgnoreReason, Observation};
use proxalarm::position::{load_track, PositionSample, SampleFilter, SubscriptionOptions};
use tracing::debug;

use super::common::{format_distance, parse_position};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the evaluate command.
pub struct EvaluateArgs {
    /// `LAT,LON` positions, oldest first.
    pub positions: Vec<String>,
    /// Track file whose samples form the batch.
    pub file: Option<PathBuf>,
    /// Keep every sample instead of applying the background thresholds.
    pub unfiltered: bool,
    pub verbose: bool,
}

/// Build the batch from the arguments.
///
/// `--at` positions are stamped `spacing_ms` apart so that they are not
/// dropped by the interval threshold alone.
fn build_batch(args: &EvaluateArgs, spacing_ms: u64) -> Result<Vec<PositionSample>, CliError> {
    let mut batch = match &args.file {
        Some(path) => load_track(path)?,
        None => Vec::new(),
    };

    let spacing = spacing_ms.max(1) as i64;
    for (offset, position) in args.positions.iter().enumerate() {
        let mut sample = PositionSample::now(parse_position(position)?);
        sample.timestamp_ms += offset as i64 * spacing;
        batch.push(sample);
    }

    if batch.is_empty() {
        return Err(CliError::InvalidArgument(
            "provide at least one --at LAT,LON or a --file".to_string(),
        ));
    }
    Ok(batch)
}

/// Drop samples the platform would not have delivered under `options`.
fn filter_batch(batch: Vec<PositionSample>, options: SubscriptionOptions) -> Vec<PositionSample> {
    let mut filter = SampleFilter::new(options);
    batch
        .into_iter()
        .filter(|sample| filter.accept(sample))
        .collect()
}

/// Run the evaluate command.
pub fn run(args: EvaluateArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(args.verbose)?;
    runner.log_startup("evaluate");

    let options = runner.config().background;
    let batch = build_batch(&args, options.min_interval_ms)?;
    let batch = if args.unfiltered {
        batch
    } else {
        let total = batch.len();
        let kept = filter_batch(batch, options);
        debug!(total, kept = kept.len(), "Applied background thresholds");
        kept
    };

    let observation = runner.block_on(runner.app().evaluate_background(&batch));
    report(&observation);
    Ok(())
}

fn report(observation: &Observation) {
    match observation {
        Observation::Ignored(IgnoreReason::NotArmed) => {
            println!("Alarm not armed; nothing to do");
        }
        Observation::Ignored(reason) => {
            println!("Sample ignored: {:?}", reason);
        }
        Observation::Outside {
            distance_meters,
            radius_meters,
        } => {
            println!(
                "Still outside: {} from target (radius {})",
                format_distance(*distance_meters),
                format_distance(*radius_meters)
            );
        }
        Observation::Cancelled { distance_meters } => {
            println!(
                "Inside radius at {}, but the alarm was disarmed elsewhere",
                format_distance(*distance_meters)
            );
        }
        Observation::Triggered(report) => {
            println!(
                "{} Arrived within {} of target; alarm disarmed",
                style("✓").green(),
                format_distance(report.distance_meters)
            );
            if let Err(e) = &report.dispatch {
                println!("{} Notification failed: {}", style("!").yellow(), e);
            }
            if let Err(e) = &report.disarm {
                println!(
                    "{} Could not persist disarm ({}); run 'proxalarm disarm'",
                    style("!").yellow(),
                    e
                );
            }
        }
    }
}
