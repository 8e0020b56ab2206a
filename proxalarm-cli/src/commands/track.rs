//! Track command - foreground tracking over a recorded track.
//!
//! Replays a track file through the foreground subscription thresholds and
//! prints the distance readout until the alarm fires, the track ends, or
//! Ctrl+C detaches (leaving the alarm armed for background invocations).

use std::path::PathBuf;
use std::time::Duration;

use console::style;
use proxalarm::engine::{ForegroundTracker, TrackingOutcome};
use proxalarm::position::{PositionSource, ReplaySource, SubscriptionOptions};

use super::common::format_distance;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the track command.
pub struct TrackArgs {
    pub file: PathBuf,
    /// Delay between replayed samples.
    pub pace_ms: u64,
    /// Deliver every sample regardless of interval/distance thresholds.
    pub unfiltered: bool,
    pub verbose: bool,
}

/// Run the track command.
pub fn run(args: TrackArgs) -> Result<(), CliError> {
    let mut source = ReplaySource::from_track_file(&args.file)?;
    if args.pace_ms > 0 {
        source = source.with_pacing(Duration::from_millis(args.pace_ms));
    }

    let runner = CliRunner::new(args.verbose)?;
    runner.log_startup("track");

    let options = if args.unfiltered {
        SubscriptionOptions::unfiltered()
    } else {
        runner.config().foreground
    };

    println!("Proxalarm foreground tracking v{}", proxalarm::VERSION);
    println!("================================");
    println!();
    println!("Track:    {} ({} samples)", args.file.display(), source.len());
    println!(
        "Filter:   every {} ms / {} m",
        options.min_interval_ms, options.min_distance_meters
    );
    println!();
    println!("Press Ctrl+C to stop tracking (the alarm stays armed)");
    println!();

    let outcome = runner.block_on(async {
        let subscription = source.subscribe(options)?;
        let handle = ForegroundTracker::spawn(runner.app().engine(), subscription);

        let cancel = handle.cancellation_token();
        ctrlc::set_handler(move || {
            println!();
            println!("Received interrupt, detaching...");
            cancel.cancel();
        })
        .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;

        let mut status = handle.subscribe_status();
        let printer = tokio::spawn(async move {
            while status.changed().await.is_ok() {
                let snapshot = *status.borrow_and_update();
                if let Some(distance) = snapshot.distance_meters {
                    println!(
                        "  #{:<4} {:<10} {}",
                        snapshot.samples_seen,
                        snapshot.state.display_status(),
                        format_distance(distance)
                    );
                }
            }
        });

        let outcome = handle.wait().await?;
        // Sender is gone once the task ends, so the printer drains and exits
        let _ = printer.await;
        Ok::<_, CliError>(outcome)
    })?;

    println!();
    match outcome {
        TrackingOutcome::Triggered(report) => {
            println!(
                "{} Arrived within {}; alarm disarmed",
                style("✓").green(),
                format_distance(report.distance_meters)
            );
        }
        TrackingOutcome::Disarmed { .. } => println!("Alarm was disarmed; tracking stopped"),
        TrackingOutcome::NotArmed => {
            println!("Alarm is not armed. Use 'proxalarm arm LAT,LON' first.");
        }
        TrackingOutcome::Detached => println!("Tracking detached; alarm still armed"),
        TrackingOutcome::SourceClosed => println!("Track ended before arrival; alarm still armed"),
    }
    Ok(())
}
