//! Replay position source.
//!
//! Feeds a recorded track through the subscription contract, applying the
//! requested interval/distance thresholds the way a platform location
//! service would. Optional pacing inserts a real delay between samples so a
//! replay can be watched.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::sample::PositionSample;
use super::source::{
    PositionError, PositionSource, SampleFilter, Subscription, SubscriptionOptions,
};

/// Channel capacity between the replay task and the consumer.
const REPLAY_CHANNEL_CAPACITY: usize = 64;

/// [`PositionSource`] that replays a fixed list of samples.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    samples: Arc<Vec<PositionSample>>,
    pacing: Option<Duration>,
}

impl ReplaySource {
    /// Replay the given samples in order, as fast as the consumer reads.
    pub fn new(samples: Vec<PositionSample>) -> Self {
        Self {
            samples: Arc::new(samples),
            pacing: None,
        }
    }

    /// Load a track file (a JSON array of samples) to replay.
    pub fn from_track_file(path: impl AsRef<Path>) -> Result<Self, PositionError> {
        Ok(Self::new(load_track(path)?))
    }

    /// Wait `pacing` after each delivered sample.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = Some(pacing);
        self
    }

    /// Number of samples in the track.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the track is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl PositionSource for ReplaySource {
    fn subscribe(&self, options: SubscriptionOptions) -> Result<Subscription, PositionError> {
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|e| PositionError::Unavailable(e.to_string()))?;

        let (tx, rx) = mpsc::channel(REPLAY_CHANNEL_CAPACITY);
        let cancel = CancellationToken::new();

        let samples = Arc::clone(&self.samples);
        let pacing = self.pacing;
        let token = cancel.clone();

        handle.spawn(async move {
            let mut filter = SampleFilter::new(options);
            let mut delivered = 0usize;

            for sample in samples.iter() {
                if !filter.accept(sample) {
                    continue;
                }

                tokio::select! {
                    _ = token.cancelled() => break,
                    sent = tx.send(*sample) => {
                        if sent.is_err() {
                            break;
                        }
                    }
                }
                delivered += 1;

                if let Some(delay) = pacing {
                    tokio::select! {
                        _ = token.cancelled() => break,
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
            }

            debug!(delivered, total = samples.len(), "Replay finished");
        });

        Ok(Subscription::new(rx, cancel))
    }
}

/// Read a track file: a JSON array of [`PositionSample`]s.
pub fn load_track(path: impl AsRef<Path>) -> Result<Vec<PositionSample>, PositionError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| PositionError::TrackRead {
        path: path.to_path_buf(),
        source,
    })?;

    let samples: Vec<PositionSample> =
        serde_json::from_str(&contents).map_err(|e| PositionError::TrackParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    for (index, sample) in samples.iter().enumerate() {
        sample
            .coord
            .validate()
            .map_err(|e| PositionError::TrackParse {
                path: path.to_path_buf(),
                reason: format!("sample {}: {}", index, e),
            })?;
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinate;
    use tempfile::TempDir;

    fn track(n: i64) -> Vec<PositionSample> {
        (0..n)
            .map(|i| {
                PositionSample::new(Coordinate::new(i as f64 * 0.001, 0.0).unwrap(), i * 10_000)
            })
            .collect()
    }

    #[tokio::test]
    async fn test_replay_delivers_all_then_closes() {
        let source = ReplaySource::new(track(5));
        let mut sub = source.subscribe(SubscriptionOptions::foreground()).unwrap();

        let mut received = Vec::new();
        while let Some(sample) = sub.next().await {
            received.push(sample.timestamp_ms);
        }
        assert_eq!(received, vec![0, 10_000, 20_000, 30_000, 40_000]);
    }

    #[tokio::test]
    async fn test_replay_applies_thresholds() {
        // Second sample is too soon for a 5s background interval
        let samples = vec![
            PositionSample::new(Coordinate::new(0.0, 0.0).unwrap(), 0),
            PositionSample::new(Coordinate::new(0.001, 0.0).unwrap(), 1_000),
            PositionSample::new(Coordinate::new(0.002, 0.0).unwrap(), 6_000),
        ];
        let mut sub = ReplaySource::new(samples)
            .subscribe(SubscriptionOptions::background())
            .unwrap();

        let mut received = Vec::new();
        while let Some(sample) = sub.next().await {
            received.push(sample.timestamp_ms);
        }
        assert_eq!(received, vec![0, 6_000]);
    }

    #[tokio::test]
    async fn test_cancel_stops_paced_replay() {
        let source = ReplaySource::new(track(100)).with_pacing(Duration::from_secs(60));
        let mut sub = source.subscribe(SubscriptionOptions::unfiltered()).unwrap();

        assert!(sub.next().await.is_some());
        sub.cancel();
        assert!(sub.next().await.is_none());
    }

    #[test]
    fn test_subscribe_outside_runtime_fails() {
        let result = ReplaySource::new(track(1)).subscribe(SubscriptionOptions::unfiltered());
        assert!(matches!(result, Err(PositionError::Unavailable(_))));
    }

    #[test]
    fn test_load_track_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("track.json");
        std::fs::write(&path, serde_json::to_string(&track(3)).unwrap()).unwrap();

        let source = ReplaySource::from_track_file(&path).unwrap();
        assert_eq!(source.len(), 3);
    }

    #[test]
    fn test_load_track_rejects_invalid_coordinate() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("track.json");
        std::fs::write(
            &path,
            r#"[{"coord":{"latitude":100.0,"longitude":0.0},"timestamp_ms":0}]"#,
        )
        .unwrap();

        let result = load_track(&path);
        assert!(matches!(result, Err(PositionError::TrackParse { .. })));
    }

    #[test]
    fn test_load_track_missing_file() {
        let result = load_track("/nonexistent/track.json");
        assert!(matches!(result, Err(PositionError::TrackRead { .. })));
    }
}
