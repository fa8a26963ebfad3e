//! Track registry and the per-frame update loop.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, TrackerError};
use crate::tracker::matching::{self, Detection, MatchDecision};
use crate::tracker::track::{Track, TrackId, TrackSnapshot};

/// Configuration for the BlobTracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Centroids must be strictly closer than this (pixels) to lock on
    pub lock_on_distance: f64,
    /// Seconds a track may go unmatched before it is dropped
    pub track_timeout: f64,
    /// Optional cap on trail length; `None` keeps the full history
    pub max_trail_len: Option<usize>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            lock_on_distance: 80.0,
            track_timeout: 0.7,
            max_trail_len: None,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.lock_on_distance.is_finite() || self.lock_on_distance <= 0.0 {
            return Err(TrackerError::InvalidConfig(format!(
                "lock_on_distance must be a positive number, got {}",
                self.lock_on_distance
            )));
        }
        if !self.track_timeout.is_finite() || self.track_timeout < 0.0 {
            return Err(TrackerError::InvalidConfig(format!(
                "track_timeout must be a non-negative number, got {}",
                self.track_timeout
            )));
        }
        if self.max_trail_len == Some(0) {
            return Err(TrackerError::InvalidConfig(
                "max_trail_len must keep at least one point".to_string(),
            ));
        }
        Ok(())
    }
}

/// What happened to the registry during one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// 1-based frame counter
    pub frame: u64,
    /// Timestamp the frame was processed at
    pub timestamp: f64,
    /// Detections attributed to an existing track
    pub matched: usize,
    /// Detections that spawned a new track
    pub created: usize,
    /// Tracks dropped by the expiry pass
    pub expired: Vec<TrackId>,
}

pub struct BlobTracker {
    tracks: BTreeMap<TrackId, Track>,
    next_id: u64,
    frame_count: u64,
    last_frame_time: Option<f64>,
    config: TrackerConfig,
}

impl Default for BlobTracker {
    fn default() -> Self {
        Self::from_valid_config(TrackerConfig::default())
    }
}

impl BlobTracker {
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: TrackerConfig) -> Self {
        Self {
            tracks: BTreeMap::new(),
            next_id: 1,
            frame_count: 0,
            last_frame_time: None,
            config,
        }
    }

    /// Process one frame worth of detections taken at `now` (seconds).
    ///
    /// Detections are handled in the given order, so a later detection sees
    /// any track already moved by an earlier one in the same frame. The
    /// expiry pass runs once, after every detection.
    pub fn update(&mut self, detections: &[Detection], now: f64) -> FrameReport {
        self.frame_count += 1;
        let now = self.monotonic(now);

        let mut report = FrameReport {
            frame: self.frame_count,
            timestamp: now,
            ..FrameReport::default()
        };

        for det in detections {
            match matching::find_match(&self.tracks, det, self.config.lock_on_distance) {
                MatchDecision::Existing(id) => {
                    if let Some(track) = self.tracks.get_mut(&id) {
                        track.apply_match(det, now, self.config.max_trail_len);
                        debug!(
                            track = %id,
                            direction = track.direction().as_str(),
                            bumper_x = ?track.bumper_x(),
                            "matched detection"
                        );
                        report.matched += 1;
                    }
                }
                MatchDecision::CreateNew => {
                    let id = self.next_track_id();
                    let track = Track::new(id, det, now);
                    debug!(track = %id, x = track.head().x, y = track.head().y, "new track");
                    self.tracks.insert(id, track);
                    report.created += 1;
                }
            }
        }

        report.expired = self.expire(now);
        report
    }

    fn expire(&mut self, now: f64) -> Vec<TrackId> {
        let timeout = self.config.track_timeout;
        let mut expired = Vec::new();
        self.tracks.retain(|id, track| {
            if track.is_expired(now, timeout) {
                info!(track = %id, "Removing expired track");
                expired.push(*id);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Clamp a timestamp that runs backwards to the previous frame's time.
    fn monotonic(&mut self, now: f64) -> f64 {
        let now = match self.last_frame_time {
            Some(prev) if now < prev => {
                warn!(previous = prev, current = now, "frame timestamp went backwards");
                prev
            }
            _ => now,
        };
        self.last_frame_time = Some(now);
        now
    }

    fn next_track_id(&mut self) -> TrackId {
        let id = TrackId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Active tracks in creation order.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(&id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn snapshots(&self) -> Vec<TrackSnapshot> {
        self.tracks().map(Track::snapshot).collect()
    }
}
