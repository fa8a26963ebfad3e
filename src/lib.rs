//! # blobtrack-rs
//!
//! Online tracking of motion blobs across video frames.
//!
//! Each frame's blob bounding boxes are matched greedily, nearest first, to
//! existing tracks whose direction of travel agrees with the move. Matched
//! tracks learn their direction and leading edge ("bumper"); unmatched blobs
//! start new tracks; tracks unseen for longer than a timeout are dropped.
//!
//! ## Example
//!
//! ```rust
//! use blobtrack_rs::{BlobTracker, Detection, Direction, TrackerConfig};
//!
//! let mut tracker = BlobTracker::new(TrackerConfig::default()).unwrap();
//! tracker.update(&[Detection::new(90, 40, 20, 20)], 0.0);
//! tracker.update(&[Detection::new(80, 40, 20, 20)], 0.1);
//!
//! let track = tracker.tracks().next().unwrap();
//! assert_eq!(track.direction(), Direction::Left);
//! assert_eq!(track.bumper_x(), Some(80));
//! ```

pub mod error;
pub mod integration;
pub mod tracker;

pub use error::{Result, TrackerError};
pub use integration::{
    BlobFilter, DetectionBuilder, DetectionSource, Frame, IntoDetections, PipelineConfig,
    ReplaySource, RunSummary, StopHandle, TrackerPipeline,
};
pub use tracker::{
    BlobTracker, Detection, Direction, FrameReport, Rect, Track, TrackId, TrackSnapshot,
    TrackerConfig,
};
