//! TrackerPipeline for driving the tracker from a detection source.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::tracker::{BlobTracker, FrameReport, TrackerConfig};

use super::{BlobFilter, DetectionSource};

/// Tunables for a whole pipeline, loadable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub tracker: TrackerConfig,
    pub filter: BlobFilter,
}

/// Cloneable handle that asks a running pipeline to stop.
///
/// The flag is checked between frames, so the frame in flight always
/// finishes before the loop exits.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn request_stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Totals for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub tracks_created: usize,
    pub tracks_expired: usize,
    /// True when the loop ended on a stop request rather than end of input
    pub stopped: bool,
}

/// Bundles a `DetectionSource`, the upstream size filter and the tracker.
///
/// Frames are processed strictly one at a time: fetch, filter, match and
/// update, expire.
pub struct TrackerPipeline<D: DetectionSource> {
    source: D,
    filter: BlobFilter,
    tracker: BlobTracker,
    stop: StopHandle,
}

impl<D: DetectionSource> TrackerPipeline<D> {
    /// Create a new tracking pipeline with the given source and config.
    pub fn new(source: D, config: PipelineConfig) -> Result<Self> {
        Ok(Self {
            source,
            filter: config.filter,
            tracker: BlobTracker::new(config.tracker)?,
            stop: StopHandle::default(),
        })
    }

    /// Create a new tracking pipeline with default configuration.
    pub fn with_default_config(source: D) -> Self {
        Self {
            source,
            filter: BlobFilter::default(),
            tracker: BlobTracker::default(),
            stop: StopHandle::default(),
        }
    }

    /// Process a single frame.
    ///
    /// # Returns
    /// The frame's report, `None` once the source is exhausted, or a source error.
    pub fn process_next(&mut self) -> std::result::Result<Option<FrameReport>, D::Error> {
        let Some(frame) = self.source.next_frame()? else {
            return Ok(None);
        };

        let total = frame.detections.len();
        let detections = self.filter.apply(frame.detections);
        if detections.len() < total {
            debug!(
                dropped = total - detections.len(),
                "filtered undersized blobs"
            );
        }

        Ok(Some(self.tracker.update(&detections, frame.timestamp)))
    }

    /// Run until end of input or a stop request, calling `on_frame` after each frame.
    pub fn run<F>(&mut self, mut on_frame: F) -> std::result::Result<RunSummary, D::Error>
    where
        F: FnMut(&BlobTracker, &FrameReport),
    {
        let mut summary = RunSummary::default();

        loop {
            if self.stop.is_stop_requested() {
                summary.stopped = true;
                break;
            }
            let Some(report) = self.process_next()? else {
                break;
            };
            summary.frames += 1;
            summary.tracks_created += report.created;
            summary.tracks_expired += report.expired.len();
            on_frame(&self.tracker, &report);
        }

        info!(
            frames = summary.frames,
            created = summary.tracks_created,
            expired = summary.tracks_expired,
            stopped = summary.stopped,
            "tracking finished"
        );
        Ok(summary)
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Get a reference to the underlying source.
    pub fn source(&self) -> &D {
        &self.source
    }

    /// Get a mutable reference to the underlying source.
    pub fn source_mut(&mut self) -> &mut D {
        &mut self.source
    }

    pub fn filter(&self) -> &BlobFilter {
        &self.filter
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &BlobTracker {
        &self.tracker
    }
}
