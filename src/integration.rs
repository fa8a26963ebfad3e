//! Integration module for connecting blob detection sources with the tracker.
//!
//! This module provides the source trait, upstream validation and size
//! filtering, a recorded-frame replay source, and the frame-loop pipeline.

mod builder;
mod detector;
mod filter;
mod pipeline;
mod replay;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, Frame, IntoDetections};
pub use filter::BlobFilter;
pub use pipeline::{PipelineConfig, RunSummary, StopHandle, TrackerPipeline};
pub use replay::{FrameRecord, ReplaySource};
