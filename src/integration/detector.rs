//! Trait for upstream blob detection sources.

use crate::tracker::{Detection, Rect};

/// One frame tick: a timestamp and the blobs found in that frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Monotonic clock reading in seconds
    pub timestamp: f64,
    pub detections: Vec<Detection>,
}

impl Frame {
    pub fn new(timestamp: f64, detections: impl IntoDetections) -> Self {
        Self {
            timestamp,
            detections: detections.into_detections(),
        }
    }
}

/// Trait for anything that yields per-frame blob detections.
///
/// Implement this trait to connect a camera, a background-subtraction stage
/// or a recorded log to the tracker.
///
/// # Example
///
/// ```ignore
/// use blobtrack_rs::{DetectionSource, Frame};
///
/// struct MyCamera {
///     // Capture handle and background model here
/// }
///
/// impl DetectionSource for MyCamera {
///     type Error = std::io::Error;
///
///     fn next_frame(&mut self) -> Result<Option<Frame>, Self::Error> {
///         // Grab, diff against the background, extract contours
///         Ok(None)
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error;

    /// Fetch the next frame.
    ///
    /// Blocks until a frame is available. `Ok(None)` means the source is
    /// exhausted, which ends tracking normally.
    fn next_frame(&mut self) -> Result<Option<Frame>, Self::Error>;
}

/// Helper trait for converting source-specific outputs to `Detection`.
pub trait IntoDetections {
    /// Convert the output into a vector of detections.
    fn into_detections(self) -> Vec<Detection>;
}

impl IntoDetections for Vec<Detection> {
    fn into_detections(self) -> Vec<Detection> {
        self
    }
}

impl IntoDetections for Vec<Rect> {
    fn into_detections(self) -> Vec<Detection> {
        self.into_iter().map(Detection::from_rect).collect()
    }
}
