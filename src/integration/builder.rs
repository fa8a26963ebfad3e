//! Builder for creating validated Detection objects from various box formats.

use crate::error::{Result, TrackerError};
use crate::tracker::{Detection, Rect};

/// Builder for creating `Detection` objects from various input formats.
///
/// The tracker assumes well-formed boxes, so sources should go through
/// `build`, which rejects negative origins, empty extents and boxes whose
/// edges do not fit in `i32` pixel coordinates.
#[derive(Debug, Clone, Default)]
pub struct DetectionBuilder {
    x: i64,
    y: i64,
    width: i64,
    height: i64,
}

impl DetectionBuilder {
    /// Create a new detection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bounding box in TLBR format (x1, y1, x2, y2).
    pub fn tlbr(mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        self.x = i64::from(x1);
        self.y = i64::from(y1);
        self.width = i64::from(x2) - i64::from(x1);
        self.height = i64::from(y2) - i64::from(y1);
        self
    }

    /// Set bounding box in TLWH format (x, y, width, height), as produced by
    /// a bounding-rect call on a contour.
    pub fn tlwh(mut self, x: i32, y: i32, w: i32, h: i32) -> Self {
        self.x = i64::from(x);
        self.y = i64::from(y);
        self.width = i64::from(w);
        self.height = i64::from(h);
        self
    }

    /// Build the final `Detection`.
    pub fn build(self) -> Result<Detection> {
        let tlwh = [self.x, self.y, self.width, self.height];
        let invalid = |reason: &str| {
            TrackerError::InvalidDetection(format!("bounding box {:?} {}", tlwh, reason))
        };

        if self.x < 0 || self.y < 0 || self.width <= 0 || self.height <= 0 {
            return Err(invalid("must have a non-negative origin and positive size"));
        }

        let right = self.x + self.width;
        let bottom = self.y + self.height;
        let fits = |v: i64| i32::try_from(v).is_ok();
        if !(fits(self.width) && fits(self.height) && fits(right) && fits(bottom)) {
            return Err(invalid("extends past the i32 pixel range"));
        }

        // Every component and both far edges were checked to fit in i32 above.
        let rect = Rect::new(
            self.x as i32,
            self.y as i32,
            self.width as i32,
            self.height as i32,
        );
        Ok(Detection::from_rect(rect))
    }
}
