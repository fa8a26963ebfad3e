use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box of a motion blob, in integer pixel coordinates.
///
/// Supports two bounding box layouts:
/// - TLWH: Top-Left X, Top-Left Y, Width, Height
/// - TLBR: Top-Left X, Top-Left Y, Bottom-Right X, Bottom-Right Y
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: i32,
    /// Top-left y coordinate
    pub y: i32,
    /// Width of the bounding box
    pub width: i32,
    /// Height of the bounding box
    pub height: i32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [i32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [i32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    /// Integer centroid of the box. Half extents are truncated.
    #[inline]
    pub fn center(&self) -> Point2<i32> {
        Point2::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Left edge, the bumper of a blob travelling left.
    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    /// Right edge, the bumper of a blob travelling right.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Get the area of the bounding box.
    #[inline]
    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }

    /// Non-negative origin, strictly positive extents, and far edges that
    /// fit in `i32`.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.width > 0
            && self.height > 0
            && self.x.checked_add(self.width).is_some()
            && self.y.checked_add(self.height).is_some()
    }
}
