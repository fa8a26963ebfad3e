//! Size filter applied to blobs before they reach the tracker.

use serde::{Deserialize, Serialize};

use crate::tracker::Detection;

/// Drops blobs too small to be vehicles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlobFilter {
    /// Area in square pixels a blob must exceed
    pub min_area: i64,
    /// Width in pixels a blob must exceed; 0 disables the width check
    pub min_width: i32,
}

impl Default for BlobFilter {
    fn default() -> Self {
        Self {
            min_area: 500,
            min_width: 0,
        }
    }
}

impl BlobFilter {
    /// Accept everything.
    pub fn permissive() -> Self {
        Self {
            min_area: 0,
            min_width: 0,
        }
    }

    #[inline]
    pub fn accepts(&self, detection: &Detection) -> bool {
        detection.bbox.area() > self.min_area && detection.bbox.width > self.min_width
    }

    /// Keep the accepted detections, preserving their order.
    pub fn apply(&self, detections: Vec<Detection>) -> Vec<Detection> {
        detections.into_iter().filter(|d| self.accepts(d)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters_on_area_only() {
        let filter = BlobFilter::default();
        // 50 x 30 = 1500, narrow but large enough
        assert!(filter.accepts(&Detection::new(100, 10, 50, 30)));
        // 100 x 5 = 500, area not exceeded
        assert!(!filter.accepts(&Detection::new(0, 0, 100, 5)));
        // 100 x 6 = 600
        assert!(filter.accepts(&Detection::new(0, 0, 100, 6)));
    }

    #[test]
    fn test_min_width_is_strict_when_enabled() {
        let filter = BlobFilter {
            min_width: 60,
            ..Default::default()
        };
        assert!(filter.accepts(&Detection::new(0, 0, 61, 9)));
        assert!(!filter.accepts(&Detection::new(0, 0, 60, 20)));
    }

    #[test]
    fn test_apply_keeps_order() {
        let filter = BlobFilter {
            min_area: 10,
            min_width: 1,
        };
        let kept = filter.apply(vec![
            Detection::new(0, 0, 5, 5),
            Detection::new(0, 0, 2, 2),
            Detection::new(10, 0, 4, 4),
        ]);
        assert_eq!(kept, vec![Detection::new(0, 0, 5, 5), Detection::new(10, 0, 4, 4)]);
    }

    #[test]
    fn test_permissive_accepts_unit_box() {
        assert!(BlobFilter::permissive().accepts(&Detection::new(0, 0, 1, 1)));
    }
}
