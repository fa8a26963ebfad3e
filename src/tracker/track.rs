//! Single blob track: identity, timing, direction, bumper and centroid trail.

use std::collections::VecDeque;
use std::fmt;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::tracker::direction::Direction;
use crate::tracker::matching::Detection;

/// Track identifier, unique for the lifetime of a tracker and never reused.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TrackId(pub u64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

/// A tracked blob.
///
/// The trail is ordered newest first and is never empty, so `trail[0]` is the
/// centroid of the latest detection attributed to this track.
#[derive(Debug, Clone)]
pub struct Track {
    id: TrackId,
    first_seen: f64,
    last_seen: f64,
    direction: Direction,
    bumper_x: Option<i32>,
    trail: VecDeque<Point2<i32>>,
}

impl Track {
    /// Create a new track from an unmatched detection.
    pub(crate) fn new(id: TrackId, detection: &Detection, now: f64) -> Self {
        let mut trail = VecDeque::new();
        trail.push_front(detection.centroid());
        Self {
            id,
            first_seen: now,
            last_seen: now,
            direction: Direction::Unknown,
            bumper_x: None,
            trail,
        }
    }

    /// Attribute a matched detection to this track.
    ///
    /// Direction and bumper follow the displacement from the previous head of
    /// the trail; the new centroid becomes the head.
    pub(crate) fn apply_match(
        &mut self,
        detection: &Detection,
        now: f64,
        max_trail_len: Option<usize>,
    ) {
        let prev = self.head();
        let center = detection.centroid();

        self.direction = Direction::from_displacement(prev.x, center.x);
        self.bumper_x = Some(match self.direction {
            Direction::Left => detection.bbox.left(),
            _ => detection.bbox.right(),
        });

        self.trail.push_front(center);
        if let Some(cap) = max_trail_len {
            self.trail.truncate(cap);
        }
        self.last_seen = self.last_seen.max(now);
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    pub fn first_seen(&self) -> f64 {
        self.first_seen
    }

    pub fn last_seen(&self) -> f64 {
        self.last_seen
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Leading edge x coordinate, present once a direction is known.
    pub fn bumper_x(&self) -> Option<i32> {
        self.bumper_x
    }

    /// Centroid history, newest first.
    pub fn trail(&self) -> &VecDeque<Point2<i32>> {
        &self.trail
    }

    /// Most recent centroid.
    #[inline]
    pub fn head(&self) -> Point2<i32> {
        self.trail[0]
    }

    /// Seconds between the first and the latest detection.
    pub fn age(&self) -> f64 {
        self.last_seen - self.first_seen
    }

    #[inline]
    pub fn is_expired(&self, now: f64, timeout: f64) -> bool {
        now - self.last_seen > timeout
    }

    /// Consecutive `(newer, older)` centroid pairs, ready to be drawn as segments.
    pub fn trail_segments(&self) -> impl Iterator<Item = (Point2<i32>, Point2<i32>)> + '_ {
        self.trail.iter().zip(self.trail.iter().skip(1)).map(|(a, b)| (*a, *b))
    }

    pub fn snapshot(&self) -> TrackSnapshot {
        TrackSnapshot {
            id: self.id.to_string(),
            direction: self.direction,
            bumper_x: self.bumper_x,
            trail: self.trail.iter().map(|p| [p.x, p.y]).collect(),
            first_seen: self.first_seen,
            last_seen: self.last_seen,
        }
    }
}

/// Serializable, renderer-facing copy of a track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSnapshot {
    pub id: String,
    pub direction: Direction,
    pub bumper_x: Option<i32>,
    /// Centroids as `[x, y]`, newest first
    pub trail: Vec<[i32; 2]>,
    pub first_seen: f64,
    pub last_seen: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det_at(cx: i32, cy: i32) -> Detection {
        Detection::new(cx - 10, cy - 10, 20, 20)
    }

    #[test]
    fn test_new_track() {
        let track = Track::new(TrackId(1), &det_at(100, 50), 2.0);
        assert_eq!(track.direction(), Direction::Unknown);
        assert_eq!(track.bumper_x(), None);
        assert_eq!(track.trail().len(), 1);
        assert_eq!(track.head(), Point2::new(100, 50));
        assert_eq!(track.first_seen(), 2.0);
        assert_eq!(track.last_seen(), 2.0);
    }

    #[test]
    fn test_match_moving_left_uses_left_edge() {
        let mut track = Track::new(TrackId(1), &det_at(100, 50), 0.0);
        track.apply_match(&det_at(90, 50), 0.1, None);
        assert_eq!(track.direction(), Direction::Left);
        assert_eq!(track.bumper_x(), Some(80));
        assert_eq!(track.head(), Point2::new(90, 50));
        assert_eq!(track.last_seen(), 0.1);
        assert!((track.age() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_match_moving_right_uses_right_edge() {
        let mut track = Track::new(TrackId(1), &det_at(100, 50), 0.0);
        track.apply_match(&det_at(110, 50), 0.1, None);
        assert_eq!(track.direction(), Direction::Right);
        assert_eq!(track.bumper_x(), Some(120));
    }

    #[test]
    fn test_direction_is_not_sticky() {
        let mut track = Track::new(TrackId(1), &det_at(100, 50), 0.0);
        track.apply_match(&det_at(90, 50), 0.1, None);
        track.apply_match(&det_at(95, 50), 0.2, None);
        assert_eq!(track.direction(), Direction::Right);
    }

    #[test]
    fn test_trail_cap_drops_oldest() {
        let mut track = Track::new(TrackId(1), &det_at(100, 50), 0.0);
        for (i, x) in [90, 80, 70].into_iter().enumerate() {
            track.apply_match(&det_at(x, 50), 0.1 * (i + 1) as f64, Some(2));
        }
        let trail: Vec<_> = track.trail().iter().map(|p| p.x).collect();
        assert_eq!(trail, vec![70, 80]);
    }

    #[test]
    fn test_trail_segments_pair_newest_first() {
        let mut track = Track::new(TrackId(1), &det_at(100, 50), 0.0);
        assert_eq!(track.trail_segments().count(), 0);
        track.apply_match(&det_at(90, 50), 0.1, None);
        track.apply_match(&det_at(80, 50), 0.2, None);
        let segments: Vec<_> = track.trail_segments().collect();
        assert_eq!(
            segments,
            vec![
                (Point2::new(80, 50), Point2::new(90, 50)),
                (Point2::new(90, 50), Point2::new(100, 50)),
            ]
        );
    }

    #[test]
    fn test_expiry_is_strict() {
        let track = Track::new(TrackId(1), &det_at(100, 50), 1.0);
        assert!(!track.is_expired(1.5, 0.5));
        assert!(track.is_expired(1.5001, 0.5));
    }

    #[test]
    fn test_snapshot_and_id_format() {
        let track = Track::new(TrackId(0x2a), &det_at(100, 50), 1.0);
        let snapshot = track.snapshot();
        assert_eq!(snapshot.id, "0000002a");
        assert_eq!(snapshot.trail, vec![[100, 50]]);
        assert_eq!(snapshot.bumper_x, None);
    }
}
