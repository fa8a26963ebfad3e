//! Greedy nearest-first matching of detections to tracks.

use std::collections::BTreeMap;

use nalgebra::Point2;
use ndarray::Array1;

use crate::tracker::rect::Rect;
use crate::tracker::track::{Track, TrackId};

/// Detection input for the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    /// Bounding box in TLWH format (x, y, width, height)
    pub bbox: Rect,
}

impl Detection {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            bbox: Rect::new(x, y, width, height),
        }
    }

    pub fn from_rect(bbox: Rect) -> Self {
        Self { bbox }
    }

    #[inline]
    pub fn centroid(&self) -> Point2<i32> {
        self.bbox.center()
    }
}

/// Outcome of matching one detection against the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchDecision {
    /// Update this existing track
    Existing(TrackId),
    /// No track qualifies; spawn a new one
    CreateNew,
}

/// Euclidean pixel distance between two centroids.
#[inline]
pub fn centroid_distance(a: &Point2<i32>, b: &Point2<i32>) -> f64 {
    (a.cast::<f64>() - b.cast::<f64>()).norm()
}

/// Distance from `centroid` to the head of every track, in iteration order.
pub fn centroid_distances<'a, I>(centroid: &Point2<i32>, tracks: I) -> Array1<f64>
where
    I: IntoIterator<Item = &'a Track>,
{
    tracks
        .into_iter()
        .map(|t| centroid_distance(centroid, &t.head()))
        .collect()
}

/// Find the track a detection belongs to.
///
/// Candidates are visited nearest first (ties keep registry order, which is
/// creation order). The first one strictly inside `lock_on_distance` whose
/// recorded direction admits the displacement wins.
pub fn find_match(
    tracks: &BTreeMap<TrackId, Track>,
    detection: &Detection,
    lock_on_distance: f64,
) -> MatchDecision {
    if tracks.is_empty() {
        return MatchDecision::CreateNew;
    }

    let centroid = detection.centroid();
    let candidates: Vec<&Track> = tracks.values().collect();
    let dists = centroid_distances(&centroid, candidates.iter().copied());

    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&a, &b| dists[a].total_cmp(&dists[b]));

    for idx in order {
        if dists[idx] >= lock_on_distance {
            break;
        }
        let track = candidates[idx];
        if track.direction().admits(track.head().x, centroid.x) {
            return MatchDecision::Existing(track.id());
        }
    }

    MatchDecision::CreateNew
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det_at(cx: i32, cy: i32) -> Detection {
        Detection::new(cx - 10, cy - 10, 20, 20)
    }

    fn registry(tracks: Vec<Track>) -> BTreeMap<TrackId, Track> {
        tracks.into_iter().map(|t| (t.id(), t)).collect()
    }

    #[test]
    fn test_centroid_distance() {
        let d = centroid_distance(&Point2::new(0, 0), &Point2::new(3, 4));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_centroid_distances_follow_track_order() {
        let tracks = vec![
            Track::new(TrackId(1), &det_at(10, 0), 0.0),
            Track::new(TrackId(2), &det_at(0, 0), 0.0),
        ];
        let dists = centroid_distances(&Point2::new(0, 0), &tracks);
        assert_eq!(dists.len(), 2);
        assert_eq!(dists[0], 10.0);
        assert_eq!(dists[1], 0.0);
    }

    #[test]
    fn test_empty_registry_creates() {
        let tracks = BTreeMap::new();
        assert_eq!(
            find_match(&tracks, &det_at(0, 0), 80.0),
            MatchDecision::CreateNew
        );
    }

    #[test]
    fn test_nearest_wins() {
        let tracks = registry(vec![
            Track::new(TrackId(1), &det_at(150, 50), 0.0),
            Track::new(TrackId(2), &det_at(110, 50), 0.0),
        ]);
        assert_eq!(
            find_match(&tracks, &det_at(100, 50), 80.0),
            MatchDecision::Existing(TrackId(2))
        );
    }

    #[test]
    fn test_equal_distance_prefers_older_track() {
        let tracks = registry(vec![
            Track::new(TrackId(1), &det_at(90, 50), 0.0),
            Track::new(TrackId(2), &det_at(110, 50), 0.0),
        ]);
        assert_eq!(
            find_match(&tracks, &det_at(100, 50), 80.0),
            MatchDecision::Existing(TrackId(1))
        );
    }

    #[test]
    fn test_lock_on_boundary_is_strict() {
        let tracks = registry(vec![Track::new(TrackId(1), &det_at(100, 50), 0.0)]);
        assert_eq!(
            find_match(&tracks, &det_at(20, 50), 80.0),
            MatchDecision::CreateNew
        );
        assert_eq!(
            find_match(&tracks, &det_at(21, 50), 80.0),
            MatchDecision::Existing(TrackId(1))
        );
    }

    #[test]
    fn test_direction_conflict_falls_through_to_next_candidate() {
        // Nearest track is heading left, detection lies to its right.
        let mut left = Track::new(TrackId(1), &det_at(110, 50), 0.0);
        left.apply_match(&det_at(100, 50), 0.1, None);
        let far = Track::new(TrackId(2), &det_at(140, 50), 0.1);
        let tracks = registry(vec![left, far]);

        assert_eq!(
            find_match(&tracks, &det_at(105, 50), 80.0),
            MatchDecision::Existing(TrackId(2))
        );
    }

    #[test]
    fn test_direction_conflict_with_all_candidates_creates() {
        let mut left = Track::new(TrackId(1), &det_at(110, 50), 0.0);
        left.apply_match(&det_at(100, 50), 0.1, None);
        let tracks = registry(vec![left]);

        assert_eq!(
            find_match(&tracks, &det_at(105, 50), 80.0),
            MatchDecision::CreateNew
        );
    }
}
