mod blob_tracker;
mod direction;
mod matching;
mod rect;
mod track;

pub use blob_tracker::{BlobTracker, FrameReport, TrackerConfig};
pub use direction::Direction;
pub use matching::{Detection, MatchDecision, centroid_distance, centroid_distances, find_match};
pub use rect::Rect;
pub use track::{Track, TrackId, TrackSnapshot};
