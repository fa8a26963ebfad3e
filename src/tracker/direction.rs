use serde::{Deserialize, Serialize};

/// Horizontal direction of travel inferred for a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// No match yet, so no displacement has been observed
    #[default]
    Unknown,
    /// Centroid moved towards smaller x on the latest match
    Left,
    /// Centroid moved towards larger x (or stayed put) on the latest match
    Right,
}

impl Direction {
    /// Direction implied by a centroid moving from `prev_x` to `new_x`.
    #[inline]
    pub fn from_displacement(prev_x: i32, new_x: i32) -> Self {
        if new_x < prev_x {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    /// Whether a move from `prev_x` to `new_x` is consistent with this direction.
    ///
    /// Only a strict reversal is rejected; a blob that holds its x position
    /// stays compatible with either direction.
    #[inline]
    pub fn admits(self, prev_x: i32, new_x: i32) -> bool {
        match self {
            Direction::Unknown => true,
            Direction::Left => new_x <= prev_x,
            Direction::Right => new_x >= prev_x,
        }
    }

    #[inline]
    pub fn is_known(self) -> bool {
        self != Direction::Unknown
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Unknown => "unknown",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_displacement() {
        assert_eq!(Direction::from_displacement(100, 90), Direction::Left);
        assert_eq!(Direction::from_displacement(90, 100), Direction::Right);
        assert_eq!(Direction::from_displacement(100, 100), Direction::Right);
    }

    #[test]
    fn test_admits_rejects_reversal_only() {
        assert!(Direction::Unknown.admits(100, 200));
        assert!(Direction::Unknown.admits(100, 0));

        assert!(Direction::Left.admits(100, 90));
        assert!(Direction::Left.admits(100, 100));
        assert!(!Direction::Left.admits(100, 101));

        assert!(Direction::Right.admits(100, 110));
        assert!(Direction::Right.admits(100, 100));
        assert!(!Direction::Right.admits(100, 99));
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&Direction::Left).unwrap();
        assert_eq!(json, "\"left\"");
        assert_eq!(Direction::default().as_str(), "unknown");
    }

    #[test]
    fn test_is_known() {
        assert!(!Direction::Unknown.is_known());
        assert!(Direction::Left.is_known());
        assert!(Direction::Right.is_known());
    }
}
