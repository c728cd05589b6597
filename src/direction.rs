use crate::error::Error;

use nalgebra as na;
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Horizontal displacement below which a track counts as stationary, in px
pub const MOVEMENT_THRESHOLD: i32 = 20;

/// Minimal number of history entries needed to estimate a direction
pub const MIN_HISTORY: usize = 3;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

impl FromStr for Side {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            _ => Err(Error::UnknownDirection(s.to_string())),
        }
    }
}

/// Qualitative motion of a track relative to the frame center.
///
/// Serialized as its spoken label, e.g. `"approaching from left"`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(into = "String", try_from = "String")]
pub enum Direction {
    Tracking,
    Stationary,
    ApproachingFrom(Side),
    MovingAway(Side),
}

impl Direction {
    /// Estimates direction from oldest to newest history entry.
    ///
    /// `current_x` is the center of the track in the current frame and is
    /// compared against the frame center, the history only gives the sign
    /// and magnitude of the drift.
    pub fn estimate<'a, I>(history: I, current_x: i32, frame_width: u32) -> Self
    where
        I: IntoIterator<Item = &'a (u64, na::Point2<i32>)>,
    {
        let mut iter = history.into_iter();

        let oldest = match iter.next() {
            Some(entry) => entry,
            None => return Direction::Tracking,
        };

        let mut count = 1;
        let mut newest = oldest;
        for entry in iter {
            newest = entry;
            count += 1;
        }

        if count < MIN_HISTORY {
            return Direction::Tracking;
        }

        let dx = newest.1.x - oldest.1.x;
        let frame_center = frame_width as f32 / 2.0;
        let x = current_x as f32;

        if dx.abs() < MOVEMENT_THRESHOLD {
            Direction::Stationary
        } else if dx > 0 {
            if x < frame_center {
                Direction::ApproachingFrom(Side::Left)
            } else {
                Direction::MovingAway(Side::Right)
            }
        } else if x > frame_center {
            Direction::ApproachingFrom(Side::Right)
        } else {
            Direction::MovingAway(Side::Left)
        }
    }

    #[inline]
    pub fn is_approaching(&self) -> bool {
        matches!(self, Direction::ApproachingFrom(_))
    }

    #[inline]
    pub fn side(&self) -> Option<Side> {
        match self {
            Direction::ApproachingFrom(side) | Direction::MovingAway(side) => Some(*side),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Tracking => f.write_str("tracking"),
            Direction::Stationary => f.write_str("stationary"),
            Direction::ApproachingFrom(side) => write!(f, "approaching from {}", side),
            Direction::MovingAway(side) => write!(f, "moving away {}", side),
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || Error::UnknownDirection(s.to_string());

        match s {
            "tracking" => Ok(Direction::Tracking),
            "stationary" => Ok(Direction::Stationary),
            _ => {
                if let Some(side) = s.strip_prefix("approaching from ") {
                    side.parse().map(Direction::ApproachingFrom).map_err(|_| unknown())
                } else if let Some(side) = s.strip_prefix("moving away ") {
                    side.parse().map(Direction::MovingAway).map_err(|_| unknown())
                } else {
                    Err(unknown())
                }
            }
        }
    }
}

impl From<Direction> for String {
    fn from(dir: Direction) -> Self {
        dir.to_string()
    }
}

impl TryFrom<String> for Direction {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(xs: &[i32]) -> Vec<(u64, na::Point2<i32>)> {
        xs.iter()
            .enumerate()
            .map(|(i, &x)| (i as u64, na::Point2::new(x, 50)))
            .collect()
    }

    #[test]
    fn short_history_is_tracking() {
        assert_eq!(Direction::estimate(&history(&[]), 0, 400), Direction::Tracking);
        assert_eq!(
            Direction::estimate(&history(&[0, 300]), 0, 400),
            Direction::Tracking
        );
    }

    #[test]
    fn approaching_from_left() {
        let dir = Direction::estimate(&history(&[100, 100, 150]), 150, 400);
        assert_eq!(dir, Direction::ApproachingFrom(Side::Left));
        assert_eq!(dir.to_string(), "approaching from left");
    }

    #[test]
    fn moving_away_right() {
        let dir = Direction::estimate(&history(&[100, 100, 150]), 350, 400);
        assert_eq!(dir, Direction::MovingAway(Side::Right));
        assert_eq!(dir.to_string(), "moving away right");
    }

    #[test]
    fn leftward_drift() {
        let h = history(&[300, 280, 250]);
        assert_eq!(
            Direction::estimate(&h, 250, 400),
            Direction::ApproachingFrom(Side::Right)
        );
        assert_eq!(
            Direction::estimate(&h, 200, 400),
            Direction::MovingAway(Side::Left)
        );
    }

    #[test]
    fn small_drift_is_stationary() {
        let dir = Direction::estimate(&history(&[100, 140, 119]), 119, 400);
        assert_eq!(dir, Direction::Stationary);
        assert_eq!(dir.to_string(), "stationary");

        // intermediate entries are ignored, only the endpoints count
        let dir = Direction::estimate(&history(&[100, 90, 120]), 120, 400);
        assert_eq!(dir, Direction::ApproachingFrom(Side::Left));
    }

    #[test]
    fn rightward_drift_exactly_at_center_moves_away() {
        let dir = Direction::estimate(&history(&[150, 170, 200]), 200, 400);
        assert_eq!(dir, Direction::MovingAway(Side::Right));
    }

    #[test]
    fn labels() {
        assert_eq!(Direction::Tracking.to_string(), "tracking");
        assert_eq!(
            Direction::ApproachingFrom(Side::Right).to_string(),
            "approaching from right"
        );
        assert_eq!(Direction::MovingAway(Side::Left).to_string(), "moving away left");
        assert!(Direction::ApproachingFrom(Side::Left).is_approaching());
        assert!(!Direction::MovingAway(Side::Left).is_approaching());
        assert_eq!(Direction::Stationary.side(), None);
    }

    #[test]
    fn serializes_as_label() {
        let dir = Direction::ApproachingFrom(Side::Left);
        let json = serde_json::to_string(&dir).unwrap();
        assert_eq!(json, r#""approaching from left""#);

        for dir in [
            Direction::Tracking,
            Direction::Stationary,
            Direction::ApproachingFrom(Side::Right),
            Direction::MovingAway(Side::Left),
            Direction::MovingAway(Side::Right),
        ] {
            let json = serde_json::to_string(&dir).unwrap();
            assert_eq!(json, format!("{:?}", dir.to_string()));
            assert_eq!(serde_json::from_str::<Direction>(&json).unwrap(), dir);
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert!(serde_json::from_str::<Direction>(r#""approaching_from""#).is_err());
        assert!(serde_json::from_str::<Direction>(r#""moving away up""#).is_err());
        assert!("approaching from".parse::<Direction>().is_err());
        assert!(matches!(
            "sideways".parse::<Direction>(),
            Err(Error::UnknownDirection(label)) if label == "sideways"
        ));
    }
}
