use crate::bbox::{BBox, Ltrb};
use crate::circular_queue::CircularQueue;
use crate::direction::Direction;
use crate::Detection;

use nalgebra as na;
use serde_derive::{Deserialize, Serialize};

/// Number of center positions retained per track
pub const HISTORY_LEN: usize = 10;

/// Live tracking state of one object, owned by the track store
#[derive(Debug, Clone)]
pub struct Track {
    pub track_id: u64,
    pub bbox: BBox<Ltrb>,
    pub class: String,

    // frames since the last match
    pub age: u32,

    // frames with a match, never decremented
    pub hit_count: u32,

    // (frame index, center) of the most recent matches
    pub history: CircularQueue<(u64, na::Point2<i32>)>,
}

impl Track {
    pub(crate) fn new(track_id: u64, det: &Detection, frame_index: u64) -> Self {
        let mut history = CircularQueue::with_capacity(HISTORY_LEN);
        history.push((frame_index, det.bbox.center()));

        Self {
            track_id,
            bbox: det.bbox,
            class: det.class.clone(),
            age: 0,
            hit_count: 1,
            history,
        }
    }

    pub(crate) fn update(&mut self, det: &Detection, frame_index: u64) {
        self.bbox = det.bbox;
        self.class.clone_from(&det.class);
        self.age = 0;
        self.hit_count += 1;
        self.history.push((frame_index, det.bbox.center()));
    }

    #[inline]
    pub fn center(&self) -> na::Point2<i32> {
        self.bbox.center()
    }

    #[inline]
    pub fn is_confirmed(&self, min_hits: u32) -> bool {
        self.hit_count >= min_hits
    }

    pub fn direction(&self, frame_width: u32) -> Direction {
        Direction::estimate(self.history.iter(), self.center().x, frame_width)
    }

    pub fn report(&self, frame_width: u32) -> TrackReport {
        let center = self.center();

        TrackReport {
            track_id: self.track_id,
            bbox: self.bbox,
            center: (center.x, center.y),
            class: self.class.clone(),
            direction: self.direction(frame_width),
            age: self.hit_count,
        }
    }
}

/// Per-frame view of a confirmed track
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrackReport {
    pub track_id: u64,
    pub bbox: BBox<Ltrb>,
    pub center: (i32, i32),
    pub class: String,
    pub direction: Direction,

    // equals the hit count of the track
    pub age: u32,
}
