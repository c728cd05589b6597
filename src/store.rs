use crate::track::Track;
use crate::Detection;

use tracing::trace;

/// Owner of all live tracks.
///
/// Tracks are kept in creation order, which is also the order in which they
/// get to pick a detection during matching.
#[derive(Debug, Clone)]
pub struct TrackStore {
    tracks: Vec<Track>,
    next_id: u64,
}

impl TrackStore {
    pub fn new() -> Self {
        Self {
            tracks: Vec::with_capacity(64),
            next_id: 1,
        }
    }

    pub fn create(&mut self, det: &Detection, frame_index: u64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        trace!(id, class = %det.class, frame_index, "track created");
        self.tracks.push(Track::new(id, det, frame_index));

        id
    }

    #[inline]
    pub fn get_all(&self) -> &[Track] {
        &self.tracks
    }

    #[inline]
    pub fn get(&self, id: u64) -> Option<&Track> {
        self.position(id).map(|idx| &self.tracks[idx])
    }

    /// Records a match: new box and class, age back to zero, one more hit
    pub fn touch(&mut self, id: u64, det: &Detection, frame_index: u64) {
        if let Some(t) = self.get_mut(id) {
            t.update(det, frame_index);
        }
    }

    pub fn age_one(&mut self, id: u64) {
        if let Some(t) = self.get_mut(id) {
            t.age += 1;
        }
    }

    /// Removes the track if it went unmatched for more than `max_age` frames
    pub fn evict_if_stale(&mut self, id: u64, max_age: u32) -> bool {
        let stale = self.get(id).map_or(false, |t| t.age > max_age);

        if stale {
            if let Some(t) = self.remove(id) {
                trace!(id, age = t.age, hits = t.hit_count, "track evicted");
            }
        }

        stale
    }

    pub fn remove(&mut self, id: u64) -> Option<Track> {
        let idx = self.position(id)?;

        Some(self.tracks.remove(idx))
    }

    pub fn reset(&mut self) {
        self.tracks.clear();
        self.next_id = 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    // ids grow monotonically and removal keeps order, so the list is sorted
    #[inline]
    fn position(&self, id: u64) -> Option<usize> {
        self.tracks.binary_search_by_key(&id, |t| t.track_id).ok()
    }

    #[inline]
    fn get_mut(&mut self, id: u64) -> Option<&mut Track> {
        let idx = self.position(id)?;

        Some(&mut self.tracks[idx])
    }
}

impl Default for TrackStore {
    fn default() -> Self {
        Self::new()
    }
}
