use crate::config::TrackingConfig;
use crate::math::iou;
use crate::store::TrackStore;
use crate::track::TrackReport;
use crate::Detection;

use tracing::{debug, trace};

/// Outcome of matching one frame of detections against the live tracks
#[derive(Debug)]
pub struct DetectionsMapping<'a> {
    frame_index: u64,
    detections: &'a [Detection],

    // (track id, detection index, iou)
    matched: Vec<(u64, usize, f32)>,
    missed: Vec<usize>,
    unmatched: Vec<u64>,
}

impl<'a> DetectionsMapping<'a> {
    #[inline]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    #[inline]
    pub fn matched(&self) -> &[(u64, usize, f32)] {
        &self.matched
    }

    /// Detections no track claimed, in detection order
    #[inline]
    pub fn missed(&self) -> impl Iterator<Item = &'a Detection> + '_ {
        let dets = self.detections;
        self.missed.iter().map(move |&idx| &dets[idx])
    }

    /// Ids of tracks that found no detection this frame
    #[inline]
    pub fn unmatched(&self) -> &[u64] {
        &self.unmatched
    }
}

/// Greedy IoU tracker state for one video source
#[derive(Debug, Clone)]
pub struct Scene {
    store: TrackStore,
    config: TrackingConfig,
}

impl Scene {
    pub fn new(config: TrackingConfig) -> Self {
        Self {
            store: TrackStore::new(),
            config,
        }
    }

    #[inline]
    pub fn store(&self) -> &TrackStore {
        &self.store
    }

    #[inline]
    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    #[inline]
    pub fn set_max_age(&mut self, max_age: u32) {
        self.config.max_age = max_age;
    }

    #[inline]
    pub fn set_min_hits(&mut self, min_hits: u32) {
        self.config.min_hits = min_hits;
    }

    /// Assigns detections to tracks.
    ///
    /// Every track, oldest first, takes the still unclaimed detection with the
    /// highest IoU against its box. Any positive overlap is a match, the
    /// configured `iou_threshold` does not gate it.
    pub fn map_detections<'a>(
        &self,
        frame_index: u64,
        detections: &'a [Detection],
    ) -> DetectionsMapping<'a> {
        let mut claimed = vec![false; detections.len()];
        let mut matched = Vec::new();
        let mut unmatched = Vec::new();

        for track in self.store.get_all() {
            let mut best_iou = 0.0;
            let mut best_idx = None;

            for (idx, det) in detections.iter().enumerate() {
                if claimed[idx] {
                    continue;
                }

                let score = iou(&track.bbox, &det.bbox);
                if score > best_iou {
                    best_iou = score;
                    best_idx = Some(idx);
                }
            }

            match best_idx {
                Some(idx) => {
                    if best_iou < self.config.iou_threshold {
                        trace!(
                            track = track.track_id,
                            iou = best_iou,
                            threshold = self.config.iou_threshold,
                            "weak match accepted"
                        );
                    }

                    claimed[idx] = true;
                    matched.push((track.track_id, idx, best_iou));
                }
                None => unmatched.push(track.track_id),
            }
        }

        let missed = claimed
            .iter()
            .enumerate()
            .filter_map(|(idx, &c)| if c { None } else { Some(idx) })
            .collect();

        DetectionsMapping {
            frame_index,
            detections,
            matched,
            missed,
            unmatched,
        }
    }

    pub fn apply(&mut self, mapping: DetectionsMapping<'_>) {
        let frame_index = mapping.frame_index;
        let dets = mapping.detections;

        for &(id, idx, _) in &mapping.matched {
            self.store.touch(id, &dets[idx], frame_index);
        }

        let mut created = 0;
        for det in mapping.missed() {
            self.store.create(det, frame_index);
            created += 1;
        }

        let mut evicted = 0;
        for &id in &mapping.unmatched {
            self.store.age_one(id);
            if self.store.evict_if_stale(id, self.config.max_age) {
                evicted += 1;
            }
        }

        debug!(
            frame_index,
            detections = dets.len(),
            matched = mapping.matched.len(),
            created,
            evicted,
            live = self.store.len(),
            "frame mapped"
        );
    }

    /// Reports for every confirmed track, in creation order
    pub fn tracks(&self, frame_width: u32) -> Vec<TrackReport> {
        self.store
            .get_all()
            .iter()
            .filter(|t| t.is_confirmed(self.config.min_hits))
            .map(|t| t.report(frame_width))
            .collect()
    }

    pub fn reset(&mut self) {
        self.store.reset();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(TrackingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbox::BBox;

    fn det(x1: i32, y1: i32, x2: i32, y2: i32, class: &str) -> Detection {
        Detection::new(BBox::ltrb(x1, y1, x2, y2), class, 0.9)
    }

    fn step(scene: &mut Scene, frame_index: u64, dets: &[Detection]) {
        let mapping = scene.map_detections(frame_index, dets);
        scene.apply(mapping);
    }

    #[test]
    fn mapping_splits_matched_missed_unmatched() {
        let mut scene = Scene::default();
        step(
            &mut scene,
            1,
            &[det(0, 0, 10, 10, "a"), det(100, 100, 110, 110, "b")],
        );

        let dets = [det(2, 0, 12, 10, "a"), det(300, 300, 310, 310, "c")];
        let mapping = scene.map_detections(2, &dets);

        assert_eq!(mapping.matched().len(), 1);
        assert_eq!(mapping.matched()[0].0, 1);
        assert_eq!(mapping.matched()[0].1, 0);
        assert_eq!(mapping.unmatched(), &[2]);

        let missed: Vec<_> = mapping.missed().map(|d| d.class.as_str()).collect();
        assert_eq!(missed, vec!["c"]);
    }

    #[test]
    fn tiny_overlap_still_matches() {
        let mut scene = Scene::new(TrackingConfig {
            iou_threshold: 0.9,
            ..TrackingConfig::default()
        });
        step(&mut scene, 1, &[det(0, 0, 100, 100, "car")]);
        step(&mut scene, 2, &[det(99, 99, 199, 199, "car")]);

        assert_eq!(scene.store().len(), 1);
        assert_eq!(scene.store().get_all()[0].hit_count, 2);
    }

    #[test]
    fn new_tracks_are_not_aged_in_their_first_frame() {
        let mut scene = Scene::default();
        step(&mut scene, 1, &[det(0, 0, 10, 10, "a")]);

        let t = &scene.store().get_all()[0];
        assert_eq!(t.age, 0);
        assert_eq!(t.hit_count, 1);
        assert_eq!(t.history.len(), 1);
    }

    #[test]
    fn min_hits_gates_reports() {
        let mut scene = Scene::new(TrackingConfig {
            min_hits: 3,
            ..TrackingConfig::default()
        });

        for i in 1..=3u64 {
            step(&mut scene, i, &[det(0, 0, 10, 10, "a")]);
            let reported = scene.tracks(640).len();
            assert_eq!(reported, if i < 3 { 0 } else { 1 });
        }
    }
}
