pub mod bbox;
pub mod circular_queue;
pub mod compose;
pub mod config;
pub mod detection;
pub mod direction;
pub mod error;
pub mod fps;
pub mod frame;
pub mod math;
pub mod navigator;
pub mod scene;
pub mod speech;
pub mod store;
pub mod track;
pub mod warning;

pub use config::Config;
pub use detection::Detection;
pub use direction::{Direction, Side};
pub use frame::Frame;
pub use navigator::Navigator;
pub use scene::Scene;
pub use track::{Track, TrackReport};

pub trait Tracking {
    /// Feeds one frame and returns the confirmed tracks
    fn update(&mut self, frame: &Frame) -> Vec<TrackReport>;
    fn track_count(&self) -> usize;
    fn reset(&mut self);
}

impl crate::Tracking for Scene {
    fn update(&mut self, frame: &Frame) -> Vec<TrackReport> {
        let mapping = self.map_detections(frame.index, &frame.detections);
        self.apply(mapping);
        self.tracks(frame.width())
    }

    #[inline]
    fn track_count(&self) -> usize {
        self.store().len()
    }

    #[inline]
    fn reset(&mut self) {
        Scene::reset(self);
        tracing::info!("tracker reset");
    }
}
