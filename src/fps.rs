use crate::circular_queue::CircularQueue;

/// Frame rate over the last `window` frame timestamps
#[derive(Debug, Clone)]
pub struct FpsCounter {
    stamps: CircularQueue<f64>,
    fps: f64,
}

impl FpsCounter {
    pub fn new(window: usize) -> Self {
        Self {
            stamps: CircularQueue::with_capacity(window),
            fps: 0.0,
        }
    }

    /// Registers a frame processed at `ts` seconds
    pub fn tick(&mut self, ts: f64) {
        self.stamps.push(ts);

        if let (Some(first), Some(last)) = (self.stamps.oldest(), self.stamps.newest()) {
            let frames = self.stamps.len().saturating_sub(1);
            let elapsed = last - first;

            self.fps = if frames > 0 && elapsed > 0.0 {
                frames as f64 / elapsed
            } else {
                0.0
            };
        }
    }

    #[inline]
    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn clear(&mut self) {
        self.stamps.clear();
        self.fps = 0.0;
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(30)
    }
}
