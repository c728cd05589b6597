use crate::detection::Detection;
use serde_derive::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Frame {
    pub index: u64,
    pub dims: (u32, u32),
    pub detections: Vec<Detection>,
}

impl Frame {
    #[inline]
    pub fn new(index: u64, dims: (u32, u32), detections: Vec<Detection>) -> Self {
        Self {
            index,
            dims,
            detections,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.dims.0
    }
}
