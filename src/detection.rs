use serde_derive::{Deserialize, Serialize};

use crate::bbox::{BBox, Ltrb};

/// Single detector output: pixel box, class label and score
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Detection {
    pub bbox: BBox<Ltrb>,
    #[serde(alias = "c")]
    pub class: String,
    #[serde(rename = "p", alias = "confidence", default)]
    pub confidence: f32,
}

impl Detection {
    #[inline]
    pub fn new(bbox: BBox<Ltrb>, class: impl Into<String>, confidence: f32) -> Self {
        Self {
            bbox,
            class: class.into(),
            confidence,
        }
    }
}
