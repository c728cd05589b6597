use crate::error::Error;

use serde_derive::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub tracking: TrackingConfig,
    pub warnings: WarningConfig,
    pub speech: SpeechConfig,
}

impl Config {
    pub fn from_yaml_str(src: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(src)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let src = std::fs::read_to_string(path)?;

        Self::from_yaml_str(&src)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrackingConfig {
    /// Frames a track survives without a match
    pub max_age: u32,
    /// Matches needed before a track is reported
    pub min_hits: u32,
    /// Accepted for compatibility, matching only requires a positive overlap
    pub iou_threshold: f32,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            max_age: 15,
            min_hits: 1,
            iou_threshold: 0.3,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WarningConfig {
    pub enabled: bool,
    /// Minimal interval between two spoken warnings, in seconds
    pub cooldown_secs: f64,
}

impl Default for WarningConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cooldown_secs: 3.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SpeechConfig {
    /// Utterances waiting for the speech worker before new ones are dropped
    pub queue_size: usize,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self { queue_size: 4 }
    }
}
