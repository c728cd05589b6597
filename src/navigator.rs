use crate::compose::{describe_tracks, format_caption, format_ocr_result};
use crate::config::Config;
use crate::fps::FpsCounter;
use crate::scene::Scene;
use crate::speech::{SpeakMode, Speech};
use crate::warning::WarningPolicy;
use crate::{Detection, Frame, TrackReport, Tracking};

use tracing::{info, warn};

/// Produces a caption for a host image
pub trait Captioner<I: ?Sized> {
    fn caption(&mut self, image: &I) -> Option<String>;
}

/// Extracts printed text from a host image
pub trait TextReader<I: ?Sized> {
    fn read_text(&mut self, image: &I) -> Option<String>;
}

/// One assistive session: tracker, warnings and speech for a single camera
pub struct Navigator<S: Speech> {
    scene: Scene,
    warnings: WarningPolicy,
    fps: FpsCounter,
    speech: S,
    frame_index: u64,
    reports: Vec<TrackReport>,
}

impl<S: Speech> Navigator<S> {
    pub fn new(config: &Config, speech: S) -> Self {
        Self {
            scene: Scene::new(config.tracking.clone()),
            warnings: WarningPolicy::new(&config.warnings),
            fps: FpsCounter::default(),
            speech,
            frame_index: 0,
            reports: Vec::new(),
        }
    }

    /// Runs one frame through tracking and the warning policy, `now` is
    /// wall-clock seconds.
    pub fn process(
        &mut self,
        dims: (u32, u32),
        detections: Vec<Detection>,
        now: f64,
    ) -> &[TrackReport] {
        self.frame_index += 1;

        let frame = Frame::new(self.frame_index, dims, detections);
        self.reports = self.scene.update(&frame);
        self.fps.tick(now);

        self.warnings.maybe_warn(&self.reports, now, &self.speech);

        &self.reports
    }

    /// Answers "what's ahead?" from the latest confirmed tracks
    pub fn whats_ahead(&self) -> String {
        let description = describe_tracks(&self.reports);
        self.say(&description);

        description
    }

    pub fn toggle_warnings(&mut self) -> String {
        let status = if self.warnings.toggle() {
            "enabled"
        } else {
            "disabled"
        };

        let message = format!("Warnings {}", status);
        self.say(&message);

        message
    }

    pub fn describe_scene<I, C>(&self, captioner: &mut C, image: &I) -> String
    where
        I: ?Sized,
        C: Captioner<I>,
    {
        self.say("Analyzing scene");

        let caption = captioner.caption(image).unwrap_or_default();
        let formatted = format_caption(&caption);
        self.say(&formatted);

        formatted
    }

    pub fn read_text<I, R>(&self, reader: &mut R, image: &I) -> String
    where
        I: ?Sized,
        R: TextReader<I>,
    {
        self.say("Reading text");

        let text = reader.read_text(image).unwrap_or_default();
        let formatted = format_ocr_result(&text);
        self.say(&formatted);

        formatted
    }

    pub fn reset(&mut self) {
        self.scene.reset();
        self.fps.clear();
        self.frame_index = 0;
        self.reports.clear();
        info!("navigator reset");
    }

    #[inline]
    pub fn reports(&self) -> &[TrackReport] {
        &self.reports
    }

    #[inline]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    #[inline]
    pub fn fps(&self) -> f64 {
        self.fps.fps()
    }

    #[inline]
    pub fn track_count(&self) -> usize {
        self.scene.track_count()
    }

    #[inline]
    pub fn warnings(&self) -> &WarningPolicy {
        &self.warnings
    }

    #[inline]
    pub fn warnings_mut(&mut self) -> &mut WarningPolicy {
        &mut self.warnings
    }

    #[inline]
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    #[inline]
    pub fn speech(&self) -> &S {
        &self.speech
    }

    fn say(&self, text: &str) {
        if let Err(err) = self.speech.speak(text, SpeakMode::Background) {
            warn!(%err, text, "speech dispatch failed");
        }
    }
}
