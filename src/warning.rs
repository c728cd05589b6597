use crate::compose::describe_tracks;
use crate::config::WarningConfig;
use crate::speech::{SpeakMode, Speech};
use crate::track::TrackReport;

use tracing::{info, warn};

/// Debounced hazard announcements.
///
/// A warning goes out only when something is approaching and at least
/// `cooldown` seconds passed since the last warning actually spoken.
#[derive(Debug, Clone)]
pub struct WarningPolicy {
    enabled: bool,
    cooldown: f64,
    last_warning: f64,
}

impl WarningPolicy {
    pub fn new(config: &WarningConfig) -> Self {
        Self {
            enabled: config.enabled,
            cooldown: config.cooldown_secs,
            last_warning: 0.0,
        }
    }

    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Flips the enabled flag and returns the new value
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        info!(enabled = self.enabled, "tracking warnings toggled");

        self.enabled
    }

    #[inline]
    pub fn cooldown(&self) -> f64 {
        self.cooldown
    }

    #[inline]
    pub fn set_cooldown(&mut self, secs: f64) {
        self.cooldown = secs;
    }

    #[inline]
    pub fn last_warning(&self) -> f64 {
        self.last_warning
    }

    /// Speaks a warning when due, `now` is in seconds.
    ///
    /// Returns the dispatched message.
    pub fn maybe_warn(
        &mut self,
        tracks: &[TrackReport],
        now: f64,
        speech: &dyn Speech,
    ) -> Option<String> {
        if !self.enabled || now - self.last_warning < self.cooldown {
            return None;
        }

        if !tracks.iter().any(|t| t.direction.is_approaching()) {
            return None;
        }

        let message = describe_tracks(tracks);
        info!(%message, "warning");

        if let Err(err) = speech.speak(&message, SpeakMode::Background) {
            warn!(%err, "warning could not be dispatched");
        }

        self.last_warning = now;

        Some(message)
    }
}

impl Default for WarningPolicy {
    fn default() -> Self {
        Self::new(&WarningConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbox::BBox;
    use crate::direction::{Direction, Side};
    use crate::error::Error;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Sink {
        spoken: RefCell<Vec<(String, SpeakMode)>>,
    }

    impl Speech for Sink {
        fn speak(&self, text: &str, mode: SpeakMode) -> Result<(), Error> {
            self.spoken.borrow_mut().push((text.to_string(), mode));
            Ok(())
        }
    }

    struct Full;

    impl Speech for Full {
        fn speak(&self, _text: &str, _mode: SpeakMode) -> Result<(), Error> {
            Err(Error::SpeechBacklog)
        }
    }

    fn report(class: &str, direction: Direction) -> TrackReport {
        TrackReport {
            track_id: 1,
            bbox: BBox::ltrb(0, 0, 10, 10),
            center: (5, 5),
            class: class.to_string(),
            direction,
            age: 5,
        }
    }

    fn approaching() -> Vec<TrackReport> {
        vec![report("car", Direction::ApproachingFrom(Side::Left))]
    }

    #[test]
    fn fires_once_per_cooldown() {
        let sink = Sink::default();
        let mut policy = WarningPolicy::default();

        let msg = policy.maybe_warn(&approaching(), 10.0, &sink);
        assert_eq!(msg.as_deref(), Some("Caution: car approaching from your left"));
        assert_eq!(policy.maybe_warn(&approaching(), 12.0, &sink), None);

        assert_eq!(sink.spoken.borrow().len(), 1);
        assert_eq!(sink.spoken.borrow()[0].1, SpeakMode::Background);
        assert_eq!(policy.last_warning(), 10.0);

        assert!(policy.maybe_warn(&approaching(), 13.0, &sink).is_some());
        assert_eq!(sink.spoken.borrow().len(), 2);
    }

    #[test]
    fn silence_does_not_refresh_window() {
        let sink = Sink::default();
        let mut policy = WarningPolicy::default();

        assert!(policy.maybe_warn(&approaching(), 10.0, &sink).is_some());

        let calm = vec![report("person", Direction::Stationary)];
        assert_eq!(policy.maybe_warn(&calm, 13.5, &sink), None);
        assert_eq!(policy.last_warning(), 10.0);

        assert!(policy.maybe_warn(&approaching(), 13.6, &sink).is_some());
        assert_eq!(policy.last_warning(), 13.6);
    }

    #[test]
    fn first_window_counts_from_zero() {
        let sink = Sink::default();
        let mut policy = WarningPolicy::default();

        assert_eq!(policy.maybe_warn(&approaching(), 2.5, &sink), None);
        assert!(policy.maybe_warn(&approaching(), 3.0, &sink).is_some());
    }

    #[test]
    fn disabled_policy_is_silent() {
        let sink = Sink::default();
        let mut policy = WarningPolicy::default();

        assert!(!policy.toggle());
        assert_eq!(policy.maybe_warn(&approaching(), 100.0, &sink), None);
        assert!(sink.spoken.borrow().is_empty());

        policy.set_enabled(true);
        assert!(policy.maybe_warn(&approaching(), 100.0, &sink).is_some());
    }

    #[test]
    fn message_drops_non_approaching_tracks() {
        let sink = Sink::default();
        let mut policy = WarningPolicy::default();

        let tracks = vec![
            report("person", Direction::Stationary),
            report("car", Direction::ApproachingFrom(Side::Right)),
        ];
        policy.maybe_warn(&tracks, 50.0, &sink);

        assert_eq!(
            sink.spoken.borrow()[0].0,
            "Caution: car approaching from your right"
        );
    }

    #[test]
    fn failed_dispatch_still_starts_cooldown() {
        let mut policy = WarningPolicy::default();
        policy.set_cooldown(1.0);

        assert!(policy.maybe_warn(&approaching(), 5.0, &Full).is_some());
        assert_eq!(policy.last_warning(), 5.0);
        assert_eq!(policy.maybe_warn(&approaching(), 5.5, &Full), None);
    }
}
