//! Natural language rendering of detections and tracks for speech output.

use crate::direction::Side;
use crate::track::TrackReport;

pub const NO_OBJECTS_DETECTED: &str = "No objects detected";
pub const NO_OBJECTS_TRACKED: &str = "No objects being tracked";
pub const NO_TEXT_DETECTED: &str = "No text detected";
pub const NO_CAPTION: &str = "Unable to describe the scene";

/// Counts labels in first-seen order and renders them as
/// "I see 2 cats and one dog".
pub fn describe_detections<I, S>(labels: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();

    for label in labels {
        let label = label.as_ref();
        match counts.iter_mut().find(|(name, _)| name == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label.to_string(), 1)),
        }
    }

    if counts.is_empty() {
        return NO_OBJECTS_DETECTED.to_string();
    }

    let parts: Vec<String> = counts
        .into_iter()
        .map(|(name, n)| {
            if n == 1 {
                format!("one {}", name)
            } else {
                format!("{} {}s", n, name)
            }
        })
        .collect();

    format!("I see {}", join_english(&parts))
}

/// Warns about approaching tracks only, or summarizes all tracks when nothing
/// approaches.
pub fn describe_tracks(tracks: &[TrackReport]) -> String {
    if tracks.is_empty() {
        return NO_OBJECTS_TRACKED.to_string();
    }

    let warnings: Vec<String> = tracks
        .iter()
        .filter(|t| t.direction.is_approaching())
        .map(|t| {
            let side = t.direction.side().unwrap_or(Side::Right);
            format!("{} approaching from your {}", t.class, side)
        })
        .collect();

    if !warnings.is_empty() {
        return format!("Caution: {}", warnings.join(", "));
    }

    describe_detections(tracks.iter().map(|t| t.class.as_str()))
}

pub fn format_ocr_result(text: &str) -> String {
    if text.trim().is_empty() {
        return NO_TEXT_DETECTED.to_string();
    }

    format!("The text reads: {}", text)
}

/// Capitalizes the caption and terminates it with a period
pub fn format_caption(caption: &str) -> String {
    if caption.trim().is_empty() {
        return NO_CAPTION.to_string();
    }

    let mut chars = caption.chars();
    let mut out: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };

    if !out.ends_with('.') {
        out.push('.');
    }

    out
}

fn join_english(parts: &[String]) -> String {
    match parts {
        [] => String::new(),
        [one] => one.clone(),
        [a, b] => format!("{} and {}", a, b),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}
