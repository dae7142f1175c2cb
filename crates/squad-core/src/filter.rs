//! Candidate filter.
//!
//! Cheap lexical pass that drops UI chrome and noise before matching.
//! Rules run in order and the first failing rule excludes the detection:
//!
//! 1. trimmed text shorter than 3 characters
//! 2. text made only of digits
//! 3. lowercase text is a UI stopword
//! 4. first character is not an uppercase letter, or no alphabetic character
//!
//! No confidence threshold is applied here; that belongs to the OCR side.

use tracing::trace;

use crate::domain::{CandidateName, RawDetection};

/// Roster-screen chrome that survives OCR but is never a player.
pub const STOPWORDS: &[&str] = &[
    "gameweek", "pitch", "list", "fantasy", "average", "total", "pts", "highest", "gkp", "def",
    "mid", "fwd",
];

pub const MIN_CANDIDATE_LEN: usize = 3;

/// Why a detection was excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    TooShort,
    Numeric,
    Stopword,
    NotNameLike,
}

/// Check one detection's text, returning the trimmed candidate text or the
/// first rule it fails.
pub fn screen(text: &str) -> Result<&str, Rejection> {
    let text = text.trim();

    if text.chars().count() < MIN_CANDIDATE_LEN {
        return Err(Rejection::TooShort);
    }
    if text.chars().all(|c| c.is_numeric()) {
        return Err(Rejection::Numeric);
    }
    if STOPWORDS.contains(&text.to_lowercase().as_str()) {
        return Err(Rejection::Stopword);
    }
    let starts_upper = text.chars().next().is_some_and(|c| c.is_uppercase());
    if !starts_upper || !text.chars().any(|c| c.is_alphabetic()) {
        return Err(Rejection::NotNameLike);
    }

    Ok(text)
}

/// Reduce raw detections to plausible player-name candidates, in input order.
pub fn filter_candidates(detections: &[RawDetection]) -> Vec<CandidateName> {
    detections
        .iter()
        .filter_map(|d| match screen(&d.text) {
            Ok(text) => Some(CandidateName {
                text: text.to_string(),
                confidence: d.confidence,
            }),
            Err(reason) => {
                trace!(text = %d.text, ?reason, "detection filtered out");
                None
            }
        })
        .collect()
}
