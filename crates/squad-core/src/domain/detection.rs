//! OCR detections and the candidates that survive filtering.

use serde::{Deserialize, Serialize};

/// One text region reported by the OCR collaborator.
///
/// Carries no layout information; order follows the engine's output, not
/// the pitch graphic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    pub text: String,
    /// Recognition confidence in 0.0–1.0.
    pub confidence: f32,
}

impl RawDetection {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

/// A detection judged plausible as a player name.
///
/// # Invariants
///
/// `text` is trimmed, at least 3 characters, not purely numeric, not a UI
/// stopword, starts with an uppercase letter. Only the candidate filter
/// constructs these from raw detections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateName {
    pub text: String,
    pub confidence: f32,
}

impl From<CandidateName> for RawDetection {
    fn from(candidate: CandidateName) -> Self {
        RawDetection {
            text: candidate.text,
            confidence: candidate.confidence,
        }
    }
}
