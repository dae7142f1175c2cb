//! Validation report and the final artifact returned to callers.

use serde::{Deserialize, Serialize};
use squad_directory::PlayerRecord;

use super::detection::CandidateName;
use super::matching::Roster;

/// Outcome of checking a roster against the squad composition rules.
///
/// Every violated rule contributes one human-readable error; nothing
/// short-circuits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Flat result of one reconstruction run.
///
/// `success` only says that at least one candidate matched; squad validity
/// is reported separately through `is_valid_team`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrResult {
    pub success: bool,
    pub players_detected: Vec<String>,
    pub confidence_scores: Vec<f32>,
    pub matched_players: Vec<PlayerRecord>,
    pub unmatched_names: Vec<String>,
    pub is_valid_team: bool,
    pub validation_errors: Vec<String>,
    pub formation: Option<String>,
}

impl OcrResult {
    /// Assemble a completed run.
    pub fn assemble(
        candidates: &[CandidateName],
        roster: Roster,
        report: ValidationReport,
        formation: Option<String>,
    ) -> Self {
        Self {
            success: !roster.matched.is_empty(),
            players_detected: candidates.iter().map(|c| c.text.clone()).collect(),
            confidence_scores: candidates.iter().map(|c| c.confidence).collect(),
            matched_players: roster.matched,
            unmatched_names: roster.unmatched,
            is_valid_team: report.is_valid,
            validation_errors: report.errors,
            formation,
        }
    }

    /// Result for a run whose input could not be read at all.
    pub fn input_failure(reason: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            validation_errors: vec![format!("Image processing failed: {reason}")],
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_validity_follows_errors() {
        assert!(ValidationReport::from_errors(vec![]).is_valid);
        assert!(!ValidationReport::from_errors(vec!["x".to_string()]).is_valid);
    }

    #[test]
    fn test_input_failure_shape() {
        let result = OcrResult::input_failure("no text detected");
        assert!(!result.success);
        assert!(!result.is_valid_team);
        assert!(result.players_detected.is_empty());
        assert_eq!(result.formation, None);
        assert_eq!(
            result.validation_errors,
            vec!["Image processing failed: no text detected".to_string()]
        );
    }

    #[test]
    fn test_serializes_as_flat_object_with_null_formation() {
        let value = serde_json::to_value(OcrResult::input_failure("bad bytes")).unwrap();
        for key in [
            "success",
            "players_detected",
            "confidence_scores",
            "matched_players",
            "unmatched_names",
            "is_valid_team",
            "validation_errors",
            "formation",
        ] {
            assert!(value.get(key).is_some(), "missing field {key}");
        }
        assert!(value["formation"].is_null());
    }
}
