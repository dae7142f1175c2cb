//! Per-candidate match outcomes and the matched/unmatched partition.

use serde::{Deserialize, Serialize};
use squad_directory::PlayerRecord;

use super::detection::CandidateName;

/// How a candidate was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// Case-insensitive equality with a web name or full name.
    Exact,
    /// Best similarity score at or above the configured threshold.
    Fuzzy,
    /// No acceptable player.
    None,
}

/// Outcome of matching one candidate. Exactly one per candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub candidate: CandidateName,
    pub player: Option<PlayerRecord>,
    pub method: MatchMethod,
    /// 1.0 for exact; similarity in 0–100 for fuzzy; best rejected score
    /// (or 0.0 on an empty directory) for none.
    pub score: f64,
}

impl MatchResult {
    pub fn exact(candidate: CandidateName, player: PlayerRecord) -> Self {
        Self {
            candidate,
            player: Some(player),
            method: MatchMethod::Exact,
            score: 1.0,
        }
    }

    pub fn fuzzy(candidate: CandidateName, player: PlayerRecord, score: f64) -> Self {
        Self {
            candidate,
            player: Some(player),
            method: MatchMethod::Fuzzy,
            score,
        }
    }

    pub fn none(candidate: CandidateName, best_score: f64) -> Self {
        Self {
            candidate,
            player: None,
            method: MatchMethod::None,
            score: best_score,
        }
    }

    pub fn is_match(&self) -> bool {
        self.player.is_some()
    }
}

/// Matched players and unmatched candidate texts, both in detection order.
///
/// # Invariants
///
/// `matched.len() + unmatched.len()` equals the number of match results the
/// roster was built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub matched: Vec<PlayerRecord>,
    pub unmatched: Vec<String>,
}

impl Roster {
    /// Partition match results, preserving their order.
    pub fn partition<I>(results: I) -> Self
    where
        I: IntoIterator<Item = MatchResult>,
    {
        let mut roster = Roster::default();
        for result in results {
            match result.player {
                Some(player) => roster.matched.push(player),
                None => roster.unmatched.push(result.candidate.text),
            }
        }
        roster
    }

    pub fn len(&self) -> usize {
        self.matched.len() + self.unmatched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use squad_directory::Position;

    fn candidate(text: &str) -> CandidateName {
        CandidateName {
            text: text.to_string(),
            confidence: 0.9,
        }
    }

    #[test]
    fn test_partition_keeps_every_candidate_in_order() {
        let saka = PlayerRecord::new(7, "Saka", "Bukayo", "Saka", 1, Position::Midfielder);
        let rice = PlayerRecord::new(8, "Rice", "Declan", "Rice", 1, Position::Midfielder);
        let results = vec![
            MatchResult::exact(candidate("Saka"), saka.clone()),
            MatchResult::none(candidate("Transfers"), 40.0),
            MatchResult::fuzzy(candidate("Rlce"), rice.clone(), 75.0),
            MatchResult::none(candidate("Bank"), 0.0),
        ];

        let roster = Roster::partition(results);

        assert_eq!(roster.matched, vec![saka, rice]);
        assert_eq!(roster.unmatched, vec!["Transfers", "Bank"]);
        assert_eq!(roster.len(), 4);
    }

    #[test]
    fn test_match_method_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&MatchMethod::Fuzzy).unwrap(),
            "\"fuzzy\""
        );
    }
}
