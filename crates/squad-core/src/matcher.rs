//! Name matcher.
//!
//! Resolves a candidate against a directory snapshot:
//!
//! 1. **Exact**: case-insensitive equality with `web_name` or with
//!    `first_name second_name`. First player in snapshot order wins.
//! 2. **Fuzzy**: Indel similarity ratio (0–100) against every
//!    `web_name`; the best score is accepted when it reaches the threshold.
//!    Equal best scores resolve to the lowest player id.
//! 3. Otherwise no match.
//!
//! Matching is a pure function of `(candidate, snapshot)` and is total over
//! any snapshot size, including an empty one.

use rapidfuzz::distance::indel;
use squad_directory::{DirectorySnapshot, PlayerRecord};

use crate::domain::{CandidateName, MatchResult};

/// Similarity of two names on a 0–100 scale, ignoring case.
///
/// Indel ratio: `100 * (len_a + len_b - indel) / (len_a + len_b)`, where
/// `indel` counts the insertions and deletions turning one name into the
/// other and lengths count chars. A dropped letter costs one edit against
/// the combined length, so short surnames survive OCR losses. Computed from
/// integers so that whole-number ratios come out exact.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 100.0;
    }
    let distance = indel::distance(a.chars(), b.chars());
    (total - distance) as f64 * 100.0 / total as f64
}

/// Candidate-to-player resolver with a fixed fuzzy threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NameMatcher {
    threshold: f64,
}

impl Default for NameMatcher {
    fn default() -> Self {
        Self { threshold: 80.0 }
    }
}

impl NameMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Resolve one candidate. Always returns exactly one result.
    pub fn match_candidate(
        &self,
        candidate: CandidateName,
        snapshot: &DirectorySnapshot,
    ) -> MatchResult {
        if let Some(player) = exact_match(&candidate.text, snapshot.players()) {
            return MatchResult::exact(candidate, player.clone());
        }

        match best_fuzzy(&candidate.text, snapshot.players()) {
            Some((player, score)) if score >= self.threshold => {
                MatchResult::fuzzy(candidate, player.clone(), score)
            }
            Some((_, score)) => MatchResult::none(candidate, score),
            None => MatchResult::none(candidate, 0.0),
        }
    }
}

fn exact_match<'a>(text: &str, players: &'a [PlayerRecord]) -> Option<&'a PlayerRecord> {
    let needle = text.to_lowercase();
    players.iter().find(|p| {
        p.web_name.to_lowercase() == needle || p.full_name().to_lowercase() == needle
    })
}

/// Highest-scoring player by `web_name`. Players are scanned in snapshot
/// (ascending id) order and only a strictly higher score replaces the
/// current best, so ties keep the lowest id.
fn best_fuzzy<'a>(text: &str, players: &'a [PlayerRecord]) -> Option<(&'a PlayerRecord, f64)> {
    let mut best: Option<(&PlayerRecord, f64)> = None;
    for player in players {
        let score = similarity(text, &player.web_name);
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((player, score)),
        }
    }
    best
}
