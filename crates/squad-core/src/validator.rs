//! Roster validator.
//!
//! Checks matched players against [`SquadRules`]. Every rule is evaluated
//! and each violation appends one human-readable error, so a caller sees
//! the full list of corrections at once. Never fails: too few players is a
//! count mismatch, not a fault.

use std::collections::BTreeMap;

use squad_directory::{PlayerRecord, Position};

use crate::config::SquadRules;
use crate::domain::ValidationReport;

/// Validate a roster against the squad composition rules.
pub fn validate_roster(players: &[PlayerRecord], rules: &SquadRules) -> ValidationReport {
    let mut errors = Vec::new();

    if players.len() != rules.squad_size {
        errors.push(format!(
            "Invalid team size: {} players (expected {})",
            players.len(),
            rules.squad_size
        ));
    }

    let counts = position_counts(players);
    for position in Position::ALL {
        let actual = counts.get(&position).copied().unwrap_or(0);
        let expected = rules.quota(position);
        if actual != expected {
            errors.push(format!(
                "Invalid {} count: {} (expected {})",
                position.label(),
                actual,
                expected
            ));
        }
    }

    for (team_id, count) in club_counts(players) {
        if count > rules.max_per_club {
            errors.push(format!(
                "Too many players from team {}: {} (max {})",
                team_id, count, rules.max_per_club
            ));
        }
    }

    ValidationReport::from_errors(errors)
}

/// Number of players per position.
pub fn position_counts(players: &[PlayerRecord]) -> BTreeMap<Position, usize> {
    let mut counts = BTreeMap::new();
    for player in players {
        *counts.entry(player.position()).or_insert(0) += 1;
    }
    counts
}

/// Number of players per club, ordered by team id.
pub fn club_counts(players: &[PlayerRecord]) -> BTreeMap<u32, usize> {
    let mut counts = BTreeMap::new();
    for player in players {
        *counts.entry(player.team_id).or_insert(0) += 1;
    }
    counts
}
