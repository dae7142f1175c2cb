//! Validation of a manually supplied selection.
//!
//! After reviewing an `OcrResult`, a user corrects the squad by player id.
//! This module resolves those ids against a directory snapshot, runs the
//! roster validator and, when the starting eleven is known, computes the
//! real formation instead of the placeholder.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use squad_directory::{DirectorySnapshot, PlayerRecord};

use crate::config::SquadRules;
use crate::domain::SelectionError;
use crate::formation::Formation;
use crate::validator::validate_roster;

/// Outcome of validating a corrected selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionReport {
    pub players: Vec<PlayerRecord>,
    pub is_valid_team: bool,
    pub validation_errors: Vec<String>,
    /// Shape of the starting eleven, when starters were supplied and legal.
    pub formation: Option<String>,
    pub notes: Vec<String>,
}

/// Validate a selection given as player ids.
///
/// `starters`, when present, must be a subset of `ids`.
pub fn validate_selection(
    ids: &[u32],
    starters: Option<&[u32]>,
    snapshot: &DirectorySnapshot,
    rules: &SquadRules,
) -> Result<SelectionReport, SelectionError> {
    let duplicates = repeated(ids);
    if !duplicates.is_empty() {
        return Err(SelectionError::DuplicatePlayers(duplicates));
    }

    let unknown: Vec<u32> = ids
        .iter()
        .copied()
        .filter(|id| snapshot.get(*id).is_none())
        .collect();
    if !unknown.is_empty() {
        return Err(SelectionError::UnknownPlayers(unknown));
    }

    let players: Vec<PlayerRecord> = ids
        .iter()
        .filter_map(|id| snapshot.get(*id).cloned())
        .collect();
    let report = validate_roster(&players, rules);

    let mut notes = Vec::new();
    let formation = match starters {
        None => {
            notes.push("No starting eleven supplied; formation not computed".to_string());
            None
        }
        Some(starter_ids) => {
            let outside: Vec<u32> = starter_ids
                .iter()
                .copied()
                .filter(|id| !ids.contains(id))
                .collect();
            if !outside.is_empty() {
                return Err(SelectionError::StartersOutsideSelection(outside));
            }
            let starting: Vec<PlayerRecord> = starter_ids
                .iter()
                .filter_map(|id| snapshot.get(*id).cloned())
                .collect();
            match Formation::from_starters(&starting) {
                Some(formation) => Some(formation.to_string()),
                None => {
                    notes.push(format!(
                        "Starting eleven is not a legal formation ({} starters supplied)",
                        starting.len()
                    ));
                    None
                }
            }
        }
    };

    Ok(SelectionReport {
        players,
        is_valid_team: report.is_valid,
        validation_errors: report.errors,
        formation,
        notes,
    })
}

fn repeated(ids: &[u32]) -> Vec<u32> {
    let mut seen = BTreeSet::new();
    let mut repeated = BTreeSet::new();
    for id in ids {
        if !seen.insert(*id) {
            repeated.insert(*id);
        }
    }
    repeated.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use squad_directory::Position;

    /// ids 1-2 GK, 3-7 DEF, 8-12 MID, 13-15 FWD, three per club.
    fn snapshot() -> DirectorySnapshot {
        let players = (1..=15u32)
            .map(|id| {
                let position = match id {
                    1..=2 => Position::Goalkeeper,
                    3..=7 => Position::Defender,
                    8..=12 => Position::Midfielder,
                    _ => Position::Forward,
                };
                let name = format!("P{id}");
                PlayerRecord::new(id, name.clone(), "", name, (id - 1) / 3, position)
            })
            .collect();
        DirectorySnapshot::new(players)
    }

    fn all_ids() -> Vec<u32> {
        (1..=15).collect()
    }

    #[test]
    fn test_legal_selection_with_starters() {
        // GK 1, DEF 3-6, MID 8-11, FWD 13-14
        let starters = [1, 3, 4, 5, 6, 8, 9, 10, 11, 13, 14];
        let report =
            validate_selection(&all_ids(), Some(&starters), &snapshot(), &SquadRules::standard())
                .unwrap();
        assert!(report.is_valid_team);
        assert_eq!(report.formation.as_deref(), Some("4-4-2"));
        assert!(report.notes.is_empty());
    }

    #[test]
    fn test_selection_without_starters_has_no_formation() {
        let report =
            validate_selection(&all_ids(), None, &snapshot(), &SquadRules::standard()).unwrap();
        assert!(report.is_valid_team);
        assert_eq!(report.formation, None);
        assert_eq!(report.notes.len(), 1);
    }

    #[test]
    fn test_short_selection_reports_rule_violations() {
        let ids: Vec<u32> = (1..=14).collect();
        let report = validate_selection(&ids, None, &snapshot(), &SquadRules::standard()).unwrap();
        assert!(!report.is_valid_team);
        assert_eq!(report.validation_errors.len(), 2);
    }

    #[test]
    fn test_unknown_and_duplicate_ids_are_errors() {
        let err = validate_selection(&[1, 2, 99], None, &snapshot(), &SquadRules::standard())
            .unwrap_err();
        assert!(matches!(err, SelectionError::UnknownPlayers(ref ids) if ids == &vec![99]));

        let err = validate_selection(&[1, 2, 2, 3], None, &snapshot(), &SquadRules::standard())
            .unwrap_err();
        assert!(matches!(err, SelectionError::DuplicatePlayers(ref ids) if ids == &vec![2]));
    }

    #[test]
    fn test_starters_must_come_from_selection() {
        let ids: Vec<u32> = (1..=10).collect();
        let err = validate_selection(&ids, Some(&[1, 12]), &snapshot(), &SquadRules::standard())
            .unwrap_err();
        assert!(matches!(
            err,
            SelectionError::StartersOutsideSelection(ref ids) if ids == &vec![12]
        ));
    }

    #[test]
    fn test_illegal_starting_shape_is_noted() {
        let starters = [1, 2, 3, 4, 5, 8, 9, 10, 11, 13, 14];
        let report =
            validate_selection(&all_ids(), Some(&starters), &snapshot(), &SquadRules::standard())
                .unwrap();
        assert_eq!(report.formation, None);
        assert!(report.notes[0].contains("not a legal formation"));
    }
}
