//! Formation inference.
//!
//! A formation is the defender-midfielder-forward shape of the starting
//! eleven. Detections carry no pitch layout, so the pipeline cannot tell
//! starters from bench: [`infer_formation`] reports the fixed
//! [`Formation::PLACEHOLDER`] label instead of guessing. When a caller does
//! know the starters, [`Formation::from_starters`] computes the real shape.

use serde::{Deserialize, Serialize};
use squad_directory::{PlayerRecord, Position};

use crate::validator::position_counts;

pub const STARTING_SIZE: usize = 11;
pub const MIN_DEFENDERS: usize = 3;
pub const MIN_MIDFIELDERS: usize = 2;
pub const MIN_FORWARDS: usize = 1;

/// Outfield shape of a starting eleven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formation {
    pub defenders: usize,
    pub midfielders: usize,
    pub forwards: usize,
}

impl Formation {
    /// Reported when no starter signal is available.
    pub const PLACEHOLDER: Formation = Formation {
        defenders: 3,
        midfielders: 4,
        forwards: 3,
    };

    /// Shape of an explicit starting eleven.
    ///
    /// Returns `None` unless there are exactly 11 starters with one keeper,
    /// at least 3 defenders, 2 midfielders and 1 forward.
    pub fn from_starters(starters: &[PlayerRecord]) -> Option<Formation> {
        if starters.len() != STARTING_SIZE {
            return None;
        }
        let counts = position_counts(starters);
        let count = |p: Position| counts.get(&p).copied().unwrap_or(0);

        let formation = Formation {
            defenders: count(Position::Defender),
            midfielders: count(Position::Midfielder),
            forwards: count(Position::Forward),
        };

        let legal = count(Position::Goalkeeper) == 1
            && formation.defenders >= MIN_DEFENDERS
            && formation.midfielders >= MIN_MIDFIELDERS
            && formation.forwards >= MIN_FORWARDS;
        legal.then_some(formation)
    }
}

impl std::fmt::Display for Formation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.defenders, self.midfielders, self.forwards)
    }
}

/// Formation label for a matched roster without layout information.
///
/// Always the placeholder label, whatever was matched. Only an input
/// failure leaves a result without a formation.
pub fn infer_formation(_matched: &[PlayerRecord]) -> Option<String> {
    Some(Formation::PLACEHOLDER.to_string())
}
