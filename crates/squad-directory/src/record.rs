//! Typed player records supplied by the league provider.

use serde::{Deserialize, Serialize};

/// Playing position of a squad member.
///
/// Serialized as the provider's numeric code: 1 keeper, 2 defender,
/// 3 midfielder, 4 forward. Any other code is rejected on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    /// All positions in provider code order.
    pub const ALL: [Position; 4] = [
        Position::Goalkeeper,
        Position::Defender,
        Position::Midfielder,
        Position::Forward,
    ];

    /// Provider position code (1..=4).
    pub fn code(self) -> u8 {
        match self {
            Position::Goalkeeper => 1,
            Position::Defender => 2,
            Position::Midfielder => 3,
            Position::Forward => 4,
        }
    }

    /// Short label used in human-readable reports.
    pub fn label(self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }
}

impl TryFrom<u8> for Position {
    type Error = String;

    fn try_from(code: u8) -> std::result::Result<Self, Self::Error> {
        match code {
            1 => Ok(Position::Goalkeeper),
            2 => Ok(Position::Defender),
            3 => Ok(Position::Midfielder),
            4 => Ok(Position::Forward),
            other => Err(format!("unknown position code {other}")),
        }
    }
}

impl From<Position> for u8 {
    fn from(position: Position) -> Self {
        position.code()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A player as known to the league provider.
///
/// Accepts the provider's own field names (`team`, `element_type`) on input
/// and always serializes with `team_id` / `position_code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: u32,
    /// Display name shown on the roster graphic (usually the surname)
    pub web_name: String,
    pub first_name: String,
    pub second_name: String,
    /// Club identifier
    #[serde(alias = "team")]
    pub team_id: u32,
    #[serde(alias = "element_type")]
    pub position_code: Position,
}

impl PlayerRecord {
    pub fn new(
        id: u32,
        web_name: impl Into<String>,
        first_name: impl Into<String>,
        second_name: impl Into<String>,
        team_id: u32,
        position_code: Position,
    ) -> Self {
        Self {
            id,
            web_name: web_name.into(),
            first_name: first_name.into(),
            second_name: second_name.into(),
            team_id,
            position_code,
        }
    }

    /// `first_name second_name`, trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.second_name)
            .trim()
            .to_string()
    }

    pub fn position(&self) -> Position {
        self.position_code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_code_round_trip_through_serde() {
        let json = serde_json::to_string(&Position::Midfielder).unwrap();
        assert_eq!(json, "3");
        let back: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Position::Midfielder);
    }

    #[test]
    fn test_unknown_position_code_rejected() {
        let err = serde_json::from_str::<Position>("5").unwrap_err();
        assert!(err.to_string().contains("unknown position code 5"));
    }

    #[test]
    fn test_record_accepts_provider_field_names() {
        let record: PlayerRecord = serde_json::from_value(serde_json::json!({
            "id": 355,
            "web_name": "Haaland",
            "first_name": "Erling",
            "second_name": "Haaland",
            "team": 13,
            "element_type": 4,
            "now_cost": 140
        }))
        .unwrap();

        assert_eq!(record.team_id, 13);
        assert_eq!(record.position(), Position::Forward);

        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["team_id"], 13);
        assert_eq!(out["position_code"], 4);
        assert!(out.get("team").is_none());
    }

    #[test]
    fn test_full_name_is_trimmed() {
        let record = PlayerRecord::new(1, "Alisson", "", "Alisson", 12, Position::Goalkeeper);
        assert_eq!(record.full_name(), "Alisson");
    }
}
