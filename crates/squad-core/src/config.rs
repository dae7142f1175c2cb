//! Pipeline configuration and squad composition rules.
//!
//! `PipelineConfig::from_env` reads:
//! - `SQUAD_FUZZY_THRESHOLD` (0–100, default 80)
//! - `SQUAD_MAX_CONCURRENT` (>= 1, default: available cores)
//! - `SQUAD_OCR_CONFIDENCE` (0.0–1.0, default 0.6)

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use squad_directory::Position;

use crate::domain::ConfigError;

pub const ENV_FUZZY_THRESHOLD: &str = "SQUAD_FUZZY_THRESHOLD";
pub const ENV_MAX_CONCURRENT: &str = "SQUAD_MAX_CONCURRENT";
pub const ENV_OCR_CONFIDENCE: &str = "SQUAD_OCR_CONFIDENCE";

const FUZZY_THRESHOLD_RANGE: RangeInclusive<f64> = 0.0..=100.0;
const OCR_CONFIDENCE_RANGE: RangeInclusive<f32> = 0.0..=1.0;

/// Tunables for one pipeline instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Minimum fuzzy similarity (0–100) for a fuzzy match to be accepted.
    pub fuzzy_threshold: f64,
    /// Maximum number of concurrent match tasks.
    pub max_concurrent: usize,
    /// Detections below this confidence are dropped by `ConfidenceFloor`.
    pub ocr_confidence_threshold: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 80.0,
            max_concurrent: default_concurrency(),
            ocr_confidence_threshold: 0.6,
        }
    }
}

impl PipelineConfig {
    /// Load from environment, falling back to defaults for unset keys.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_FUZZY_THRESHOLD) {
            let value: f64 = parse(ENV_FUZZY_THRESHOLD, &raw)?;
            if !FUZZY_THRESHOLD_RANGE.contains(&value) {
                return Err(invalid(ENV_FUZZY_THRESHOLD, &raw, "must be within 0..=100"));
            }
            config.fuzzy_threshold = value;
        }

        if let Some(raw) = lookup(ENV_MAX_CONCURRENT) {
            let value: usize = parse(ENV_MAX_CONCURRENT, &raw)?;
            if value == 0 {
                return Err(invalid(ENV_MAX_CONCURRENT, &raw, "must be at least 1"));
            }
            config.max_concurrent = value;
        }

        if let Some(raw) = lookup(ENV_OCR_CONFIDENCE) {
            let value: f32 = parse(ENV_OCR_CONFIDENCE, &raw)?;
            if !OCR_CONFIDENCE_RANGE.contains(&value) {
                return Err(invalid(ENV_OCR_CONFIDENCE, &raw, "must be within 0.0..=1.0"));
            }
            config.ocr_confidence_threshold = value;
        }

        Ok(config)
    }

    /// Range-check values set through the `with_*` builders.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !FUZZY_THRESHOLD_RANGE.contains(&self.fuzzy_threshold) {
            return Err(invalid(
                "fuzzy_threshold",
                &self.fuzzy_threshold.to_string(),
                "must be within 0..=100",
            ));
        }
        if self.max_concurrent == 0 {
            return Err(invalid("max_concurrent", "0", "must be at least 1"));
        }
        if !OCR_CONFIDENCE_RANGE.contains(&self.ocr_confidence_threshold) {
            return Err(invalid(
                "ocr_confidence_threshold",
                &self.ocr_confidence_threshold.to_string(),
                "must be within 0.0..=1.0",
            ));
        }
        Ok(())
    }

    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    /// Zero is raised to 1.
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    pub fn with_ocr_confidence_threshold(mut self, threshold: f32) -> Self {
        self.ocr_confidence_threshold = threshold;
        self
    }
}

fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn parse<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| invalid(key, raw, &e.to_string()))
}

fn invalid(key: &str, raw: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        value: raw.to_string(),
        reason: reason.to_string(),
    }
}

/// Structural constraints of a legal squad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadRules {
    pub squad_size: usize,
    /// Required count per position.
    pub quotas: BTreeMap<Position, usize>,
    /// Maximum players sharing one club.
    pub max_per_club: usize,
}

impl SquadRules {
    /// 15 players; 2 GK, 5 DEF, 5 MID, 3 FWD; at most 3 per club.
    pub fn standard() -> Self {
        Self {
            squad_size: 15,
            quotas: BTreeMap::from([
                (Position::Goalkeeper, 2),
                (Position::Defender, 5),
                (Position::Midfielder, 5),
                (Position::Forward, 3),
            ]),
            max_per_club: 3,
        }
    }

    pub fn quota(&self, position: Position) -> usize {
        self.quotas.get(&position).copied().unwrap_or(0)
    }
}

impl Default for SquadRules {
    fn default() -> Self {
        Self::standard()
    }
}
