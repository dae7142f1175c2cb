//! Squadscan Core Library
//!
//! Reconstructs a validated 15-player fantasy squad from noisy OCR text:
//! candidate filtering, exact-then-fuzzy name matching, squad composition
//! validation and formation inference, sequenced by [`Pipeline`].

pub mod config;
pub mod domain;
pub mod filter;
pub mod formation;
pub mod matcher;
pub mod obs;
pub mod ocr;
pub mod parallel;
pub mod pipeline;
pub mod selection;
pub mod telemetry;
pub mod validator;

pub use config::{PipelineConfig, SquadRules};
pub use domain::{
    CandidateName, ConfigError, MatchMethod, MatchResult, OcrError, OcrResult, PipelineError,
    PipelineResult, RawDetection, Roster, SelectionError, ValidationReport,
};
pub use filter::{filter_candidates, STOPWORDS};
pub use formation::{infer_formation, Formation};
pub use matcher::{similarity, NameMatcher};
pub use ocr::{ConfidenceFloor, JsonDetectionsEngine, OcrEngine};
pub use parallel::match_candidates_parallel;
pub use pipeline::Pipeline;
pub use selection::{validate_selection, SelectionReport};
pub use telemetry::init_tracing;
pub use validator::validate_roster;

pub use squad_directory::{
    DirectoryError, DirectorySnapshot, JsonFileDirectory, PlayerDirectory, PlayerRecord, Position,
};

/// Squadscan version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
