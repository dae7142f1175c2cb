//! Squadscan domain model.
//!
//! Types flowing through one reconstruction run, leaf-first:
//! detections, candidates, match results, the roster partition, the
//! validation report and the final `OcrResult`.

pub mod detection;
pub mod error;
pub mod matching;
pub mod result;

pub use detection::{CandidateName, RawDetection};
pub use error::{ConfigError, OcrError, PipelineError, PipelineResult, SelectionError};
pub use matching::{MatchMethod, MatchResult, Roster};
pub use result::{OcrResult, ValidationReport};
