//! Error taxonomy for squad-core.
//!
//! Only input failure and cancellation are operation failures. Partial
//! matches, unmatched candidates and rule violations are data.

/// Errors raised by an OCR collaborator.
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("image is empty")]
    EmptyImage,

    #[error("image could not be decoded: {0}")]
    Undecodable(String),

    #[error("no text detected")]
    NoDetections,

    #[error("ocr engine failure: {0}")]
    Engine(String),
}

/// Errors surfaced by a reconstruction run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("pipeline run cancelled")]
    Cancelled,

    #[error("match task failed: {0}")]
    TaskFailed(String),
}

/// Result type for pipeline runs.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

/// Errors from validating a manually supplied selection.
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("unknown player ids: {0:?}")]
    UnknownPlayers(Vec<u32>),

    #[error("players listed more than once: {0:?}")]
    DuplicatePlayers(Vec<u32>),

    #[error("starters not in selection: {0:?}")]
    StartersOutsideSelection(Vec<u32>),
}
