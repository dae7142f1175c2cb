//! Error types for squad-directory

use thiserror::Error;

/// Result type for directory operations
pub type DirectoryResult<T> = std::result::Result<T, DirectoryError>;

/// Errors that can occur at the directory boundary
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Directory source could not be read
    #[error("Directory read failed: {0}")]
    Io(#[from] std::io::Error),

    /// Directory document is not in a recognised shape
    #[error("Directory parse failed: {0}")]
    Parse(String),

    /// A single player entry failed validation
    #[error("Invalid player record {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// Provider is temporarily unable to serve a snapshot
    #[error("Directory unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for DirectoryError {
    fn from(err: serde_json::Error) -> Self {
        DirectoryError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_record_display_names_index() {
        let err = DirectoryError::InvalidRecord {
            index: 7,
            reason: "unknown position code 9".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains("unknown position code 9"));
    }

    #[test]
    fn test_json_error_maps_to_parse() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: DirectoryError = json_err.into();
        assert!(matches!(err, DirectoryError::Parse(_)));
    }
}
