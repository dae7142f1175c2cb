//! File-backed player directory.
//!
//! Reads the league provider's bootstrap document from disk on every
//! `lookup_all`, so a refreshed file is picked up by the next run.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::directory_traits::PlayerDirectory;
use crate::error::{DirectoryError, DirectoryResult};
use crate::record::PlayerRecord;

/// Directory backed by a JSON document.
///
/// Accepted shapes:
/// - the provider bootstrap object, players under `"elements"`
/// - a bare array of player objects
#[derive(Debug, Clone)]
pub struct JsonFileDirectory {
    path: PathBuf,
}

impl JsonFileDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PlayerDirectory for JsonFileDirectory {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn lookup_all(&self) -> DirectoryResult<Vec<PlayerRecord>> {
        let bytes = tokio::fs::read(&self.path).await?;
        let document: Value = serde_json::from_slice(&bytes)?;
        let (records, rejected) = parse_players(document)?;

        if !rejected.is_empty() {
            warn!(
                rejected = rejected.len(),
                accepted = records.len(),
                "skipped invalid player entries"
            );
            for err in &rejected {
                debug!(error = %err, "rejected player entry");
            }
        }

        Ok(records)
    }
}

/// Validate each element of a directory document.
///
/// Returns the accepted records plus one `InvalidRecord` per rejected entry.
/// Fails only when the document itself has no recognisable player list.
pub fn parse_players(
    document: Value,
) -> DirectoryResult<(Vec<PlayerRecord>, Vec<DirectoryError>)> {
    let elements = match document {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("elements") {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(DirectoryError::Parse(
                    "\"elements\" is not an array".to_string(),
                ))
            }
            None => {
                return Err(DirectoryError::Parse(
                    "document has no \"elements\" list".to_string(),
                ))
            }
        },
        _ => {
            return Err(DirectoryError::Parse(
                "expected an object or an array of players".to_string(),
            ))
        }
    };

    let mut records = Vec::with_capacity(elements.len());
    let mut rejected = Vec::new();
    for (index, element) in elements.into_iter().enumerate() {
        match serde_json::from_value::<PlayerRecord>(element) {
            Ok(record) => records.push(record),
            Err(e) => rejected.push(DirectoryError::InvalidRecord {
                index,
                reason: e.to_string(),
            }),
        }
    }

    Ok((records, rejected))
}
