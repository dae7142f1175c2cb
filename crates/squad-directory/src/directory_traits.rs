//! Directory trait definitions for squadscan
//!
//! - `PlayerDirectory`: the league provider, consumed as a read-only lookup
//! - `DirectorySnapshot`: the immutable view one pipeline run works against
//!
//! The provider may refresh its data between calls; each call to
//! `lookup_all` yields an independent snapshot and nothing here caches one.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::DirectoryResult;
use crate::record::PlayerRecord;

/// Read-only source of player records.
///
/// Guarantees:
/// - `lookup_all` never mutates provider state.
/// - Every returned record has already passed boundary validation.
#[async_trait]
pub trait PlayerDirectory: Send + Sync {
    /// Fetch every known player.
    async fn lookup_all(&self) -> DirectoryResult<Vec<PlayerRecord>>;

    /// Fetch every known player as an immutable snapshot.
    async fn snapshot(&self) -> DirectoryResult<DirectorySnapshot> {
        Ok(DirectorySnapshot::new(self.lookup_all().await?))
    }
}

/// Immutable, id-ordered view of the directory.
///
/// Records are sorted by ascending id so that every "first match" and every
/// tie-break over the snapshot resolves to the lowest id.
#[derive(Debug, Clone)]
pub struct DirectorySnapshot {
    players: Vec<PlayerRecord>,
    by_id: HashMap<u32, usize>,
    captured_at: DateTime<Utc>,
}

impl DirectorySnapshot {
    pub fn new(mut players: Vec<PlayerRecord>) -> Self {
        players.sort_by_key(|p| p.id);
        let by_id = players
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.id, idx))
            .collect();
        Self {
            players,
            by_id,
            captured_at: Utc::now(),
        }
    }

    /// Snapshot with no players. Matching against it leaves every candidate
    /// unmatched.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn get(&self, id: u32) -> Option<&PlayerRecord> {
        self.by_id.get(&id).map(|&idx| &self.players[idx])
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}
