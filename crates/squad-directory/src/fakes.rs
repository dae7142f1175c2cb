//! In-memory fakes for the directory trait (testing only)
//!
//! Provides `MemoryPlayerDirectory`, `FailingDirectory` and
//! `PendingDirectory` that stand in for the league provider without any
//! file or network access.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::directory_traits::PlayerDirectory;
use crate::error::{DirectoryError, DirectoryResult};
use crate::record::PlayerRecord;

// ---------------------------------------------------------------------------
// MemoryPlayerDirectory
// ---------------------------------------------------------------------------

/// Directory backed by a fixed list of records.
///
/// Counts `lookup_all` calls so tests can assert that callers do not cache
/// snapshots between runs.
#[derive(Debug, Default)]
pub struct MemoryPlayerDirectory {
    players: Vec<PlayerRecord>,
    lookups: AtomicUsize,
}

impl MemoryPlayerDirectory {
    pub fn new(players: Vec<PlayerRecord>) -> Self {
        Self {
            players,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlayerDirectory for MemoryPlayerDirectory {
    async fn lookup_all(&self) -> DirectoryResult<Vec<PlayerRecord>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.players.clone())
    }
}

// ---------------------------------------------------------------------------
// FailingDirectory
// ---------------------------------------------------------------------------

/// Directory whose provider is always unavailable.
#[derive(Debug, Default)]
pub struct FailingDirectory;

#[async_trait]
impl PlayerDirectory for FailingDirectory {
    async fn lookup_all(&self) -> DirectoryResult<Vec<PlayerRecord>> {
        Err(DirectoryError::Unavailable(
            "provider refresh in progress".to_string(),
        ))
    }
}

// ---------------------------------------------------------------------------
// PendingDirectory
// ---------------------------------------------------------------------------

/// Directory whose lookup never completes.
#[derive(Debug, Default)]
pub struct PendingDirectory;

#[async_trait]
impl PlayerDirectory for PendingDirectory {
    async fn lookup_all(&self) -> DirectoryResult<Vec<PlayerRecord>> {
        std::future::pending().await
    }
}
