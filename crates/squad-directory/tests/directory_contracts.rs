//! Contract tests for PlayerDirectory implementations.
//!
//! Exercises the in-memory fakes and the JSON file directory through the
//! public trait only.

use std::io::Write;

use squad_directory::fakes::{FailingDirectory, MemoryPlayerDirectory};
use squad_directory::{
    DirectoryError, JsonFileDirectory, PlayerDirectory, PlayerRecord, Position,
};

fn roster() -> Vec<PlayerRecord> {
    vec![
        PlayerRecord::new(308, "Salah", "Mohamed", "Salah", 12, Position::Midfielder),
        PlayerRecord::new(355, "Haaland", "Erling", "Haaland", 13, Position::Forward),
        PlayerRecord::new(12, "Raya", "David", "Raya Martin", 1, Position::Goalkeeper),
    ]
}

// ===========================================================================
// MemoryPlayerDirectory
// ===========================================================================

#[tokio::test]
async fn memory_directory_returns_all_records() {
    let dir = MemoryPlayerDirectory::new(roster());
    let players = dir.lookup_all().await.unwrap();
    assert_eq!(players.len(), 3);
}

#[tokio::test]
async fn snapshot_is_id_ordered_and_independent_per_call() {
    let dir = MemoryPlayerDirectory::new(roster());

    let first = dir.snapshot().await.unwrap();
    let second = dir.snapshot().await.unwrap();

    let ids: Vec<u32> = first.players().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![12, 308, 355]);
    assert_eq!(second.len(), 3);
    assert_eq!(dir.lookup_count(), 2, "each snapshot must hit the provider");
}

#[tokio::test]
async fn failing_directory_reports_unavailable() {
    let err = FailingDirectory.lookup_all().await.unwrap_err();
    assert!(matches!(err, DirectoryError::Unavailable(_)));
}

// ===========================================================================
// JsonFileDirectory
// ===========================================================================

#[tokio::test]
async fn json_directory_reads_bootstrap_document() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let doc = serde_json::json!({
        "elements": [
            {"id": 355, "web_name": "Haaland", "first_name": "Erling", "second_name": "Haaland",
             "team": 13, "element_type": 4, "status": "a"},
            {"id": 308, "web_name": "Salah", "first_name": "Mohamed", "second_name": "Salah",
             "team": 12, "element_type": 3, "status": "a"},
            {"id": 999, "web_name": "Broken", "first_name": "", "second_name": "Broken",
             "team": 3, "element_type": 0}
        ]
    });
    write!(file, "{doc}").unwrap();

    let dir = JsonFileDirectory::new(file.path());
    let snapshot = dir.snapshot().await.unwrap();

    assert_eq!(snapshot.len(), 2, "invalid entry is skipped, not fatal");
    assert_eq!(snapshot.get(355).unwrap().team_id, 13);
    assert_eq!(snapshot.get(308).unwrap().position(), Position::Midfielder);
}

#[tokio::test]
async fn json_directory_missing_file_is_io_error() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = JsonFileDirectory::new(tmp.path().join("absent.json"));
    let err = dir.lookup_all().await.unwrap_err();
    assert!(matches!(err, DirectoryError::Io(_)));
}

#[tokio::test]
async fn json_directory_garbage_is_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "<html>rate limited</html>").unwrap();

    let dir = JsonFileDirectory::new(file.path());
    let err = dir.lookup_all().await.unwrap_err();
    assert!(matches!(err, DirectoryError::Parse(_)));
}
