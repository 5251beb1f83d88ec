//! Player notes persistence.
//!
//! Everything that outlives a single game: the last killer (so the next
//! case picks someone else) and the high-score table.

use crate::case::LastKillerStore;
use crate::character::CharacterId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tokio::fs;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Current notes file version.
const NOTES_VERSION: u32 = 1;

/// How many scores the table keeps.
pub const MAX_HIGH_SCORES: usize = 10;

/// One finished game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Seconds from start to the final accusation.
    pub time_secs: u64,
    pub date: DateTime<Utc>,
    pub correct: bool,
}

impl ScoreEntry {
    /// Score for a game finished now.
    pub fn new(elapsed: Duration, correct: bool) -> Self {
        Self {
            time_secs: elapsed.as_secs(),
            date: Utc::now(),
            correct,
        }
    }
}

/// Best results, solved games first, then fastest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScoreTable {
    entries: Vec<ScoreEntry>,
}

impl HighScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a score. Returns its rank (0 = best), or `None` if it did
    /// not make the table.
    pub fn record(&mut self, entry: ScoreEntry) -> Option<usize> {
        let rank = self
            .entries
            .iter()
            .position(|existing| ranks_before(&entry, existing))
            .unwrap_or(self.entries.len());
        if rank >= MAX_HIGH_SCORES {
            return None;
        }
        self.entries.insert(rank, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn best(&self) -> Option<&ScoreEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Strictly better: solved beats unsolved, then faster wins. Ties keep
/// the earlier entry ahead.
fn ranks_before(a: &ScoreEntry, b: &ScoreEntry) -> bool {
    (!a.correct, a.time_secs) < (!b.correct, b.time_secs)
}

/// What the player carries from game to game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerNotes {
    /// Notes format version for compatibility checking.
    pub version: u32,

    /// Killer of the last finished game.
    pub last_killer: Option<CharacterId>,

    #[serde(default)]
    pub high_scores: HighScoreTable,
}

impl PlayerNotes {
    pub fn new() -> Self {
        Self {
            version: NOTES_VERSION,
            last_killer: None,
            high_scores: HighScoreTable::new(),
        }
    }

    /// Save to a JSON file.
    pub async fn save_json(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Load from a JSON file.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let content = fs::read_to_string(path).await?;
        let notes: Self = serde_json::from_str(&content)?;

        if notes.version != NOTES_VERSION {
            return Err(PersistError::VersionMismatch {
                expected: NOTES_VERSION,
                found: notes.version,
            });
        }

        Ok(notes)
    }

    /// Load from a JSON file, or start fresh if it doesn't exist yet.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        match Self::load_json(path).await {
            Err(PersistError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            other => other,
        }
    }
}

impl Default for PlayerNotes {
    fn default() -> Self {
        Self::new()
    }
}

impl LastKillerStore for PlayerNotes {
    fn get(&self) -> Option<CharacterId> {
        self.last_killer
    }

    fn set(&mut self, killer: CharacterId) {
        self.last_killer = Some(killer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn score(secs: u64, correct: bool) -> ScoreEntry {
        ScoreEntry::new(Duration::from_secs(secs), correct)
    }

    #[test]
    fn test_high_scores_sorted() {
        let mut table = HighScoreTable::new();
        table.record(score(300, false));
        table.record(score(200, true));
        table.record(score(100, false));
        table.record(score(250, true));

        let order: Vec<_> = table
            .entries()
            .iter()
            .map(|e| (e.correct, e.time_secs))
            .collect();
        assert_eq!(order, vec![(true, 200), (true, 250), (false, 100), (false, 300)]);
        assert_eq!(table.best().map(|e| e.time_secs), Some(200));
    }

    #[test]
    fn test_high_scores_capped() {
        let mut table = HighScoreTable::new();
        for secs in 1..=MAX_HIGH_SCORES as u64 {
            assert!(table.record(score(secs * 10, true)).is_some());
        }
        assert_eq!(table.record(score(5_000, true)), None);
        assert_eq!(table.record(score(1, false)), None);
        assert_eq!(table.record(score(5, true)), Some(0));
        assert_eq!(table.len(), MAX_HIGH_SCORES);
        assert_eq!(table.entries().last().map(|e| e.time_secs), Some(90));
    }

    #[test]
    fn test_notes_are_a_last_killer_store() {
        let mut notes = PlayerNotes::new();
        assert_eq!(notes.get(), None);
        notes.set(CharacterId::Neta);
        assert_eq!(notes.get(), Some(CharacterId::Neta));
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.json");

        let mut notes = PlayerNotes::new();
        notes.set(CharacterId::Ilan);
        notes.high_scores.record(score(42, true));
        notes.save_json(&path).await.unwrap();

        let loaded = PlayerNotes::load_json(&path).await.unwrap();
        assert_eq!(loaded, notes);
    }

    #[tokio::test]
    async fn test_version_mismatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.json");
        fs::write(&path, r#"{"version": 99, "last_killer": null}"#)
            .await
            .unwrap();

        assert!(matches!(
            PlayerNotes::load_json(&path).await,
            Err(PersistError::VersionMismatch {
                expected: 1,
                found: 99
            })
        ));
    }

    #[tokio::test]
    async fn test_missing_file_starts_fresh() {
        let dir = tempdir().unwrap();
        let notes = PlayerNotes::load_or_default(dir.path().join("absent.json"))
            .await
            .unwrap();
        assert_eq!(notes, PlayerNotes::new());
    }
}
