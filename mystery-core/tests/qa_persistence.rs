//! QA tests for player notes carried between games.
//!
//! Run with: `cargo test -p mystery-core --test qa_persistence`

use mystery_core::{
    CharacterId, GameConfig, Investigation, LastKillerStore, PersistError, PlayerNotes,
    ScriptedOracle, SessionError, TestHarness,
};
use tempfile::TempDir;

#[tokio::test]
async fn test_finished_game_saved_and_resumed() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("notes.json");

    let mut harness = TestHarness::new();
    harness.accuse(CharacterId::Rom).unwrap();
    harness.accuse(CharacterId::Michal).unwrap();

    let notes = harness.notes();
    assert_eq!(notes.get(), Some(CharacterId::Michal));
    assert_eq!(notes.high_scores.len(), 1);
    assert!(notes.high_scores.best().unwrap().correct);

    harness.investigation.save_notes(&path).await.unwrap();

    for seed in 0..20 {
        let game = Investigation::resume(
            GameConfig::new().with_seed(seed),
            &path,
            ScriptedOracle::default(),
        )
        .await
        .unwrap();
        assert_eq!(game.notes().get(), Some(CharacterId::Michal));
        assert_eq!(game.notes().high_scores.len(), 1);
    }
}

#[tokio::test]
async fn test_lost_game_recorded_as_incorrect() {
    let mut harness = TestHarness::new();
    for id in [CharacterId::Rom, CharacterId::Ilan, CharacterId::Neta] {
        harness.accuse(id).unwrap();
    }
    let best = harness.notes().high_scores.best().unwrap();
    assert!(!best.correct);
    assert_eq!(harness.notes().get(), Some(CharacterId::Michal));
}

#[tokio::test]
async fn test_reset_mid_game_keeps_notes() {
    let mut harness = TestHarness::new();
    harness.accuse(CharacterId::Rom).unwrap();
    harness.investigation.play_again().unwrap();

    assert_eq!(harness.notes().get(), None);
    assert!(harness.notes().high_scores.is_empty());
    assert_eq!(harness.attempts_remaining(), 3);
}

#[tokio::test]
async fn test_missing_notes_start_fresh() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("never_written.json");

    let mut game = Investigation::new(
        GameConfig::new().with_seed(3),
        PlayerNotes::new(),
        ScriptedOracle::default(),
    )
    .unwrap();
    game.load_notes(&path).await.unwrap();
    assert_eq!(game.notes(), &PlayerNotes::new());
}

#[tokio::test]
async fn test_corrupt_notes_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("notes.json");
    tokio::fs::write(&path, "not json").await.unwrap();

    let result = Investigation::resume(GameConfig::new(), &path, ScriptedOracle::default()).await;
    assert!(matches!(
        result,
        Err(SessionError::Persist(PersistError::Json(_)))
    ));
}
