//! Testing utilities for the mystery engine.
//!
//! This module provides tools for integration testing:
//! - `ScriptedOracle` for deterministic interrogations without a model
//! - `TestHarness` for scripted investigations over a known case
//! - Assertion helpers for verifying the clue board

use crate::accusation::Verdict;
use crate::case::Case;
use crate::catalog::{Catalogs, GameConfig};
use crate::character::CharacterId;
use crate::headless::{Investigation, Reply};
use crate::oracle::{DialogueOracle, OracleError, OracleRequest};
use crate::persist::PlayerNotes;
use crate::session::{GameSession, SessionError};
use async_trait::async_trait;
use std::collections::VecDeque;

/// An oracle that returns scripted replies in order.
///
/// Once the script runs out every call fails with [`OracleError::Exhausted`].
#[derive(Debug, Default)]
pub struct ScriptedOracle {
    script: VecDeque<Result<String, OracleError>>,
    requests: Vec<OracleRequest>,
}

impl ScriptedOracle {
    pub fn new(replies: Vec<String>) -> Self {
        Self {
            script: replies.into_iter().map(Ok).collect(),
            requests: Vec::new(),
        }
    }

    /// Queue a successful reply.
    pub fn queue_reply(&mut self, text: impl Into<String>) {
        self.script.push_back(Ok(text.into()));
    }

    /// Queue a failure.
    pub fn queue_error(&mut self, error: OracleError) {
        self.script.push_back(Err(error));
    }

    /// Every request received, oldest first.
    pub fn requests(&self) -> &[OracleRequest] {
        &self.requests
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

#[async_trait]
impl DialogueOracle for ScriptedOracle {
    async fn respond(&mut self, request: &OracleRequest) -> Result<String, OracleError> {
        self.requests.push(request.clone());
        self.script.pop_front().unwrap_or(Err(OracleError::Exhausted))
    }
}

/// The case used by [`TestHarness::new`]: Michal in the kitchen with poison.
pub fn sample_case() -> Case {
    let motive = Catalogs::family_estate()
        .motives_for(CharacterId::Michal)
        .get(1)
        .cloned()
        .unwrap_or_default();
    Case {
        killer: CharacterId::Michal,
        weapon: "poison".to_string(),
        location: "kitchen".to_string(),
        time_of_death: "at midnight".to_string(),
        motive,
    }
}

/// Test harness for scripted investigations.
pub struct TestHarness {
    pub investigation: Investigation<ScriptedOracle>,
}

impl TestHarness {
    /// A harness over [`sample_case`] with fresh notes.
    pub fn new() -> Self {
        Self::with_case(sample_case())
    }

    /// A harness over a specific case with the default configuration.
    ///
    /// Panics if the case doesn't fit the family-estate catalogs.
    pub fn with_case(case: Case) -> Self {
        let session = GameSession::with_case(GameConfig::new().with_seed(0), PlayerNotes::new(), case)
            .unwrap_or_else(|e| panic!("test case rejected: {e}"));
        Self {
            investigation: Investigation::from_session(session, ScriptedOracle::default()),
        }
    }

    /// Queue the next oracle reply.
    pub fn expect_reply(&mut self, text: impl Into<String>) -> &mut Self {
        self.investigation.oracle_mut().queue_reply(text);
        self
    }

    /// Queue an oracle failure.
    pub fn expect_failure(&mut self, error: OracleError) -> &mut Self {
        self.investigation.oracle_mut().queue_error(error);
        self
    }

    pub async fn ask(&mut self, id: CharacterId, question: &str) -> Result<Reply, SessionError> {
        self.investigation.ask(id, question).await
    }

    pub fn accuse(&mut self, id: CharacterId) -> Result<Verdict, SessionError> {
        self.investigation.accuse(id)
    }

    pub fn clue_count(&self) -> usize {
        self.investigation.session().clues().len()
    }

    /// Check if a clue with this exact text (case-insensitive) is on the board.
    pub fn has_clue(&self, text: &str) -> bool {
        self.investigation
            .session()
            .clues()
            .iter()
            .any(|c| c.text.eq_ignore_ascii_case(text))
    }

    pub fn attempts_remaining(&self) -> u32 {
        self.investigation.session().attempts_remaining()
    }

    pub fn notes(&self) -> &PlayerNotes {
        self.investigation.notes()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert that a clue is on the board.
#[track_caller]
pub fn assert_has_clue(harness: &TestHarness, text: &str) {
    assert!(harness.has_clue(text), "Expected clue '{text}' on the board");
}

/// Assert that a clue is not on the board.
#[track_caller]
pub fn assert_no_clue(harness: &TestHarness, text: &str) {
    assert!(
        !harness.has_clue(text),
        "Expected clue '{text}' NOT to be on the board"
    );
}

/// Assert the clue count.
#[track_caller]
pub fn assert_clue_count(harness: &TestHarness, expected: usize) {
    let found = harness.clue_count();
    assert_eq!(found, expected, "Expected {expected} clues, found {found}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_oracle_in_order() {
        let mut harness = TestHarness::new();
        harness
            .expect_reply("I was in the barn.")
            .expect_reply("*The tractor was moved*.");

        let first = harness.ask(CharacterId::Ilan, "Where were you?").await.unwrap();
        assert_eq!(first.text, "I was in the barn.");
        assert!(first.new_clues.is_empty());

        let second = harness.ask(CharacterId::Ilan, "Anything odd?").await.unwrap();
        assert_eq!(second.new_clues.len(), 1);
        assert_has_clue(&harness, "the tractor was moved");
        assert_clue_count(&harness, 1);

        // history carried into the second request
        let requests = harness.investigation.oracle().requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].history.len(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_oracle_falls_back() {
        let mut harness = TestHarness::new();
        let reply = harness.ask(CharacterId::Rom, "Hello?").await.unwrap();
        assert!(reply.failed);
        assert_no_clue(&harness, "hello");
    }

    #[test]
    fn test_sample_case_fits_catalogs() {
        let case = sample_case();
        assert!(Catalogs::family_estate()
            .motives_for(case.killer)
            .contains(&case.motive));
    }
}
