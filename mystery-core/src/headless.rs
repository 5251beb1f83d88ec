//! Headless investigation driver for automated play and testing.
//!
//! Wires a [`GameSession`] to a [`DialogueOracle`] and to the player's
//! persistent notes, so a whole game can be driven programmatically.

use crate::accusation::Verdict;
use crate::catalog::GameConfig;
use crate::character::CharacterId;
use crate::clues::Clue;
use crate::oracle::{DialogueOracle, OracleRequest};
use crate::persist::{PlayerNotes, ScoreEntry};
use crate::session::{GameSession, SessionError};
use std::path::Path;
use tracing::warn;

/// Shown to the player when the oracle can't answer.
pub const FALLBACK_REPLY: &str =
    "I'm sorry, I'm having trouble responding right now. Could you ask me again?";

/// A suspect's answer to one question.
#[derive(Debug, Clone)]
pub struct Reply {
    pub character: CharacterId,
    pub text: String,
    /// Clues this reply added to the board.
    pub new_clues: Vec<Clue>,
    /// True when the oracle failed and `text` is the fallback.
    pub failed: bool,
}

/// A murder investigation that can be played programmatically.
pub struct Investigation<O: DialogueOracle> {
    session: GameSession<PlayerNotes>,
    oracle: O,
}

impl<O: DialogueOracle> Investigation<O> {
    /// Start a new investigation with the player's notes.
    pub fn new(config: GameConfig, notes: PlayerNotes, oracle: O) -> Result<Self, SessionError> {
        let session = GameSession::start(config, notes)?;
        Ok(Self { session, oracle })
    }

    /// Start a new investigation, reading notes from `path` if it exists.
    pub async fn resume(
        config: GameConfig,
        path: impl AsRef<Path>,
        oracle: O,
    ) -> Result<Self, SessionError> {
        let notes = PlayerNotes::load_or_default(path).await?;
        Self::new(config, notes, oracle)
    }

    /// Wrap an existing session.
    pub fn from_session(session: GameSession<PlayerNotes>, oracle: O) -> Self {
        Self { session, oracle }
    }

    /// Ask a suspect a question.
    ///
    /// If the oracle fails, the fallback reply is returned and the session
    /// is left exactly as it was.
    pub async fn ask(&mut self, id: CharacterId, question: &str) -> Result<Reply, SessionError> {
        match self.try_ask(id, question).await {
            Err(SessionError::Oracle(e)) => {
                warn!(character = %id, error = %e, "oracle failed");
                Ok(Reply {
                    character: id,
                    text: FALLBACK_REPLY.to_string(),
                    new_clues: Vec::new(),
                    failed: true,
                })
            }
            other => other,
        }
    }

    /// Ask a suspect a question, surfacing oracle failures as
    /// [`SessionError::Oracle`].
    ///
    /// Nothing is recorded unless the oracle answers.
    pub async fn try_ask(
        &mut self,
        id: CharacterId,
        question: &str,
    ) -> Result<Reply, SessionError> {
        let view = self.session.knowledge_view(id)?;
        let request = OracleRequest {
            character: id,
            view,
            history: self.session.transcript(id).to_vec(),
            player_message: question.to_string(),
        };

        let text = self.oracle.respond(&request).await?;

        self.session.record_question(id, question)?;
        let new_clues = self.session.record_oracle_response(id, text.clone())?;

        Ok(Reply {
            character: id,
            text,
            new_clues,
            failed: false,
        })
    }

    /// Accuse a suspect. A finished game goes into the high-score table.
    pub fn accuse(&mut self, id: CharacterId) -> Result<Verdict, SessionError> {
        let verdict = self.session.submit_accusation(id)?;
        if verdict.is_terminal() {
            let entry = ScoreEntry::new(self.session.elapsed(), verdict.is_correct());
            self.session.store_mut().high_scores.record(entry);
        }
        Ok(verdict)
    }

    /// Start over with a fresh case.
    pub fn play_again(&mut self) -> Result<(), SessionError> {
        self.session.reset()
    }

    /// Save the player's notes.
    pub async fn save_notes(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        self.session.store().save_json(path).await?;
        Ok(())
    }

    /// Replace the player's notes with those saved at `path`.
    ///
    /// A missing file gives fresh notes.
    pub async fn load_notes(&mut self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        *self.session.store_mut() = PlayerNotes::load_or_default(path).await?;
        Ok(())
    }

    pub fn notes(&self) -> &PlayerNotes {
        self.session.store()
    }

    pub fn session(&self) -> &GameSession<PlayerNotes> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession<PlayerNotes> {
        &mut self.session
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn oracle_mut(&mut self) -> &mut O {
        &mut self.oracle
    }
}
