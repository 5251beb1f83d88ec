//! Dialogue oracle contract.
//!
//! The oracle role-plays a character from its [`KnowledgeView`]. This crate
//! never talks to a model provider itself; it defines the request shape,
//! the error surface, and the briefing text a provider-backed oracle sends.

use crate::character::CharacterId;
use crate::knowledge::{KnowledgeView, NarrativeWindow};
use crate::profiles::CharacterProfile;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors an oracle may report. None of them change session state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("oracle unavailable: {0}")]
    Unavailable(String),

    #[error("oracle timed out")]
    Timeout,

    #[error("oracle has no more responses")]
    Exhausted,
}

/// Who said a line of the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    Detective,
    Character(CharacterId),
}

/// One line of an interrogation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub speaker: Speaker,
    pub text: String,
}

impl ConversationTurn {
    pub fn detective(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Detective,
            text: text.into(),
        }
    }

    pub fn character(id: CharacterId, text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Character(id),
            text: text.into(),
        }
    }
}

/// Everything an oracle needs to answer one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleRequest {
    pub character: CharacterId,
    pub view: KnowledgeView,
    /// Prior turns with this character, oldest first.
    pub history: Vec<ConversationTurn>,
    pub player_message: String,
}

impl OracleRequest {
    /// Briefing text for this request's character.
    pub fn briefing(&self) -> String {
        render_briefing(&self.view, &self.character.profile())
    }
}

/// Produces in-character replies.
///
/// Replies must wrap each discoverable fact in the clue marker (`*` by
/// default); the clue extractor relies on it.
#[async_trait]
pub trait DialogueOracle: Send {
    async fn respond(&mut self, request: &OracleRequest) -> Result<String, OracleError>;
}

/// Render the role-play briefing for a character.
pub fn render_briefing(view: &KnowledgeView, profile: &CharacterProfile) -> String {
    let mut prompt = String::new();

    prompt.push_str(include_str!("prompts/suspect_briefing.txt"));

    prompt.push_str("\n## Who You Are\n");
    prompt.push_str(&format!(
        "You are {}, the {} of the family. {}.\n",
        view.character, profile.role, profile.personality
    ));
    if !profile.interests.is_empty() {
        prompt.push_str(&format!("You care about: {}.\n", profile.interests.join(", ")));
    }

    prompt.push_str("\n## Your Alibi\n");
    let alibi = &view.alibi;
    prompt.push_str(&format!(
        "**Where:** {}\n**Doing:** {}\n**When:** {}\n",
        alibi.location, alibi.activity, alibi.time_window
    ));
    if !alibi.companions.is_empty() {
        let names: Vec<_> = alibi.companions.iter().map(|c| c.name()).collect();
        prompt.push_str(&format!("**With:** {}\n", names.join(", ")));
    }
    for detail in &alibi.supporting_details {
        prompt.push_str(&format!("- {detail}\n"));
    }
    if !alibi.is_true {
        prompt.push_str("This alibi is a cover story.\n");
    }

    prompt.push_str("\n## What You Remember\n");
    for window in NarrativeWindow::ALL {
        if let Some(fragment) = view.fragment(window) {
            prompt.push_str(&format!("**{}:** {}\n", window.name(), fragment));
        }
    }

    if !view.observations.is_empty() {
        prompt.push_str("\n## Things You Might Mention\n");
        for observation in &view.observations {
            prompt.push_str(&format!("- {}\n", observation.text));
        }
    }

    prompt
}
