//! Family murder-mystery engine.
//!
//! This crate provides:
//! - Seeded case generation that never repeats the last killer
//! - Per-character knowledge (true alibis, a fabricated one for the killer)
//! - Clue extraction from marked spans in suspect replies
//! - A three-strike accusation state machine
//! - Player notes persistence (last killer, high scores)
//!
//! # Quick Start
//!
//! ```ignore
//! use mystery_core::{CharacterId, GameConfig, Investigation, PlayerNotes};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let notes = PlayerNotes::load_or_default("notes.json").await?;
//!     let mut game = Investigation::new(GameConfig::new(), notes, my_oracle())?;
//!
//!     let reply = game.ask(CharacterId::Ilan, "Where were you last night?").await?;
//!     println!("{}", reply.text);
//!
//!     let verdict = game.accuse(CharacterId::Rom)?;
//!     println!("{}", verdict.message());
//!
//!     game.save_notes("notes.json").await?;
//!     Ok(())
//! }
//! ```

pub mod accusation;
pub mod case;
pub mod catalog;
pub mod character;
pub mod clues;
pub mod headless;
pub mod knowledge;
pub mod oracle;
pub mod persist;
pub mod profiles;
pub mod random;
pub mod session;
pub mod testing;

// Primary public API
pub use accusation::{AccusationError, AccusationResolver, Outcome, Resolution, Verdict};
pub use case::{Case, CaseGenerator, LastKillerStore, MemoryLastKillerStore};
pub use catalog::{Catalogs, ConfigError, GameConfig};
pub use character::{CharacterId, Roster, UnknownCharacter};
pub use clues::{Clue, ClueBoard, ClueCategory, ClueExtractor, ClueId, ExtractorConfig, Timeframe};
pub use headless::{Investigation, Reply, FALLBACK_REPLY};
pub use knowledge::{Alibi, KnowledgeDeriver, KnowledgeError, KnowledgeView, NarrativeWindow, Observation};
pub use oracle::{render_briefing, ConversationTurn, DialogueOracle, OracleError, OracleRequest, Speaker};
pub use persist::{HighScoreTable, PersistError, PlayerNotes, ScoreEntry};
pub use random::RandomPool;
pub use session::{GameSession, SessionError};
pub use testing::{ScriptedOracle, TestHarness};
