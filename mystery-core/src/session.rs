//! GameSession - the primary public API for one investigation.
//!
//! A session owns the hidden case, the clue board, the accusation state
//! and the interrogation transcripts. It is constructed explicitly at game
//! start and discarded (or reset) when the player starts over.

use crate::accusation::{AccusationError, AccusationResolver, Verdict};
use crate::case::{Case, CaseGenerator, LastKillerStore, MemoryLastKillerStore};
use crate::catalog::{ConfigError, GameConfig};
use crate::character::{CharacterId, Roster};
use crate::clues::{Clue, ClueBoard, ClueCategory, ClueExtractor, ClueId, Timeframe};
use crate::knowledge::{KnowledgeDeriver, KnowledgeError, KnowledgeView};
use crate::oracle::{ConversationTurn, OracleError};
use crate::persist::PersistError;
use crate::random::RandomPool;
use rand::rngs::StdRng;
use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from GameSession operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Knowledge error: {0}")]
    Knowledge(#[from] KnowledgeError),

    #[error("Accusation error: {0}")]
    Accusation(#[from] AccusationError),

    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),

    #[error("{0} is not a suspect in this case")]
    CharacterNotFound(CharacterId),

    #[error("Invalid case: {0}")]
    InvalidCase(String),

    #[error("The investigation is over")]
    GameOver,
}

/// A single murder investigation.
#[derive(Debug)]
pub struct GameSession<S: LastKillerStore = MemoryLastKillerStore> {
    config: GameConfig,
    generator: CaseGenerator<StdRng>,
    deriver: KnowledgeDeriver,
    extractor: ClueExtractor,
    store: S,

    case: Case,
    clues: ClueBoard,
    resolver: AccusationResolver,
    started_at: Instant,
    /// Set at the terminal accusation; freezes `elapsed()`.
    finished_after: Option<Duration>,
    last_verdict: Option<Verdict>,
    questioned: BTreeSet<CharacterId>,
    transcripts: BTreeMap<CharacterId, Vec<ConversationTurn>>,
}

impl<S: LastKillerStore> GameSession<S> {
    /// Start a new game, avoiding the store's last killer.
    pub fn start(config: GameConfig, store: S) -> Result<Self, SessionError> {
        config.validate()?;
        let mut generator = Self::generator_for(&config);
        let case = generator.generate(&config.roster, store.get())?;
        info!(
            suspects = config.roster.suspects.len(),
            max_attempts = config.max_attempts,
            "investigation started"
        );
        Ok(Self::assemble(config, generator, store, case))
    }

    /// Start a game with a known case. Later resets draw fresh cases.
    pub fn with_case(config: GameConfig, store: S, case: Case) -> Result<Self, SessionError> {
        config.validate()?;
        if !config.roster.is_suspect(case.killer) {
            return Err(SessionError::InvalidCase(format!(
                "{} is not a suspect",
                case.killer
            )));
        }
        if !config.catalogs.motives_for(case.killer).contains(&case.motive) {
            return Err(SessionError::InvalidCase(format!(
                "motive is not listed for {}",
                case.killer
            )));
        }
        let generator = Self::generator_for(&config);
        Ok(Self::assemble(config, generator, store, case))
    }

    fn generator_for(config: &GameConfig) -> CaseGenerator<StdRng> {
        let pool = match config.seed {
            Some(seed) => RandomPool::seeded(seed),
            None => RandomPool::from_entropy(),
        };
        CaseGenerator::new(config.catalogs.clone(), pool)
    }

    fn assemble(config: GameConfig, generator: CaseGenerator<StdRng>, store: S, case: Case) -> Self {
        debug!(killer = %case.killer, "case assigned");
        Self {
            deriver: KnowledgeDeriver::new(config.roster.clone()),
            extractor: ClueExtractor::new(config.extractor.clone())
                .with_catalog_terms(&config.catalogs),
            resolver: AccusationResolver::new(config.max_attempts),
            config,
            generator,
            store,
            case,
            clues: ClueBoard::new(),
            started_at: Instant::now(),
            finished_after: None,
            last_verdict: None,
            questioned: BTreeSet::new(),
            transcripts: BTreeMap::new(),
        }
    }

    /// Discard everything and draw a new case.
    ///
    /// The last killer was already stored if the game finished; a reset in
    /// the middle of an investigation stores nothing.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        let case = self.generator.generate(&self.config.roster, self.store.get())?;
        debug!(killer = %case.killer, "case assigned");

        self.case = case;
        self.clues = ClueBoard::new();
        self.resolver = AccusationResolver::new(self.config.max_attempts);
        self.started_at = Instant::now();
        self.finished_after = None;
        self.last_verdict = None;
        self.questioned.clear();
        self.transcripts.clear();

        info!("investigation reset");
        Ok(())
    }

    fn ensure_questionable(&self, id: CharacterId) -> Result<(), SessionError> {
        if self.is_ended() {
            return Err(SessionError::GameOver);
        }
        if !self.config.roster.is_suspect(id) {
            return Err(SessionError::CharacterNotFound(id));
        }
        Ok(())
    }

    /// Pick a suspect to question and get what they know.
    pub fn select_character(&mut self, id: CharacterId) -> Result<KnowledgeView, SessionError> {
        let view = self.knowledge_view(id)?;
        self.questioned.insert(id);
        Ok(view)
    }

    /// What a suspect knows, without marking them as questioned.
    pub fn knowledge_view(&self, id: CharacterId) -> Result<KnowledgeView, SessionError> {
        self.ensure_questionable(id)?;
        Ok(self.deriver.derive_view(&self.case, id)?)
    }

    /// Append the detective's question to a suspect's transcript.
    pub fn record_question(
        &mut self,
        id: CharacterId,
        text: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.ensure_questionable(id)?;
        self.questioned.insert(id);
        self.transcripts
            .entry(id)
            .or_default()
            .push(ConversationTurn::detective(text));
        Ok(())
    }

    /// Record a suspect's reply and harvest its marked clues.
    ///
    /// Returns only the clues that were new to the board.
    pub fn record_oracle_response(
        &mut self,
        id: CharacterId,
        text: impl Into<String>,
    ) -> Result<Vec<Clue>, SessionError> {
        self.ensure_questionable(id)?;
        let text = text.into();

        let mut added = Vec::new();
        for span in self.extractor.extract(&text) {
            if let Some(clue) = self.extractor.add_clue(&mut self.clues, &span, id, None, None) {
                added.push(clue);
            }
        }

        self.transcripts
            .entry(id)
            .or_default()
            .push(ConversationTurn::character(id, text));
        Ok(added)
    }

    /// Add a clue by hand. `None` if it duplicates an existing clue.
    pub fn add_clue(
        &mut self,
        text: &str,
        source: CharacterId,
        category: Option<ClueCategory>,
        timeframe: Option<Timeframe>,
    ) -> Option<Clue> {
        self.extractor
            .add_clue(&mut self.clues, text, source, category, timeframe)
    }

    /// Flip a clue's importance flag. `None` for an unknown clue.
    pub fn toggle_clue_importance(&mut self, id: ClueId) -> Option<bool> {
        self.clues.toggle_important(id)
    }

    /// Accuse a suspect.
    ///
    /// A terminal verdict stops the clock and stores the killer as the
    /// last killer.
    pub fn submit_accusation(&mut self, accused: CharacterId) -> Result<Verdict, SessionError> {
        let elapsed = self.elapsed();
        let verdict = self
            .resolver
            .submit(&self.case, &self.config.roster, accused, elapsed)?;

        if verdict.is_terminal() {
            self.finished_after = Some(elapsed);
            self.store.set(self.case.killer);
            info!(
                correct = verdict.is_correct(),
                elapsed_secs = elapsed.as_secs(),
                "investigation finished"
            );
        }

        self.last_verdict = Some(verdict.clone());
        Ok(verdict)
    }

    // ========================================================================
    // State Queries
    // ========================================================================

    pub fn attempts_remaining(&self) -> u32 {
        self.resolver.attempts_remaining()
    }

    /// Time since the game started, frozen once it ends.
    pub fn elapsed(&self) -> Duration {
        self.finished_after
            .unwrap_or_else(|| self.started_at.elapsed())
    }

    pub fn is_ended(&self) -> bool {
        self.resolver.is_resolved()
    }

    pub fn last_verdict(&self) -> Option<&Verdict> {
        self.last_verdict.as_ref()
    }

    /// The solution, available only after the game has ended.
    pub fn solution(&self) -> Option<&Case> {
        self.is_ended().then_some(&self.case)
    }

    pub fn clues(&self) -> &ClueBoard {
        &self.clues
    }

    /// Conversation with one suspect, oldest first.
    pub fn transcript(&self, id: CharacterId) -> &[ConversationTurn] {
        self.transcripts.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Suspects the detective has selected at least once.
    pub fn questioned(&self) -> &BTreeSet<CharacterId> {
        &self.questioned
    }

    pub fn roster(&self) -> &Roster {
        &self.config.roster
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn extractor(&self) -> &ClueExtractor {
        &self.extractor
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Hidden case, for crate-internal checks.
    pub(crate) fn case(&self) -> &Case {
        &self.case
    }
}
