//! Clue extraction from oracle replies.
//!
//! The dialogue oracle wraps every discoverable fact in a pair of marker
//! characters (`*` by default). This module is the only place that parses
//! that convention: it pulls out marked spans, drops meta-conversational
//! ones, infers a category and timeframe, and keeps the session's clue
//! board free of near-duplicates across all characters.

use crate::catalog::Catalogs;
use crate::character::CharacterId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;
use uuid::Uuid;

/// Unique identifier for clues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClueId(Uuid);

impl ClueId {
    /// Create a new random clue ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClueId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a clue is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClueCategory {
    Location,
    Weapon,
    Motive,
    Alibi,
    Evidence,
    General,
}

impl ClueCategory {
    pub fn name(&self) -> &'static str {
        match self {
            ClueCategory::Location => "Location",
            ClueCategory::Weapon => "Weapon",
            ClueCategory::Motive => "Motive",
            ClueCategory::Alibi => "Alibi",
            ClueCategory::Evidence => "Evidence",
            ClueCategory::General => "General",
        }
    }
}

/// When the clue happened relative to the murder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    Before,
    During,
    After,
}

/// A fact the detective has picked up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clue {
    pub id: ClueId,
    pub text: String,
    pub source: CharacterId,
    pub discovered_at: DateTime<Utc>,
    pub category: ClueCategory,
    pub timeframe: Timeframe,
    /// Flagged by the player.
    pub important: bool,
}

/// Settings for marked-span parsing and duplicate detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Character used in pairs around a discoverable fact.
    pub marker: char,

    /// Shared-word ratio above which two clues count as the same.
    pub similarity_threshold: f32,

    /// Marked phrases that are conversation, not clues.
    pub denylist: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            marker: '*',
            similarity_threshold: 0.7,
            denylist: [
                "let's line up our stories",
                "be careful",
                "keep this between us",
                "don't tell anyone",
                "between you and me",
                "trust me",
                "you didn't hear it from me",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

const WEAPON_TERMS: &[&str] = &[
    "weapon", "knife", "blade", "shears", "scissors", "trophy", "poison", "poisoned",
    "heavy book", "rope", "hammer", "candlestick", "blood", "bloody", "stabbed", "strangled",
];

const EVIDENCE_TERMS: &[&str] = &[
    "evidence", "fingerprint", "fingerprints", "footprint", "footprints", "note", "letter",
    "glasses", "stain", "stains", "receipt", "folder", "cloth", "scrap", "mud", "rinsed",
    "wet", "broken", "torn", "clip", "trace", "smell", "shiny",
];

const LOCATION_TERMS: &[&str] = &[
    "kitchen", "garden", "study", "living room", "backyard", "barn", "orchard", "bedroom",
    "hallway", "porch", "attic", "library", "laundry", "cellar", "back door", "window",
];

const MOTIVE_TERMS: &[&str] = &[
    "motive", "money", "debt", "debts", "inheritance", "will", "affair", "secret", "secrets",
    "threatened", "expose", "reveal", "revenge", "jealous", "grudge", "stealing", "gambling",
    "scam", "startup", "sell", "argued", "argument", "fight", "angry",
];

const ALIBI_TERMS: &[&str] = &[
    "alibi", "was in", "all night", "with me", "asleep", "slept", "alone", "walking",
    "video call", "call log", "working", "resting", "dozed", "in bed",
];

const BEFORE_TERMS: &[&str] = &[
    "day before", "yesterday", "earlier that day", "that afternoon", "last week", "weeks ago",
    "before dinner", "for months", "for years", "previously",
];

const DURING_TERMS: &[&str] = &[
    "that night", "last night", "midnight", "late at night", "during", "at the time",
    "scream", "thud",
];

const AFTER_TERMS: &[&str] = &[
    "this morning", "next morning", "morning after", "next day", "afterwards",
    "after the murder", "since then", "body was",
];

/// Parses marked spans and adds deduplicated clues to a board.
#[derive(Debug, Clone)]
pub struct ClueExtractor {
    config: ExtractorConfig,
    denylist: Vec<String>,
    extra_weapons: Vec<String>,
    extra_locations: Vec<String>,
}

impl ClueExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        let denylist = config.denylist.iter().map(|p| normalize(p)).collect();
        Self {
            config,
            denylist,
            extra_weapons: Vec::new(),
            extra_locations: Vec::new(),
        }
    }

    /// Also recognise every catalog weapon and location by name.
    pub fn with_catalog_terms(mut self, catalogs: &Catalogs) -> Self {
        self.extra_weapons = catalogs.weapons.iter().map(|w| normalize(w)).collect();
        self.extra_locations = catalogs.locations.iter().map(|l| normalize(l)).collect();
        self
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Return the trimmed inner text of every well-formed marker pair.
    ///
    /// Markers pair one at a time, so adjacent pairs stay separate spans.
    /// `**bold**` still yields `bold`: its outer pairs are empty and dropped.
    /// An unclosed trailing marker is ignored. Denylisted phrases and
    /// near-duplicates are dropped.
    pub fn extract(&self, response: &str) -> Vec<String> {
        let marker = self.config.marker;
        let mut raw = Vec::new();
        let mut inside = false;
        let mut current = String::new();

        for ch in response.chars() {
            if ch == marker {
                if inside {
                    raw.push(std::mem::take(&mut current));
                }
                inside = !inside;
            } else if inside {
                current.push(ch);
            }
        }

        let mut spans: Vec<String> = Vec::new();
        for span in raw {
            let span = span.trim();
            if normalize(span).is_empty() || self.is_denylisted(span) {
                continue;
            }
            if spans.iter().any(|s| self.is_same_clue(s, span)) {
                continue;
            }
            spans.push(span.to_string());
        }
        spans
    }

    fn is_denylisted(&self, span: &str) -> bool {
        let normalized = normalize(span);
        self.denylist
            .iter()
            .any(|phrase| !phrase.is_empty() && normalized.contains(phrase.as_str()))
    }

    /// Check if two texts describe the same clue.
    ///
    /// Same after normalization, one contained in the other as whole
    /// words, or sharing more than the configured ratio of distinct words.
    pub fn is_same_clue(&self, a: &str, b: &str) -> bool {
        let a = normalize(a);
        let b = normalize(b);
        if a.is_empty() || b.is_empty() {
            return a == b;
        }
        if a == b || contains_term(&padded(&a), &b) || contains_term(&padded(&b), &a) {
            return true;
        }
        word_overlap(&a, &b) > self.config.similarity_threshold
    }

    /// Infer a category, checking weapon, evidence, location, motive, alibi in order.
    pub fn infer_category(&self, text: &str) -> ClueCategory {
        let padded = padded(text);
        let hits = |terms: &[&str], extra: &[String]| {
            terms.iter().any(|t| contains_term(&padded, t))
                || extra.iter().any(|t| contains_term(&padded, t))
        };

        if hits(WEAPON_TERMS, &self.extra_weapons) {
            ClueCategory::Weapon
        } else if hits(EVIDENCE_TERMS, &[]) {
            ClueCategory::Evidence
        } else if hits(LOCATION_TERMS, &self.extra_locations) {
            ClueCategory::Location
        } else if hits(MOTIVE_TERMS, &[]) {
            ClueCategory::Motive
        } else if hits(ALIBI_TERMS, &[]) {
            ClueCategory::Alibi
        } else {
            ClueCategory::General
        }
    }

    /// Infer when a clue happened. Defaults to during the murder.
    pub fn infer_timeframe(&self, text: &str) -> Timeframe {
        let padded = padded(text);
        let any = |terms: &[&str]| terms.iter().any(|t| contains_term(&padded, t));

        if any(BEFORE_TERMS) {
            Timeframe::Before
        } else if any(DURING_TERMS) {
            Timeframe::During
        } else if any(AFTER_TERMS) {
            Timeframe::After
        } else if any(&["found", "discovered"]) {
            Timeframe::After
        } else if any(&["heard", "witnessed", "saw"]) {
            Timeframe::During
        } else if any(&["had been", "used to", "always"]) {
            Timeframe::Before
        } else {
            Timeframe::During
        }
    }

    /// Add a clue to the board unless it duplicates one from any character.
    ///
    /// Returns the new clue, or `None` for an empty text or a duplicate.
    pub fn add_clue(
        &self,
        board: &mut ClueBoard,
        text: &str,
        source: CharacterId,
        category: Option<ClueCategory>,
        timeframe: Option<Timeframe>,
    ) -> Option<Clue> {
        let text = text.trim();
        if normalize(text).is_empty() {
            return None;
        }
        if let Some(existing) = board.clues.iter().find(|c| self.is_same_clue(&c.text, text)) {
            debug!(%source, existing = %existing.source, "skipping duplicate clue");
            return None;
        }

        let clue = Clue {
            id: ClueId::new(),
            text: text.to_string(),
            source,
            discovered_at: Utc::now(),
            category: category.unwrap_or_else(|| self.infer_category(text)),
            timeframe: timeframe.unwrap_or_else(|| self.infer_timeframe(text)),
            important: false,
        };
        debug!(%source, category = clue.category.name(), "clue added");
        board.clues.push(clue.clone());
        Some(clue)
    }
}

impl Default for ClueExtractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

/// The detective's notebook: clues in discovery order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClueBoard {
    clues: Vec<Clue>,
}

impl ClueBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.clues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clues.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clue> {
        self.clues.iter()
    }

    pub fn get(&self, id: ClueId) -> Option<&Clue> {
        self.clues.iter().find(|c| c.id == id)
    }

    /// Flip the player's importance flag. Returns the new value, or `None`
    /// if no clue has that ID.
    pub fn toggle_important(&mut self, id: ClueId) -> Option<bool> {
        let clue = self.clues.iter_mut().find(|c| c.id == id)?;
        clue.important = !clue.important;
        Some(clue.important)
    }

    pub fn by_source(&self, source: CharacterId) -> Vec<&Clue> {
        self.clues.iter().filter(|c| c.source == source).collect()
    }

    pub fn by_category(&self, category: ClueCategory) -> Vec<&Clue> {
        self.clues.iter().filter(|c| c.category == category).collect()
    }

    pub fn by_timeframe(&self, timeframe: Timeframe) -> Vec<&Clue> {
        self.clues.iter().filter(|c| c.timeframe == timeframe).collect()
    }

    pub fn important(&self) -> Vec<&Clue> {
        self.clues.iter().filter(|c| c.important).collect()
    }
}

/// Lowercase, punctuation to spaces, whitespace collapsed.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn padded(text: &str) -> String {
    format!(" {} ", normalize(text))
}

/// Whole-word (or whole-phrase) match against a padded, normalized text.
fn contains_term(padded: &str, term: &str) -> bool {
    let term = normalize(term);
    !term.is_empty() && padded.contains(&format!(" {term} "))
}

/// Distinct shared words over the larger distinct word count.
fn word_overlap(a: &str, b: &str) -> f32 {
    let a: HashSet<&str> = a.split(' ').collect();
    let b: HashSet<&str> = b.split(' ').collect();
    let larger = a.len().max(b.len());
    if larger == 0 {
        return 0.0;
    }
    a.intersection(&b).count() as f32 / larger as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ClueExtractor {
        ClueExtractor::default()
    }

    #[test]
    fn test_no_markers_no_spans() {
        assert!(extractor().extract("I was in the barn all night.").is_empty());
        assert!(extractor().extract("").is_empty());
    }

    #[test]
    fn test_extracts_each_pair() {
        let text = "Well, *the back door was unlocked* and later *someone rinsed the knife*.";
        assert_eq!(
            extractor().extract(text),
            vec!["the back door was unlocked", "someone rinsed the knife"]
        );
    }

    #[test]
    fn test_spans_are_trimmed_and_bold_still_works() {
        let text = "Honestly, **  I heard a scream at midnight  ** and that's all.";
        assert_eq!(extractor().extract(text), vec!["I heard a scream at midnight"]);
    }

    #[test]
    fn test_adjacent_pairs_stay_separate() {
        assert_eq!(
            extractor().extract("*Rom lied**Neta saw the knife*"),
            vec!["Rom lied", "Neta saw the knife"]
        );
        assert_eq!(
            extractor().extract("*one* *two**three*"),
            vec!["one", "two", "three"]
        );
    }

    #[test]
    fn test_unclosed_marker_ignored() {
        let text = "*Rom left early* and then *the lights went";
        assert_eq!(extractor().extract(text), vec!["Rom left early"]);
    }

    #[test]
    fn test_denylisted_spans_dropped() {
        let text = "*Let's line up our stories*, dear. *Be careful!* *Michal was in the garden*";
        assert_eq!(extractor().extract(text), vec!["Michal was in the garden"]);
    }

    #[test]
    fn test_duplicate_spans_collapsed() {
        let text = "*The knife was wet.* I said it already: *the knife was wet*";
        assert_eq!(extractor().extract(text), vec!["The knife was wet."]);
    }

    #[test]
    fn test_custom_marker() {
        let config = ExtractorConfig {
            marker: '_',
            ..ExtractorConfig::default()
        };
        let extractor = ClueExtractor::new(config);
        assert_eq!(extractor.extract("I saw _Neta in the hallway_."), vec!["Neta in the hallway"]);
        assert!(extractor.extract("*not this*").is_empty());
    }

    #[test]
    fn test_same_clue_rules() {
        let e = extractor();
        assert!(e.is_same_clue("The knife was wet!", "the knife was WET"));
        assert!(e.is_same_clue("knife was wet", "the knife was wet in the sink"));
        // 4 shared of 5 distinct words
        assert!(e.is_same_clue(
            "michal walked in the garden",
            "michal walked into the garden"
        ));
        assert!(e.is_same_clue(
            "rom argued with omri about money",
            "rom argued with omri about the money"
        ));
        assert!(!e.is_same_clue("rom argued with omri", "neta heard a scream"));
        // containment is by whole words
        assert!(!e.is_same_clue("the will", "the willow by the barn was cut down"));
        assert!(e.is_same_clue("the willow", "the willow by the barn was cut down"));
        // 3 of 5: not enough
        assert!(!e.is_same_clue("the knife was wet", "the knife was missing entirely"));
    }

    #[test]
    fn test_category_priority() {
        let e = extractor();
        assert_eq!(e.infer_category("A knife in the kitchen"), ClueCategory::Weapon);
        assert_eq!(e.infer_category("Muddy footprints in the garden"), ClueCategory::Evidence);
        assert_eq!(e.infer_category("Someone was in the study"), ClueCategory::Location);
        assert_eq!(e.infer_category("He had gambling debts"), ClueCategory::Motive);
        assert_eq!(e.infer_category("She was alone"), ClueCategory::Alibi);
        assert_eq!(e.infer_category("The dogs were restless"), ClueCategory::General);
    }

    #[test]
    fn test_category_uses_catalog_terms() {
        let mut catalogs = Catalogs::family_estate();
        catalogs.weapons.push("fire iron".to_string());
        catalogs.locations.push("greenhouse".to_string());
        let e = ClueExtractor::default().with_catalog_terms(&catalogs);
        assert_eq!(e.infer_category("the fire iron was bent"), ClueCategory::Weapon);
        assert_eq!(e.infer_category("lights in the greenhouse"), ClueCategory::Location);
        assert_eq!(extractor().infer_category("lights in the greenhouse"), ClueCategory::General);
    }

    #[test]
    fn test_timeframe_inference() {
        let e = extractor();
        assert_eq!(e.infer_timeframe("Yesterday Rom was shouting"), Timeframe::Before);
        assert_eq!(e.infer_timeframe("A thud from the study"), Timeframe::During);
        assert_eq!(e.infer_timeframe("This morning the shears were back"), Timeframe::After);
        assert_eq!(e.infer_timeframe("Ilan found a glove"), Timeframe::After);
        assert_eq!(e.infer_timeframe("Neta heard footsteps"), Timeframe::During);
        assert_eq!(e.infer_timeframe("Omri always hid the key"), Timeframe::Before);
        assert_eq!(e.infer_timeframe("The key is missing"), Timeframe::During);
    }

    #[test]
    fn test_add_clue_dedups_across_characters() {
        let e = extractor();
        let mut board = ClueBoard::new();

        let first = e
            .add_clue(&mut board, "Michal was in the garden", CharacterId::Ilan, None, None)
            .unwrap();
        assert_eq!(first.category, ClueCategory::Location);
        assert_eq!(first.timeframe, Timeframe::During);
        assert!(!first.important);

        assert!(e
            .add_clue(&mut board, "michal was in the garden!", CharacterId::Neta, None, None)
            .is_none());
        assert!(e
            .add_clue(&mut board, "in the garden", CharacterId::Rom, None, None)
            .is_none());
        assert!(e.add_clue(&mut board, "   ", CharacterId::Rom, None, None).is_none());
        assert_eq!(board.len(), 1);

        let explicit = e
            .add_clue(
                &mut board,
                "Rom owes money",
                CharacterId::Rachel,
                Some(ClueCategory::Evidence),
                Some(Timeframe::Before),
            )
            .unwrap();
        assert_eq!(explicit.category, ClueCategory::Evidence);
        assert_eq!(explicit.timeframe, Timeframe::Before);
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_board_queries_and_toggle() {
        let e = extractor();
        let mut board = ClueBoard::new();
        let knife = e
            .add_clue(&mut board, "the knife was rinsed", CharacterId::Michal, None, None)
            .unwrap();
        e.add_clue(&mut board, "a scream at midnight", CharacterId::Neta, None, None);

        assert_eq!(board.by_source(CharacterId::Neta).len(), 1);
        assert_eq!(board.by_category(ClueCategory::Weapon).len(), 1);
        assert_eq!(board.by_timeframe(Timeframe::During).len(), 2);
        assert!(board.important().is_empty());

        assert_eq!(board.toggle_important(knife.id), Some(true));
        assert_eq!(board.important().len(), 1);
        assert_eq!(board.toggle_important(knife.id), Some(false));
        assert_eq!(board.toggle_important(ClueId::new()), None);
    }
}
