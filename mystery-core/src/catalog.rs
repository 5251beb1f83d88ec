//! Case catalogs and game configuration.
//!
//! Catalogs are the fixed pools a case is drawn from: weapons, locations,
//! times of death, and killer-specific motives. They are checked once when a
//! session starts; an empty pool is a configuration defect, not a runtime
//! condition.

use crate::character::{CharacterId, Roster};
use crate::clues::ExtractorConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tokio::fs;

/// Errors in the game setup. A session refuses to start on any of these.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("The {0} catalog is empty")]
    EmptyCatalog(&'static str),

    #[error("No motives configured for {0}")]
    MissingMotives(CharacterId),

    #[error("The roster has no suspects")]
    EmptyRoster,

    #[error("{0} appears more than once in the roster")]
    DuplicateSuspect(CharacterId),

    #[error("The victim {0} cannot also be a suspect")]
    VictimIsSuspect(CharacterId),

    #[error("{0} has no suspect profile and cannot be in the roster")]
    NoSuspectProfile(CharacterId),

    #[error("A game needs at least one accusation attempt")]
    NoAttempts,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The pools a case is drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogs {
    pub weapons: Vec<String>,
    pub locations: Vec<String>,
    pub times: Vec<String>,
    /// Motives are keyed by killer, never shared across suspects.
    pub motives: BTreeMap<CharacterId, Vec<String>>,
}

impl Catalogs {
    /// The family estate catalogs used by the shipped game.
    pub fn family_estate() -> Self {
        let motives = [
            (
                CharacterId::Rachel,
                [
                    "Omri threatened to send her dogs to a shelter",
                    "Omri was planning to sell the family house",
                    "Omri discovered her gambling debts",
                ],
            ),
            (
                CharacterId::Rom,
                [
                    "Omri was going to expose his failed startup",
                    "Omri refused to invest in his new tech venture",
                    "Omri threatened to reveal his internet scam",
                ],
            ),
            (
                CharacterId::Ilan,
                [
                    "Omri discovered his secret second family",
                    "Omri was going to change the will",
                    "Omri found evidence of his past crimes",
                ],
            ),
            (
                CharacterId::Michal,
                [
                    "Omri was about to reveal her affair",
                    "Omri threatened to take away her inheritance",
                    "Omri discovered her stolen family heirlooms",
                ],
            ),
            (
                CharacterId::Neta,
                [
                    "Omri knew about her fake pregnancy",
                    "Omri was going to expose her true identity",
                    "Omri discovered she was stealing from the family",
                ],
            ),
        ]
        .into_iter()
        .map(|(id, list)| (id, list.iter().map(|m| m.to_string()).collect()))
        .collect();

        Self {
            weapons: to_strings(&[
                "kitchen knife",
                "heavy book",
                "garden shears",
                "old trophy",
                "poisoned tea",
            ]),
            locations: to_strings(&[
                "kitchen",
                "garden",
                "study room",
                "living room",
                "backyard",
            ]),
            times: to_strings(&[
                "just after dinner",
                "late at night",
                "early morning",
                "during afternoon tea",
                "before breakfast",
            ]),
            motives,
        }
    }

    /// Parse catalogs from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load catalogs from a JSON file.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).await?;
        Self::from_json_str(&content)
    }

    /// Motives available to a given killer.
    pub fn motives_for(&self, killer: CharacterId) -> &[String] {
        self.motives.get(&killer).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check every pool the generator will draw from is non-empty.
    pub fn validate(&self, roster: &Roster) -> Result<(), ConfigError> {
        if self.weapons.is_empty() {
            return Err(ConfigError::EmptyCatalog("weapon"));
        }
        if self.locations.is_empty() {
            return Err(ConfigError::EmptyCatalog("location"));
        }
        if self.times.is_empty() {
            return Err(ConfigError::EmptyCatalog("time of death"));
        }
        for suspect in &roster.suspects {
            if self.motives_for(*suspect).is_empty() {
                return Err(ConfigError::MissingMotives(*suspect));
            }
        }
        Ok(())
    }
}

impl Default for Catalogs {
    fn default() -> Self {
        Self::family_estate()
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Configuration for a game session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Suspects and victim.
    pub roster: Roster,

    /// Pools the case is drawn from.
    pub catalogs: Catalogs,

    /// Accusations allowed per game.
    pub max_attempts: u32,

    /// Seed for reproducible case generation.
    pub seed: Option<u64>,

    /// Marked-span parsing and dedup settings.
    pub extractor: ExtractorConfig,
}

impl GameConfig {
    /// Create the default family-estate configuration.
    pub fn new() -> Self {
        Self {
            roster: Roster::family(),
            catalogs: Catalogs::family_estate(),
            max_attempts: 3,
            seed: None,
            extractor: ExtractorConfig::default(),
        }
    }

    /// Set the roster.
    pub fn with_roster(mut self, roster: Roster) -> Self {
        self.roster = roster;
        self
    }

    /// Set the catalogs.
    pub fn with_catalogs(mut self, catalogs: Catalogs) -> Self {
        self.catalogs = catalogs;
        self
    }

    /// Set the number of accusations allowed.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Seed the case generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the clue extractor configuration.
    pub fn with_extractor(mut self, extractor: ExtractorConfig) -> Self {
        self.extractor = extractor;
        self
    }

    /// Validate roster, catalogs and attempt budget together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.roster.validate()?;
        self.catalogs.validate(&self.roster)?;
        if self.max_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_estate_is_valid() {
        let config = GameConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.catalogs.motives_for(CharacterId::Michal).len(), 3);
        assert!(config.catalogs.motives_for(CharacterId::Omri).is_empty());
    }

    #[test]
    fn test_empty_catalogs_rejected() {
        let roster = Roster::family();

        let mut catalogs = Catalogs::family_estate();
        catalogs.weapons.clear();
        assert!(matches!(
            catalogs.validate(&roster),
            Err(ConfigError::EmptyCatalog("weapon"))
        ));

        let mut catalogs = Catalogs::family_estate();
        catalogs.times.clear();
        assert!(matches!(
            catalogs.validate(&roster),
            Err(ConfigError::EmptyCatalog("time of death"))
        ));

        let mut catalogs = Catalogs::family_estate();
        catalogs.motives.remove(&CharacterId::Ilan);
        assert!(matches!(
            catalogs.validate(&roster),
            Err(ConfigError::MissingMotives(CharacterId::Ilan))
        ));
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let config = GameConfig::new().with_max_attempts(0);
        assert!(matches!(config.validate(), Err(ConfigError::NoAttempts)));
    }

    #[test]
    fn test_catalogs_from_json() {
        let json = r#"{
            "weapons": ["poison"],
            "locations": ["kitchen"],
            "times": ["midnight"],
            "motives": { "Rom": ["a grudge over the startup"] }
        }"#;
        let catalogs = Catalogs::from_json_str(json).unwrap();
        assert_eq!(catalogs.weapons, vec!["poison"]);
        assert_eq!(
            catalogs.motives_for(CharacterId::Rom),
            ["a grudge over the startup".to_string()]
        );

        let roster = Roster::new(vec![CharacterId::Rom], CharacterId::Omri);
        assert!(catalogs.validate(&roster).is_ok());
        assert!(matches!(
            catalogs.validate(&Roster::family()),
            Err(ConfigError::MissingMotives(CharacterId::Rachel))
        ));
    }

    #[tokio::test]
    async fn test_load_catalogs_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalogs.json");
        let json = serde_json::to_string_pretty(&Catalogs::family_estate()).unwrap();
        tokio::fs::write(&path, json).await.unwrap();

        let loaded = Catalogs::load_json(&path).await.unwrap();
        assert_eq!(loaded, Catalogs::family_estate());
    }
}
