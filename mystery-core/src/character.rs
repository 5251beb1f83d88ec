//! Characters of the family mystery and the suspect roster.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::catalog::ConfigError;

/// Error returned when a name does not match any known character.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown character: {0}")]
pub struct UnknownCharacter(pub String);

/// Every character who appears in the mystery, victim included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CharacterId {
    Rachel,
    Rom,
    Ilan,
    Michal,
    Neta,
    Omri,
}

impl CharacterId {
    /// All characters in table order.
    pub const ALL: [CharacterId; 6] = [
        CharacterId::Rachel,
        CharacterId::Rom,
        CharacterId::Ilan,
        CharacterId::Michal,
        CharacterId::Neta,
        CharacterId::Omri,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CharacterId::Rachel => "Rachel",
            CharacterId::Rom => "Rom",
            CharacterId::Ilan => "Ilan",
            CharacterId::Michal => "Michal",
            CharacterId::Neta => "Neta",
            CharacterId::Omri => "Omri",
        }
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CharacterId {
    type Err = UnknownCharacter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CharacterId::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCharacter(wanted.to_string()))
    }
}

/// The ordered set of suspects plus the one victim.
///
/// The victim is never a killer and never an accusation target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub suspects: Vec<CharacterId>,
    pub victim: CharacterId,
}

impl Roster {
    /// Create a roster from suspects and a victim.
    pub fn new(suspects: Vec<CharacterId>, victim: CharacterId) -> Self {
        Self { suspects, victim }
    }

    /// The family gathering: five relatives and Omri as the victim.
    pub fn family() -> Self {
        Self {
            suspects: vec![
                CharacterId::Rachel,
                CharacterId::Rom,
                CharacterId::Ilan,
                CharacterId::Michal,
                CharacterId::Neta,
            ],
            victim: CharacterId::Omri,
        }
    }

    /// Check if a character may be questioned or accused.
    pub fn is_suspect(&self, id: CharacterId) -> bool {
        self.suspects.contains(&id)
    }

    /// Check the roster is usable for generating a case.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.suspects.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        if self.suspects.contains(&self.victim) {
            return Err(ConfigError::VictimIsSuspect(self.victim));
        }
        for (i, suspect) in self.suspects.iter().enumerate() {
            if self.suspects[..i].contains(suspect) {
                return Err(ConfigError::DuplicateSuspect(*suspect));
            }
            if suspect.profile().suspect.is_none() {
                return Err(ConfigError::NoSuspectProfile(*suspect));
            }
        }
        Ok(())
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::family()
    }
}
