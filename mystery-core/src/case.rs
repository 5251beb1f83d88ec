//! Case generation - the hidden ground truth of one game.

use crate::catalog::{Catalogs, ConfigError};
use crate::character::{CharacterId, Roster};
use crate::random::RandomPool;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The generated solution of a mystery. Immutable for the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub killer: CharacterId,
    pub weapon: String,
    pub location: String,
    pub time_of_death: String,
    /// Always one of `motives[killer]`.
    pub motive: String,
}

impl Case {
    /// Check if a character is the killer.
    pub fn is_killer(&self, id: CharacterId) -> bool {
        self.killer == id
    }
}

/// Remembers the killer of the last completed game across sessions.
pub trait LastKillerStore {
    fn get(&self) -> Option<CharacterId>;
    fn set(&mut self, killer: CharacterId);
}

/// A store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryLastKillerStore {
    last: Option<CharacterId>,
}

impl MemoryLastKillerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a known previous killer.
    pub fn with_last(killer: CharacterId) -> Self {
        Self { last: Some(killer) }
    }
}

impl LastKillerStore for MemoryLastKillerStore {
    fn get(&self) -> Option<CharacterId> {
        self.last
    }

    fn set(&mut self, killer: CharacterId) {
        self.last = Some(killer);
    }
}

/// Builds consistent cases from the catalogs.
#[derive(Debug, Clone)]
pub struct CaseGenerator<R = StdRng> {
    catalogs: Catalogs,
    pool: RandomPool<R>,
}

impl<R: Rng> CaseGenerator<R> {
    /// Create a generator drawing from `catalogs` with the given pool.
    pub fn new(catalogs: Catalogs, pool: RandomPool<R>) -> Self {
        Self { catalogs, pool }
    }

    /// The catalogs this generator draws from.
    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    /// Generate a case, avoiding `last_killer` when another suspect exists.
    ///
    /// Weapon, location and time are independent draws. The caller decides
    /// when the new killer becomes the "last killer".
    pub fn generate(
        &mut self,
        roster: &Roster,
        last_killer: Option<CharacterId>,
    ) -> Result<Case, ConfigError> {
        let killer = *self
            .pool
            .pick_excluding(&roster.suspects, last_killer.as_ref())
            .ok_or(ConfigError::EmptyRoster)?;

        let weapon = self
            .pool
            .pick(&self.catalogs.weapons)
            .ok_or(ConfigError::EmptyCatalog("weapon"))?
            .clone();
        let location = self
            .pool
            .pick(&self.catalogs.locations)
            .ok_or(ConfigError::EmptyCatalog("location"))?
            .clone();
        let time_of_death = self
            .pool
            .pick(&self.catalogs.times)
            .ok_or(ConfigError::EmptyCatalog("time of death"))?
            .clone();
        let motive = self
            .pool
            .pick(self.catalogs.motives_for(killer))
            .ok_or(ConfigError::MissingMotives(killer))?
            .clone();

        debug!(%killer, previous = ?last_killer, "generated case");

        Ok(Case {
            killer,
            weapon,
            location,
            time_of_death,
            motive,
        })
    }
}
