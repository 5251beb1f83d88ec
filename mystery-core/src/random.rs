//! Uniform selection over fixed catalogs.
//!
//! All randomness goes through an injected [`Rng`], so tests can seed it.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Random selection helper wrapping an injected random source.
#[derive(Debug, Clone)]
pub struct RandomPool<R = StdRng> {
    rng: R,
}

impl RandomPool<StdRng> {
    /// A reproducible pool for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// A pool seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomPool<R> {
    /// Wrap an existing random source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Pick one item uniformly. Returns `None` only for an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Pick uniformly among the items not equal to `excluded`.
    ///
    /// If excluding would leave nothing to choose from, falls back to the
    /// full list. Returns `None` only for an empty slice.
    pub fn pick_excluding<'a, T: PartialEq>(
        &mut self,
        items: &'a [T],
        excluded: Option<&T>,
    ) -> Option<&'a T> {
        let Some(excluded) = excluded else {
            return self.pick(items);
        };

        let remaining: Vec<&T> = items.iter().filter(|item| *item != excluded).collect();
        if remaining.is_empty() {
            return self.pick(items);
        }
        remaining.choose(&mut self.rng).copied()
    }

    /// Access the underlying random source.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}
