use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sw_core::{IdAllocator, Star};

use crate::config::UniverseConfig;
use crate::error::GenResult;

/// Generate one star somewhere in `[0, universe_size)²`.
///
/// Coordinates are drawn independently and uniformly; the id comes from `ids`.
/// `universe_size` must be finite and positive (see [`UniverseConfig::validate`]).
pub fn generate_star(rng: &mut StdRng, ids: &mut IdAllocator, universe_size: f64) -> Star {
    let x = rng.random_range(0.0..universe_size);
    let y = rng.random_range(0.0..universe_size);
    Star::new_random(rng, ids, x, y)
}

/// Lazily generates the stars of a universe, in id order.
pub struct UniverseGenerator<'a> {
    rng: StdRng,
    ids: &'a mut IdAllocator,
    universe_size: f64,
    remaining: u64,
}

impl std::fmt::Debug for UniverseGenerator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UniverseGenerator")
            .field("next_id", &self.ids.peek())
            .field("universe_size", &self.universe_size)
            .field("remaining", &self.remaining)
            .finish()
    }
}

impl<'a> UniverseGenerator<'a> {
    /// Create a generator drawing ids from `ids`.
    ///
    /// The random stream is seeded with [`UniverseConfig::run_seed`] for the
    /// next id, so a run that continues an allocator gets fresh stars.
    pub fn new(config: &UniverseConfig, ids: &'a mut IdAllocator) -> GenResult<Self> {
        let seed = config.run_seed(ids.peek());
        Self::with_rng(StdRng::seed_from_u64(seed), config, ids)
    }

    /// Create a generator with an explicit random source.
    pub fn with_rng(
        rng: StdRng,
        config: &UniverseConfig,
        ids: &'a mut IdAllocator,
    ) -> GenResult<Self> {
        config.validate()?;
        Ok(Self {
            rng,
            ids,
            universe_size: config.universe_size,
            remaining: config.star_count,
        })
    }

    /// Number of stars still to be generated.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl Iterator for UniverseGenerator<'_> {
    type Item = Star;

    fn next(&mut self) -> Option<Star> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(generate_star(&mut self.rng, self.ids, self.universe_size))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (n, usize::try_from(self.remaining).ok())
    }
}

/// Generate a whole universe into memory.
pub fn generate_universe(config: &UniverseConfig, ids: &mut IdAllocator) -> GenResult<Vec<Star>> {
    Ok(UniverseGenerator::new(config, ids)?.collect())
}
