use serde::{Deserialize, Serialize};
use sw_core::StarId;

use crate::error::{GenError, GenResult};

/// Configuration for a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniverseConfig {
    /// RNG seed for deterministic generation.
    pub seed: u64,
    /// Number of stars to generate.
    pub star_count: u64,
    /// World extent per axis; coordinates fall in `[0, universe_size)`.
    pub universe_size: f64,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            star_count: 10_000,
            universe_size: 1000.0,
        }
    }
}

impl UniverseConfig {
    /// Set the RNG seed for deterministic generation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of stars to generate.
    pub fn with_star_count(mut self, count: u64) -> Self {
        self.star_count = count;
        self
    }

    /// Set the world extent per axis.
    pub fn with_universe_size(mut self, size: f64) -> Self {
        self.universe_size = size;
        self
    }

    /// Seed of the random stream for a run whose first star gets `first_id`.
    ///
    /// A run starting at id 0 uses `seed` unchanged. A run appending to an
    /// existing universe mixes its first id in, so repeating a config draws
    /// new stars instead of copies of the earlier ones.
    pub fn run_seed(&self, first_id: StarId) -> u64 {
        self.seed ^ first_id.0.wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }

    /// Check that the configuration describes a non-empty universe.
    pub fn validate(&self) -> GenResult<()> {
        if self.universe_size.is_finite() && self.universe_size > 0.0 {
            Ok(())
        } else {
            Err(GenError::InvalidUniverseSize(self.universe_size))
        }
    }
}
