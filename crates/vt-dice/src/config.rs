//! Configuration for rolling.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Lowest difficulty a roll may use.
pub const MIN_DIFFICULTY: u8 = 2;
/// Highest difficulty a roll may use.
pub const MAX_DIFFICULTY: u8 = 10;

/// Defaults applied to rolls that do not override them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollConfig {
    /// Difficulty used when none is given (2-10).
    pub difficulty: u8,
    /// RNG seed for reproducible rolls. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            difficulty: 6,
            seed: None,
        }
    }
}

impl RollConfig {
    /// Set the default difficulty (clamped to 2-10).
    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.difficulty = difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
        self
    }

    /// Fix the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the random source for this configuration.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
