//! Pluggable randomness for food placement
//!
//! Gameplay never touches a global RNG; the runtime owns a `RandomSource`
//! and lends it to the games.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform integers
pub trait RandomSource {
    /// Uniform value in `0..upper`. `upper` is never zero.
    fn below(&mut self, upper: u32) -> u32;
}

impl RandomSource for Pcg32 {
    fn below(&mut self, upper: u32) -> u32 {
        self.random_range(0..upper.max(1))
    }
}

/// Seeded generator used by the runtime
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed sequence (wrapping), for tests that need exact placements
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<u32>,
    cursor: usize,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, cursor: 0 }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn below(&mut self, upper: u32) -> u32 {
        let upper = upper.max(1);
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value % upper
    }
}
