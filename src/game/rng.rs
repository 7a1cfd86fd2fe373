//! Injected random source.
//!
//! Every random draw in the simulation (idle delays, patrol points, spawn
//! positions, enemy fire spread, particle bursts) goes through [`GameRng`],
//! so tests can seed it and replay a scenario exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seedable random number generator owned by the controller.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: StdRng,
    /// Seed used to create this generator, `None` when drawn from entropy
    pub seed: Option<u64>,
}

impl GameRng {
    /// Deterministic generator.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Unseeded generator (normal play).
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Uniform in `[0, 1)`.
    pub fn random_f32(&mut self) -> f32 {
        self.rng.r#gen()
    }

    /// Uniform in `[min, max)`; returns `min` for an empty range.
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.random_f32() * (max - min)
    }

    /// Uniform in `[-half_width, half_width)`.
    pub fn symmetric(&mut self, half_width: f32) -> f32 {
        (self.random_f32() - 0.5) * 2.0 * half_width
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
