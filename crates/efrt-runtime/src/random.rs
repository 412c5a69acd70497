//! Random number source
//!
//! Passed explicitly into the interpreter. Seeded sources make `R` and
//! random program generation reproducible.

use rand::rngs::{StdRng, ThreadRng};
use rand::{RngExt, SeedableRng};

/// Where random values come from
#[derive(Debug)]
pub enum RandomSource {
    /// Thread-local entropy
    Thread(ThreadRng),
    /// Deterministic generator
    Seeded(StdRng),
}

impl RandomSource {
    /// Thread-local generator
    pub fn entropy() -> Self {
        RandomSource::Thread(rand::rng())
    }

    /// Deterministic generator for the given seed
    pub fn seeded(seed: u64) -> Self {
        RandomSource::Seeded(StdRng::seed_from_u64(seed))
    }

    /// Seeded when a seed is given, entropy otherwise
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::entropy, Self::seeded)
    }

    /// Uniform value in [0, 1)
    pub fn next_unit(&mut self) -> f64 {
        match self {
            RandomSource::Thread(rng) => rng.random(),
            RandomSource::Seeded(rng) => rng.random(),
        }
    }

    /// Uniform byte
    pub fn next_byte(&mut self) -> u8 {
        match self {
            RandomSource::Thread(rng) => rng.random(),
            RandomSource::Seeded(rng) => rng.random(),
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::entropy()
    }
}

/// Generate a program of `len` uniformly random bytes
pub fn random_program(len: usize, source: &mut RandomSource) -> Vec<u8> {
    (0..len).map(|_| source.next_byte()).collect()
}
