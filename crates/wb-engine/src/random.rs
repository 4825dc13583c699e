//! Injectable randomness.
//!
//! The pool draws every face value through [`RandomSource`], so callers
//! decide where randomness comes from: OS entropy for play, a fixed seed
//! for reproducible sessions, or a scripted sequence for tests.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// A source of uniform die rolls.
///
/// This is the only operation the engine needs from its randomness:
/// one integer drawn uniformly from `1..=sides`. Implementations must
/// stay within that range; `sides` is always at least 1.
pub trait RandomSource: std::fmt::Debug {
    /// Draw one value uniformly from `1..=sides`.
    fn roll(&mut self, sides: u32) -> u32;
}

/// The default source, backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// A source seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// A deterministic source derived from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for StdRandom {
    fn roll(&mut self, sides: u32) -> u32 {
        self.rng.random_range(1..=sides)
    }
}

/// A scripted source for tests.
///
/// Replays the given values in order, cycling when exhausted. Each value
/// is clamped into `1..=sides` so a script can never produce an illegal
/// face. An empty script always yields 1.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    values: Vec<u32>,
    pos: usize,
}

impl FixedSequence {
    /// A source replaying `values` in order.
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, pos: 0 }
    }
}

impl RandomSource for FixedSequence {
    fn roll(&mut self, sides: u32) -> u32 {
        if self.values.is_empty() {
            return 1;
        }
        let raw = self.values[self.pos % self.values.len()];
        self.pos += 1;
        raw.clamp(1, sides)
    }
}
