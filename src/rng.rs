//! Deterministic per-tile RNG context (§2, §5).
//!
//! Grounded on `procgen::seed::make_rng` — a tile's RNG is derived from the
//! run seed plus the tile identifier, not shared mutable state, so a
//! parallel-tiles implementation just needs to call [`TileRng::for_tile`] per
//! worker instead of passing a single RNG around (§5's "each worker owns an
//! independent RNG seeded deterministically from the master seed and tile
//! ordinal").

use std::hash::{Hash, Hasher};

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Derive a deterministic seed from the run seed and a tile identifier.
fn derive_seed(run_seed: u64, tile_id: &str) -> u64 {
    let mut hasher = std::hash::DefaultHasher::new();
    run_seed.hash(&mut hasher);
    tile_id.hash(&mut hasher);
    hasher.finish()
}

/// RNG context for one tile's worth of refinement + synthesis + binding +
/// expansion. Not `Clone` — each tile gets its own.
pub struct TileRng(SmallRng);

impl TileRng {
    /// Build the RNG for a given tile, deterministic in (run seed, tile id).
    pub fn for_tile(run_seed: u64, tile_id: &str) -> Self {
        Self(SmallRng::seed_from_u64(derive_seed(run_seed, tile_id)))
    }

    #[cfg(test)]
    pub fn from_raw_seed(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    /// Uniform real in [0, 1).
    pub fn unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }

    /// `round_random(x) = floor(x) + 1` with probability `frac(x)`, else
    /// `floor(x)` (§4.1). Expected value equals `x`.
    pub fn round_random(&mut self, x: f64) -> u32 {
        let floor = x.floor();
        let frac = x - floor;
        let bumped = if frac > 0.0 { self.unit() < frac } else { false };
        (floor as i64 + i64::from(bumped)) as u32
    }

    /// True with the given probability, clamped to [0, 1].
    pub fn chance(&mut self, probability: f64) -> bool {
        self.unit() < probability.clamp(0.0, 1.0)
    }

    /// Uniform integer in `[0, n)`. Panics if `n == 0`.
    pub fn index(&mut self, n: usize) -> usize {
        self.0.random_range(0..n)
    }

    /// Uniform real in `[lo, hi)`.
    pub fn uniform_range(&mut self, lo: f64, hi: f64) -> f64 {
        self.0.random_range(lo..hi)
    }

    /// Uniform integer in `[lo, hi]` (inclusive).
    pub fn uniform_int_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        self.0.random_range(lo..=hi)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.0);
    }

    /// Pick a uniformly random index among `eligible`, a slice of candidate
    /// indices into some other collection. Used throughout the synthesizer
    /// for "pick one uniformly at random from those" steps over a filtered
    /// eligible set.
    pub fn choose_from<'a, T>(&mut self, eligible: &'a [T]) -> Option<&'a T> {
        if eligible.is_empty() {
            None
        } else {
            Some(&eligible[self.index(eligible.len())])
        }
    }
}
