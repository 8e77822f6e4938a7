use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// /////////////////////////////////////////////////////////////////////////////////////////////////
// Level Generator
// /////////////////////////////////////////////////////////////////////////////////////////////////

/// Upon the insertion of a new element, the element's height is drawn from a `LevelGenerator`.
///
/// `random(total)` must produce an integer in the range `[0, total)`; the new element then joins
/// the lowest `random(total) + 1` lanes.  `total` is the list's max level at the time of the
/// insertion, so it may change between calls.
///
/// Lists use a `UniformLevelGenerator` unless another generator is injected, which is mostly
/// useful for tests that need to pin the shape of the list.
pub trait LevelGenerator {
    fn random(&mut self, total: usize) -> usize;
}

/// A level generator producing heights uniformly distributed over `[0, total)`.
pub struct UniformLevelGenerator {
    rng: StdRng,
}

impl UniformLevelGenerator {
    /// Creates a generator seeded from the operating system's entropy source.
    pub fn new() -> Self {
        UniformLevelGenerator {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a generator whose sequence is fully determined by `seed`.
    pub fn seeded(seed: u64) -> Self {
        UniformLevelGenerator {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for UniformLevelGenerator {
    fn default() -> Self {
        UniformLevelGenerator::new()
    }
}

impl LevelGenerator for UniformLevelGenerator {
    /// # Panics
    ///
    /// Panics if `total` is zero.
    fn random(&mut self, total: usize) -> usize {
        self.rng.gen_range(0..total)
    }
}
