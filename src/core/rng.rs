//! Seeded, forkable random number generation.
//!
//! Every stochastic step in the crate (dealing, world sampling, rollout
//! moves, chromosome mutation) draws from a [`GameRng`] passed in by the
//! caller, so a whole game or a single decision can be replayed from its
//! seed alone.
//!
//! ```
//! use fireworks_ai::core::GameRng;
//!
//! let mut deal = GameRng::new(42);
//! let mut search = deal.fork();
//!
//! // The fork is its own stream, unaffected by further draws here.
//! let before = search.gen_range_usize(0..100);
//! deal.gen_range_usize(0..100);
//! assert_eq!(GameRng::new(42).fork().gen_range_usize(0..100), before);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// A ChaCha8 stream with a remembered seed, cheap to fork into
/// independent child streams.
///
/// Searches fork once per decision: the child stream drives that
/// decision's sampling and simulations without disturbing the parent,
/// so decisions replay independently of how many came before.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Split off an independent child stream.
    ///
    /// The n-th fork of a given stream always yields the same child, and
    /// no child shares a sequence with its parent.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let child = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(child)
    }

    /// A stream dedicated to one named purpose.
    ///
    /// Dealing uses `for_context("deal")` so that a search seeded with
    /// the same number as the game cannot accidentally replay the deal's
    /// draw sequence.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// True with the given probability.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// Fisher-Yates shuffle of `slice` in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}
