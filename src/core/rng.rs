//! Seeded random source for the search.
//!
//! Every random decision the engine makes (expansion picks, rollout moves,
//! the uniform fallback at the root) is drawn from a `SearchRng`, so a fixed
//! seed reproduces a search exactly.
//!
//! ```
//! use ucb_mcts::core::SearchRng;
//!
//! let mut a = SearchRng::new(7);
//! let mut b = SearchRng::new(7);
//! assert_eq!(a.choose_index(10), b.choose_index(10));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct SearchRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl SearchRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Derive an independent, deterministic child stream.
    ///
    /// The n-th fork of a given seed is always the same stream.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// Uniform index in `0..len`. Returns `None` for an empty range.
    pub fn choose_index(&mut self, len: usize) -> Option<usize> {
        match len {
            0 => None,
            1 => Some(0),
            _ => Some(self.inner.gen_range(0..len)),
        }
    }

    /// Uniformly choose an element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        self.choose_index(slice.len()).map(|i| &slice[i])
    }
}
