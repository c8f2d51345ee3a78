//! Seeded randomness for playouts.
//!
//! Every playout draws from its own `PlayoutRng`. A worker that clones a
//! state for a parallel branch forks the generator alongside it, so the
//! branch is reproducible from the root seed and the fork order alone.
//!
//! ```
//! use variant_state::core::{Action, PlayoutRng};
//!
//! let actions = [Action::new(1), Action::new(2), Action::new(3)];
//!
//! let mut root = PlayoutRng::new(42);
//! let mut branch = root.fork();
//! let mut replay = PlayoutRng::new(42).fork();
//! assert_eq!(branch.choose(&actions), replay.choose(&actions));
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Golden-ratio increment separating successive fork seeds.
const FORK_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// ChaCha8 stream with deterministic forking.
#[derive(Clone, Debug)]
pub struct PlayoutRng {
    inner: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl PlayoutRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    /// Seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive the next independent branch. Forking does not advance this
    /// stream.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed.wrapping_add(self.forks.wrapping_mul(FORK_STRIDE)))
    }

    /// Uniformly chosen element, or `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }

    /// Uniform index in `0..len`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    pub fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Action;

    fn draws(rng: &mut PlayoutRng) -> Vec<usize> {
        (0..32).map(|_| rng.gen_index(218)).collect()
    }

    #[test]
    fn test_same_seed_same_stream() {
        assert_eq!(draws(&mut PlayoutRng::new(7)), draws(&mut PlayoutRng::new(7)));
        assert_ne!(draws(&mut PlayoutRng::new(7)), draws(&mut PlayoutRng::new(8)));
    }

    #[test]
    fn test_fork_leaves_parent_stream_alone() {
        let mut parent = PlayoutRng::new(42);
        let _ = parent.fork();
        assert_eq!(draws(&mut parent), draws(&mut PlayoutRng::new(42)));
    }

    #[test]
    fn test_forks_are_distinct_and_reproducible() {
        let mut root = PlayoutRng::new(42);
        let mut first = root.fork();
        let mut second = root.fork();
        assert_ne!(first.seed(), second.seed());
        assert_ne!(draws(&mut first), draws(&mut second));

        let mut again = PlayoutRng::new(42);
        let _ = again.fork();
        assert_eq!(again.fork().seed(), second.seed());
    }

    #[test]
    fn test_choose_stays_in_slice() {
        let mut rng = PlayoutRng::new(3);
        let actions: Vec<Action> = (1..=20).map(Action::new).collect();
        for _ in 0..100 {
            assert!(rng.choose(&actions).is_some_and(|a| actions.contains(a)));
        }
        assert_eq!(rng.choose::<Action>(&[]), None);
    }
}
