//! Seedable randomness for dealing, determinization and playouts.
//!
//! Every random choice in the crate draws from a `GameRng` handed in
//! explicitly, so a search seeded with the same value makes the same decision.
//!
//! ```
//! use loveletter_mcts::core::GameRng;
//!
//! let mut table = GameRng::new(42);
//! let mut agent = table.fork();
//!
//! let mut replay = GameRng::new(42);
//! let mut agent_replay = replay.fork();
//! assert_eq!(agent.gen_index(16), agent_replay.gen_index(16));
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Golden-ratio increment separating successive fork seeds.
const FORK_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// ChaCha8 stream plus the bookkeeping needed to fork it reproducibly.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Independent stream for a sub-component (an agent's targeting, say).
    ///
    /// The n-th fork of a given seed is always the same stream, whatever the
    /// parent has drawn in between.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed.wrapping_add(self.forks.wrapping_mul(FORK_STRIDE)))
    }

    /// Uniform index in `0..upper`. Panics if `upper` is zero.
    pub fn gen_index(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..upper)
    }

    /// Fair coin, used to pick between the drawn and the held card.
    pub fn coin_flip(&mut self) -> bool {
        self.inner.gen()
    }

    /// Shuffle cards (or anything else) in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }
}
