//! Pluggable shuffling.
//!
//! The only non-determinism in the whole pipeline is the display-order
//! shuffle for ordering and matching items. It hides behind a one-method
//! trait so tests (and anyone needing reproducible packs) can inject a
//! seeded source.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// A source of display-order shuffles.
///
/// Implementations only shuffle; they never add, drop, or rewrite items.
pub trait Shuffler {
    /// Shuffle the slice in place.
    fn shuffle(&mut self, items: &mut [String]);
}

/// Thread-RNG shuffler; the default for production use.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadShuffler;

impl Shuffler for ThreadShuffler {
    fn shuffle(&mut self, items: &mut [String]) {
        items.shuffle(&mut rand::thread_rng());
    }
}

/// Deterministic shuffler seeded from a `u64`.
///
/// Two generators built from the same seed produce identical packs for
/// identical inputs.
///
/// ```rust
/// use earshot::{SeededShuffler, Shuffler};
///
/// let mut a = SeededShuffler::new(7);
/// let mut b = SeededShuffler::new(7);
/// let mut xs = vec!["1".to_string(), "2".to_string(), "3".to_string()];
/// let mut ys = xs.clone();
/// a.shuffle(&mut xs);
/// b.shuffle(&mut ys);
/// assert_eq!(xs, ys);
/// ```
#[derive(Debug, Clone)]
pub struct SeededShuffler {
    rng: StdRng,
}

impl SeededShuffler {
    /// Create a shuffler from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Shuffler for SeededShuffler {
    fn shuffle(&mut self, items: &mut [String]) {
        items.shuffle(&mut self.rng);
    }
}
