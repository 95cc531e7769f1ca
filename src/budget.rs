//! Chunk character budgets.
//!
//! ## The Problem
//!
//! A listening chunk has to fit in working memory, but a rigid size means
//! splitting mid-sentence, which is worse than running a little long:
//!
//! ```text
//! Target: 180 chars
//! Sentences: [90] [110]
//!
//! Rigid:    "…[90] [first 90 of 110]" | "[rest]"   <- mid-sentence cut
//! Flexible: "…[90]" | "[110]"                      <- whole sentences
//! ```
//!
//! ## Target vs Ceiling
//!
//! `ChunkBudget` separates the target size from the hard ceiling:
//!
//! - `target`: what the chunker aims for when grouping sentences.
//! - `ceiling`: `1.8 × target`. A chunk past this point (one run-on
//!   sentence, a pasted paragraph with no punctuation) gets force-sliced
//!   into target-sized pieces.
//!
//! Sizes are measured in characters, not bytes, so multibyte scripts
//! budget the same as ASCII.

/// Character budget for listening chunks: a target size with a hard
/// ceiling at `1.8 ×` the target.
///
/// # Examples
///
/// ```rust
/// use earshot::ChunkBudget;
///
/// let budget = ChunkBudget::new(200);
/// assert_eq!(budget.target(), 200);
/// assert_eq!(budget.ceiling(), 360);
/// assert!(budget.would_overflow(150, 60));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkBudget {
    target: usize,
}

/// Ceiling multiplier, fixed at 1.8 (stored as a ratio to stay integral).
const CEILING_NUM: usize = 9;
const CEILING_DEN: usize = 5;

impl ChunkBudget {
    /// Create a budget with the given target size in characters.
    ///
    /// # Panics
    ///
    /// Panics if `target == 0`.
    #[must_use]
    pub fn new(target: usize) -> Self {
        assert!(target > 0, "chunk budget target must be > 0");
        Self { target }
    }

    /// The target chunk size in characters.
    #[must_use]
    pub const fn target(&self) -> usize {
        self.target
    }

    /// The hard ceiling (`1.8 × target`) past which a chunk is force-split.
    #[must_use]
    pub const fn ceiling(&self) -> usize {
        self.target * CEILING_NUM / CEILING_DEN
    }

    /// Whether appending `additional` chars to a `current`-char buffer
    /// would push it past the target.
    ///
    /// Used by the greedy accumulator; it closes the buffer *before* the
    /// overflowing sentence is added. An empty buffer always accepts, so
    /// a single oversized sentence still lands somewhere.
    #[must_use]
    pub fn would_overflow(&self, current: usize, additional: usize) -> bool {
        current > 0 && current.saturating_add(additional) > self.target
    }

    /// Whether a finished chunk is past the ceiling and must be sliced.
    #[must_use]
    pub fn oversize(&self, len: usize) -> bool {
        len > self.ceiling()
    }
}

impl From<usize> for ChunkBudget {
    fn from(target: usize) -> Self {
        Self::new(target)
    }
}

impl Default for ChunkBudget {
    fn default() -> Self {
        // B1 midpoint; callers normally derive this from a Level profile.
        Self::new(250)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceiling_is_1_8x() {
        assert_eq!(ChunkBudget::new(180).ceiling(), 324);
        assert_eq!(ChunkBudget::new(340).ceiling(), 612);
    }

    #[test]
    fn test_would_overflow() {
        let b = ChunkBudget::new(100);
        assert!(!b.would_overflow(0, 500)); // empty buffer always accepts
        assert!(!b.would_overflow(40, 60));
        assert!(b.would_overflow(41, 60));
    }

    #[test]
    fn test_oversize() {
        let b = ChunkBudget::new(100);
        assert!(!b.oversize(180));
        assert!(b.oversize(181));
    }

    #[test]
    #[should_panic]
    fn test_zero_target_panics() {
        let _ = ChunkBudget::new(0);
    }
}
