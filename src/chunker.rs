//! Chunking: grouping sentences into working-memory-sized listening units.
//!
//! ## The Algorithm
//!
//! Greedy accumulation against a [`ChunkBudget`]:
//!
//! ```text
//! target = 180
//! sentences: [80] [70] [90] [40]
//!
//! buffer [80]       -> +70 fits (150)
//! buffer [80 70]    -> +90 overflows, close chunk
//! buffer [90]       -> +40 fits (131)
//! chunks: "…150 chars…" | "…131 chars…"
//! ```
//!
//! A second pass force-slices any chunk past the ceiling (`1.8 × target`)
//! into target-sized pieces. That only happens when a single sentence is
//! itself enormous — a run-on, or unpunctuated pasted text — and it
//! protects the listener from a chunk nothing could hold in memory.
//!
//! Guarantees: chunks partition the sentence list (nothing dropped,
//! nothing duplicated, order preserved) and no chunk is empty.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::ChunkBudget;

/// A bounded-length contiguous segment of the script, sized for
/// working-memory constraints.
///
/// Created once per generation call and immutable afterward. `id` is a
/// stable sequence key (`c1`, `c2`, …); `label` is the learner-facing
/// name (`Part 1`, `Part 2`, …); `anchors` holds up to five content
/// words, most frequent first, filled in by the lexical extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    /// Stable sequence key: `c1`, `c2`, …
    pub id: String,
    /// Learner-facing label: `Part 1`, `Part 2`, …
    pub label: String,
    /// The chunk transcript.
    pub text: String,
    /// Frequency-ranked content words pinned to this chunk (≤5).
    pub anchors: Vec<String>,
    /// Audio start offset in seconds, when aligned audio exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_sec: Option<f64>,
    /// Audio end offset in seconds, when aligned audio exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_sec: Option<f64>,
}

impl Chunk {
    /// Create the `index`-th chunk (zero-based) from its text.
    #[must_use]
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            id: format!("c{}", index + 1),
            label: format!("Part {}", index + 1),
            text: text.into(),
            anchors: Vec::new(),
            start_sec: None,
            end_sec: None,
        }
    }

    /// The chunk length in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Group sentences into chunk texts under the given budget.
///
/// Output texts are whitespace-joined runs of whole sentences, except
/// where a single run past the ceiling had to be force-sliced.
///
/// ```rust
/// use earshot::{chunk_sentences, ChunkBudget};
///
/// let sentences = vec!["Short one.".to_string(), "Another short one.".to_string()];
/// let chunks = chunk_sentences(&sentences, ChunkBudget::new(200));
/// assert_eq!(chunks, vec!["Short one. Another short one."]);
/// ```
#[must_use]
pub fn chunk_sentences(sentences: &[String], budget: ChunkBudget) -> Vec<String> {
    let mut grouped: Vec<String> = Vec::new();
    let mut buffer = String::new();
    let mut buffer_chars = 0usize;

    for sentence in sentences {
        let len = sentence.chars().count();
        if len == 0 {
            continue;
        }
        // +1 for the joining space.
        let additional = if buffer_chars == 0 { len } else { len + 1 };
        if budget.would_overflow(buffer_chars, additional) {
            grouped.push(std::mem::take(&mut buffer));
            buffer_chars = 0;
        }
        if buffer_chars > 0 {
            buffer.push(' ');
        }
        buffer.push_str(sentence);
        buffer_chars += additional;
    }
    if !buffer.is_empty() {
        grouped.push(buffer);
    }

    // Boundary correction: slice anything past the ceiling. Slicing never
    // reorders; it only replaces one oversized chunk with its pieces.
    let mut chunks = Vec::with_capacity(grouped.len());
    for text in grouped {
        if budget.oversize(text.chars().count()) {
            chunks.extend(slice_chunk(&text, budget.target()));
        } else {
            chunks.push(text);
        }
    }
    chunks
}

/// Slice a chunk into pieces of at most `target` characters, cutting
/// only on grapheme boundaries.
///
/// The budget is measured in chars, so a slice closes as soon as the
/// next grapheme would push its char count past `target` — a cluster of
/// combining marks counts for every char it carries, it is just never
/// split down the middle. The final remainder piece may be shorter.
fn slice_chunk(text: &str, target: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for grapheme in text.graphemes(true) {
        let len = grapheme.chars().count();
        if current_chars > 0 && current_chars + len > target {
            pieces.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        current.push_str(grapheme);
        current_chars += len;
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_short_script_single_chunk() {
        let chunks = chunk_sentences(&sentences(&["Tiny."]), ChunkBudget::new(180));
        assert_eq!(chunks, vec!["Tiny."]);
    }

    #[test]
    fn test_greedy_grouping() {
        let a = "a".repeat(80);
        let b = "b".repeat(80);
        let c = "c".repeat(80);
        let chunks = chunk_sentences(&sentences(&[&a, &b, &c]), ChunkBudget::new(180));

        // a+b fits (161 with the join space), c overflows into chunk 2.
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], format!("{a} {b}"));
        assert_eq!(chunks[1], c);
    }

    #[test]
    fn test_order_preserved_nothing_dropped() {
        let input = sentences(&["First.", "Second.", "Third.", "Fourth."]);
        let chunks = chunk_sentences(&input, ChunkBudget::new(15));
        let rejoined = chunks.join(" ");
        assert_eq!(rejoined, "First. Second. Third. Fourth.");
    }

    #[test]
    fn test_runon_sentence_sliced() {
        let runon = "x".repeat(500);
        let budget = ChunkBudget::new(100);
        let chunks = chunk_sentences(&sentences(&[&runon]), budget);

        assert_eq!(chunks.len(), 5);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 100);
        }
        assert_eq!(chunks.concat(), runon);
    }

    #[test]
    fn test_slice_remainder_shorter() {
        let runon = "y".repeat(250);
        let chunks = chunk_sentences(&sentences(&[&runon]), ChunkBudget::new(100));
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].chars().count(), 50);
    }

    #[test]
    fn test_multichar_cluster_slices_respect_char_budget() {
        // One grapheme, two chars: a Devanagari consonant plus vowel sign.
        let cluster = "कि";
        assert_eq!(cluster.chars().count(), 2);
        assert_eq!(cluster.graphemes(true).count(), 1);

        let runon = cluster.repeat(500); // 1000 chars
        let budget = ChunkBudget::new(100);
        let chunks = chunk_sentences(&sentences(&[&runon]), budget);

        for chunk in &chunks {
            assert!(
                chunk.chars().count() <= budget.target(),
                "post-split chunk has {} chars, target is {}",
                chunk.chars().count(),
                budget.target()
            );
        }
        assert_eq!(chunks.concat(), runon);
    }

    #[test]
    fn test_combining_sequence_never_split() {
        // NFD "e" + combining acute: 2 chars, 1 grapheme.
        let runon = "e\u{0301}".repeat(120); // 240 chars
        let chunks = chunk_sentences(&sentences(&[&runon]), ChunkBudget::new(99));

        for chunk in &chunks {
            assert!(chunk.chars().count() <= 99);
            // Every piece starts on a base character, not a bare mark.
            assert!(!chunk.starts_with('\u{0301}'));
        }
        assert_eq!(chunks.concat(), runon);
    }

    #[test]
    fn test_multibyte_slicing_is_boundary_safe() {
        let runon = "日本語のテキスト".repeat(40); // 320 chars, all multibyte
        let chunks = chunk_sentences(&sentences(&[&runon]), ChunkBudget::new(100));
        assert!(chunks.len() > 1);
        assert_eq!(chunks.concat(), runon);
    }

    #[test]
    fn test_no_empty_chunks() {
        let input = sentences(&["", "Real.", ""]);
        let chunks = chunk_sentences(&input, ChunkBudget::new(180));
        assert_eq!(chunks, vec!["Real."]);
    }

    #[test]
    fn test_chunk_ids_and_labels() {
        let chunk = Chunk::new(0, "hello");
        assert_eq!(chunk.id, "c1");
        assert_eq!(chunk.label, "Part 1");
        assert_eq!(Chunk::new(4, "x").id, "c5");
    }
}
