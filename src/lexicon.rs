//! Lexical extraction: anchors, phrasal verbs, and collocations.
//!
//! ## Anchors
//!
//! Each chunk gets up to five "anchors": high-frequency content words
//! that act as memory aids during listening. Extraction is deliberately
//! shallow — no lemmatization, no POS tagging — just frequency over
//! normalized tokens with a stopword filter:
//!
//! ```text
//! "The harbour closed. The harbour reopened after repairs."
//!        ↓ lowercase, strip punctuation, drop stopwords / short tokens
//! harbour×2, closed×1, reopened×1, after? (stopword), repairs×1
//!        ↓ top-K by frequency, ties by first appearance
//! ["harbour", "closed", "reopened", "repairs"]
//! ```
//!
//! ## Phrases
//!
//! Two corpus-wide pools feed vocabulary-flavored activities:
//!
//! - **Phrasal verbs**: a fixed verb list immediately followed by a fixed
//!   particle list (`look up`, `picked out`, `turning off`), matched with
//!   one compiled regex.
//! - **Collocations**: adjacent-token bigrams where neither side is a
//!   stopword, frequency-ranked.
//!
//! ## Injected configuration
//!
//! The word lists live on [`Lexicon`], not in globals, so tests (and
//! other languages' lexicons) can substitute their own.

use std::collections::HashMap;
use std::collections::HashSet;

use regex::Regex;

/// Default English stopword list.
const STOPWORDS: &[&str] = &[
    "the", "and", "that", "this", "with", "from", "have", "has", "had", "was", "were", "are",
    "is", "be", "been", "being", "for", "not", "but", "you", "your", "they", "them", "their",
    "there", "here", "what", "when", "where", "which", "while", "will", "would", "could",
    "should", "can", "may", "might", "must", "shall", "about", "into", "over", "under",
    "then", "than", "also", "just", "very", "some", "such", "only", "more", "most", "other",
    "these", "those", "because", "after", "before", "between", "through", "during", "each",
    "both", "does", "did", "doing", "its", "it's", "his", "her", "hers", "our", "ours",
];

/// Verbs eligible to head a phrasal verb.
const PHRASAL_VERBS: &[&str] = &[
    "look", "pick", "take", "get", "turn", "put", "give", "go", "come", "run", "break",
    "bring", "call", "carry", "set", "find", "work",
];

/// Particles that complete a phrasal verb.
const PARTICLES: &[&str] = &[
    "up", "down", "out", "in", "on", "off", "over", "away", "back", "through",
];

/// Minimum token length for anchor candidacy.
const ANCHOR_MIN_LEN: usize = 4;
/// Minimum token length for collocation members.
const COLLOCATION_MIN_LEN: usize = 3;
/// Anchors kept per chunk.
pub const ANCHORS_PER_CHUNK: usize = 5;
/// Cap on the global anchor pool.
const ANCHOR_POOL_CAP: usize = 16;
/// Cap on each phrase sub-list (phrasal verbs, collocations).
const PHRASE_LIST_CAP: usize = 12;

/// Lexical configuration: stopwords plus phrasal-verb word lists.
///
/// Owns its compiled regex; construct once and reuse across generation
/// calls. [`Lexicon::default`] gives the built-in English lists.
#[derive(Debug, Clone)]
pub struct Lexicon {
    stopwords: HashSet<String>,
    phrasal: Regex,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(STOPWORDS, PHRASAL_VERBS, PARTICLES)
    }
}

impl Lexicon {
    /// Build a lexicon from explicit word lists.
    ///
    /// # Panics
    ///
    /// Panics if `verbs` or `particles` is empty; there is no sensible
    /// phrasal pattern to compile without them.
    #[must_use]
    pub fn new(stopwords: &[&str], verbs: &[&str], particles: &[&str]) -> Self {
        assert!(!verbs.is_empty(), "verb list must not be empty");
        assert!(!particles.is_empty(), "particle list must not be empty");

        let pattern = format!(
            r"(?i)\b({})(?:s|ed|ing)?\s+({})\b",
            verbs.join("|"),
            particles.join("|"),
        );
        Self {
            stopwords: stopwords.iter().map(|w| (*w).to_string()).collect(),
            // The pattern is assembled from plain word lists; it always compiles.
            phrasal: Regex::new(&pattern).expect("phrasal pattern from word lists"),
        }
    }

    /// Whether a (lowercased) token is a stopword.
    #[must_use]
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Frequency-ranked content words for one chunk, capped at `k`.
    ///
    /// Ties break toward the word seen first, so results are fully
    /// deterministic.
    #[must_use]
    pub fn anchors(&self, text: &str, k: usize) -> Vec<String> {
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        for (position, token) in tokenize(text).into_iter().enumerate() {
            if token.chars().count() < ANCHOR_MIN_LEN || self.is_stopword(&token) {
                continue;
            }
            let entry = counts.entry(token).or_insert((0, position));
            entry.0 += 1;
        }

        let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
        ranked.into_iter().take(k).map(|(word, _)| word).collect()
    }

    /// Phrasal verbs found in the text, lowercased, deduplicated in
    /// first-occurrence order, capped at 12.
    #[must_use]
    pub fn phrasal_verbs(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut found = Vec::new();
        for m in self.phrasal.find_iter(text) {
            let phrase = crate::segment::collapse_whitespace(&m.as_str().to_lowercase());
            if seen.insert(phrase.clone()) {
                found.push(phrase);
                if found.len() == PHRASE_LIST_CAP {
                    break;
                }
            }
        }
        found
    }

    /// Adjacent-token collocations, frequency-ranked, capped at 12.
    ///
    /// Both members must be ≥3 chars and non-stopwords.
    #[must_use]
    pub fn collocations(&self, text: &str) -> Vec<String> {
        let tokens = tokenize(text);
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        for (position, pair) in tokens.windows(2).enumerate() {
            let (a, b) = (&pair[0], &pair[1]);
            if a.chars().count() < COLLOCATION_MIN_LEN
                || b.chars().count() < COLLOCATION_MIN_LEN
                || self.is_stopword(a)
                || self.is_stopword(b)
            {
                continue;
            }
            let bigram = format!("{a} {b}");
            let entry = counts.entry(bigram).or_insert((0, position));
            entry.0 += 1;
        }

        let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
        ranked
            .into_iter()
            .take(PHRASE_LIST_CAP)
            .map(|(bigram, _)| bigram)
            .collect()
    }
}

/// Normalize and tokenize: lowercase, strip non-alphanumerics (keeping
/// apostrophes and hyphens), split on whitespace.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|raw| {
            raw.chars()
                .filter(|c| c.is_alphanumeric() || *c == '\'' || *c == '-')
                .collect::<String>()
        })
        .filter(|token| !token.is_empty())
        .collect()
}

/// Extracted lexical pools for one script: per-chunk anchors plus the
/// global anchor and phrase pools the synthesizer draws distractors from.
#[derive(Debug, Clone, Default)]
pub struct LexicalPools {
    /// Anchors per chunk, parallel to the chunk list.
    pub chunk_anchors: Vec<Vec<String>>,
    /// Union of all chunk anchors in chunk order, deduplicated, capped at 16.
    pub anchor_pool: Vec<String>,
    /// Phrasal verbs then collocations, deduplicated in that order.
    pub phrase_pool: Vec<String>,
}

impl LexicalPools {
    /// Run both extractors over the chunk texts and the full script.
    #[must_use]
    pub fn extract(lexicon: &Lexicon, chunk_texts: &[String], script: &str) -> Self {
        let chunk_anchors: Vec<Vec<String>> = chunk_texts
            .iter()
            .map(|text| lexicon.anchors(text, ANCHORS_PER_CHUNK))
            .collect();

        let mut anchor_pool = Vec::new();
        let mut seen = HashSet::new();
        'outer: for anchors in &chunk_anchors {
            for anchor in anchors {
                if seen.insert(anchor.clone()) {
                    anchor_pool.push(anchor.clone());
                    if anchor_pool.len() == ANCHOR_POOL_CAP {
                        break 'outer;
                    }
                }
            }
        }

        let mut phrase_pool = lexicon.phrasal_verbs(script);
        let mut phrase_seen: HashSet<String> = phrase_pool.iter().cloned().collect();
        for collocation in lexicon.collocations(script) {
            if phrase_seen.insert(collocation.clone()) {
                phrase_pool.push(collocation);
            }
        }

        Self {
            chunk_anchors,
            anchor_pool,
            phrase_pool,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_strips_punctuation_keeps_marks() {
        let tokens = tokenize("Maria's well-known café, (opened) 1999!");
        assert_eq!(tokens, vec!["maria's", "well-known", "café", "opened", "1999"]);
    }

    #[test]
    fn test_anchors_ranked_by_frequency() {
        let lex = Lexicon::default();
        let anchors = lex.anchors(
            "The harbour closed. The harbour reopened. Repairs took weeks.",
            5,
        );
        assert_eq!(anchors[0], "harbour");
        assert!(anchors.contains(&"repairs".to_string()));
    }

    #[test]
    fn test_anchors_tie_breaks_by_first_seen() {
        let lex = Lexicon::default();
        let anchors = lex.anchors("zebra apple zebra apple", 2);
        assert_eq!(anchors, vec!["zebra", "apple"]);
    }

    #[test]
    fn test_anchors_exclude_short_and_stopwords() {
        let lex = Lexicon::default();
        let anchors = lex.anchors("the cat and the dog ran through town quickly", 5);
        assert!(!anchors.contains(&"the".to_string()));
        assert!(!anchors.contains(&"cat".to_string())); // <4 chars
        assert!(anchors.contains(&"quickly".to_string()));
    }

    #[test]
    fn test_phrasal_verbs_first_occurrence_order() {
        let lex = Lexicon::default();
        let phrases = lex.phrasal_verbs("We look up words, then pick up speed. Look up again.");
        assert_eq!(phrases, vec!["look up", "pick up"]);
    }

    #[test]
    fn test_phrasal_verbs_inflected() {
        let lex = Lexicon::default();
        let phrases = lex.phrasal_verbs("She picked up the phone while turning off the light.");
        assert_eq!(phrases, vec!["picked up", "turning off"]);
    }

    #[test]
    fn test_collocations_frequency_ranked() {
        let lex = Lexicon::default();
        let found =
            lex.collocations("climate change affects harvests. climate change affects cities.");
        assert_eq!(found[0], "climate change");
    }

    #[test]
    fn test_collocations_skip_stopword_members() {
        let lex = Lexicon::default();
        let found = lex.collocations("walked the plank");
        assert!(found.is_empty());
    }

    #[test]
    fn test_empty_input_empty_pools() {
        let lex = Lexicon::default();
        let pools = LexicalPools::extract(&lex, &[], "");
        assert!(pools.chunk_anchors.is_empty());
        assert!(pools.anchor_pool.is_empty());
        assert!(pools.phrase_pool.is_empty());
    }

    #[test]
    fn test_anchor_pool_dedup_and_cap() {
        let lex = Lexicon::default();
        let chunks: Vec<String> = (0..20)
            .map(|i| format!("word{i} word{i} repeated repeated shared"))
            .collect();
        let pools = LexicalPools::extract(&lex, &chunks, "");
        assert!(pools.anchor_pool.len() <= 16);
        let unique: HashSet<_> = pools.anchor_pool.iter().collect();
        assert_eq!(unique.len(), pools.anchor_pool.len());
    }

    #[test]
    fn test_custom_lexicon() {
        let lex = Lexicon::new(&["der", "die", "das"], &["gehen"], &["aus"]);
        assert!(lex.is_stopword("das"));
        assert_eq!(lex.phrasal_verbs("wir gehen aus heute"), vec!["gehen aus"]);
    }
}
