//! Sentence segmentation.
//!
//! Splits a raw script into sentences with punctuation heuristics:
//! a terminal mark (`.`, `?`, `!`) followed by whitespace ends a sentence,
//! and the mark stays attached to the sentence it ends.
//!
//! Scripts pasted from slides or subtitles often carry no terminal
//! punctuation at all. When the punctuation pass finds at most one
//! sentence, we fall back to splitting on line breaks, which is usually
//! the author's intended structure in that kind of source.
//!
//! Worst case (one unpunctuated line), the whole script comes back as a
//! single "sentence"; the chunker's oversize splitter deals with it.

/// Split raw text into an ordered list of sentences.
///
/// Returns at least one element for any input that is non-empty after
/// trimming; returns an empty vec otherwise.
///
/// ```rust
/// use earshot::segment_sentences;
///
/// let s = segment_sentences("Maria works nights. She studies by day! Why?");
/// assert_eq!(s, vec!["Maria works nights.", "She studies by day!", "Why?"]);
/// ```
#[must_use]
pub fn segment_sentences(text: &str) -> Vec<String> {
    let collapsed = collapse_whitespace(text);
    if collapsed.is_empty() {
        return vec![];
    }

    let by_punct = split_terminal(&collapsed);
    if by_punct.len() > 1 {
        return by_punct;
    }

    // Punctuation-free text: line breaks in the original are the next
    // best boundary signal.
    let by_lines: Vec<String> = text
        .lines()
        .map(|line| collapse_whitespace(line))
        .filter(|line| !line.is_empty())
        .collect();
    if by_lines.len() > 1 {
        return by_lines;
    }

    vec![collapsed]
}

/// Split on terminal punctuation followed by whitespace, keeping the
/// punctuation attached to the preceding fragment.
fn split_terminal(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '?' | '!') && chars.peek().is_some_and(|next| next.is_whitespace()) {
            // Consume the boundary whitespace run.
            while chars.peek().is_some_and(|next| next.is_whitespace()) {
                chars.next();
            }
            let s = current.trim();
            if !s.is_empty() {
                sentences.push(s.to_string());
            }
            current.clear();
        }
    }

    let tail = current.trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}

/// Collapse all whitespace runs to single spaces and trim the ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_sentences() {
        let s = segment_sentences("One thing. Another thing? A third!");
        assert_eq!(s.len(), 3);
        assert_eq!(s[0], "One thing.");
        assert_eq!(s[2], "A third!");
    }

    #[test]
    fn test_punctuation_stays_attached() {
        let s = segment_sentences("Really? Yes.");
        assert_eq!(s, vec!["Really?", "Yes."]);
    }

    #[test]
    fn test_whitespace_collapsed() {
        let s = segment_sentences("Spaced   out.\n\tNext   one.");
        assert_eq!(s, vec!["Spaced out.", "Next one."]);
    }

    #[test]
    fn test_newline_fallback() {
        let s = segment_sentences("first line\nsecond line\nthird line");
        assert_eq!(s.len(), 3);
        assert_eq!(s[1], "second line");
    }

    #[test]
    fn test_unpunctuated_single_line() {
        let s = segment_sentences("just one long unpunctuated line of speech");
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_trailing_fragment_kept() {
        let s = segment_sentences("Done. And then");
        assert_eq!(s, vec!["Done.", "And then"]);
    }

    #[test]
    fn test_empty_and_blank() {
        assert!(segment_sentences("").is_empty());
        assert!(segment_sentences("  \n\t ").is_empty());
    }

    #[test]
    fn test_decimal_not_split_without_space() {
        // "3.14" has no whitespace after the period, so it never splits.
        let s = segment_sentences("Pi is 3.14 roughly. True.");
        assert_eq!(s.len(), 2);
        assert_eq!(s[0], "Pi is 3.14 roughly.");
    }
}
