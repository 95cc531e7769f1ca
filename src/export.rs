//! Serialization helpers for rendering collaborators.
//!
//! The renderers themselves (interactive HTML, PDF, DOCX) live outside
//! this crate; what lives here are the two data-preparation rules they
//! depend on for correctness:
//!
//! - **Inline JSON**: the HTML exporter embeds the pack as a JSON payload
//!   inside a `<script>` tag. A literal `</script>` inside a string value
//!   would terminate the tag early, so every `<` is escaped to `\u003c`.
//!   This is a correctness rule, not a style choice.
//! - **Answer key**: the teacher's key document enumerates chunks
//!   (transcript + anchors) and then activities with the answer spelled
//!   out in words, shared across the Standard and Adapted sheets.

use crate::activity::{Activity, Answer};
use crate::error::Result;
use crate::pack::ListeningPack;

/// Serialize a pack to JSON safe for inline embedding in HTML.
///
/// Every `<` in the output is escaped to `\u003c`.
///
/// # Errors
///
/// Returns [`Error::Serialize`](crate::Error::Serialize) if the pack
/// cannot be serialized.
pub fn inline_json(pack: &ListeningPack) -> Result<String> {
    // '<' only occurs inside string values in JSON text, so a blanket
    // replacement is safe.
    Ok(serde_json::to_string(pack)?.replace('<', "\\u003c"))
}

/// Render the shared teacher answer key as plain text lines.
///
/// Chunks first (label, transcript, anchors), then one line per activity
/// with a human-readable answer.
#[must_use]
pub fn answer_key_lines(pack: &ListeningPack) -> Vec<String> {
    let mut lines = Vec::with_capacity(pack.chunks.len() * 2 + pack.activities.len() + 2);

    lines.push(format!("{} — {}", pack.meta.title, pack.meta.level));
    for chunk in &pack.chunks {
        lines.push(format!("{}: {}", chunk.label, chunk.text));
        if !chunk.anchors.is_empty() {
            lines.push(format!("  Anchors: {}", chunk.anchors.join(", ")));
        }
    }

    for activity in &pack.activities {
        lines.push(format!(
            "{} — {}",
            activity.id,
            readable_answer(activity)
        ));
    }
    lines
}

/// The answer of one activity, spelled out for the key document.
#[must_use]
pub fn readable_answer(activity: &Activity) -> String {
    match &activity.answer {
        Answer::Letter(letter) => format!("Option: {letter}"),
        Answer::TrueFalse(true) => "True".to_string(),
        Answer::TrueFalse(false) => "False".to_string(),
        Answer::Order(items) => items.join(" → "),
        Answer::Match(indices) => {
            let left = activity.standard.left.as_deref().unwrap_or_default();
            let right = activity.standard.right.as_deref().unwrap_or_default();
            indices
                .iter()
                .enumerate()
                .map(|(i, &index)| {
                    let term = left.get(i).map_or("?", String::as_str);
                    let label = right.get(index).map_or("?", String::as_str);
                    format!("{term}→{label}")
                })
                .collect::<Vec<_>>()
                .join("; ")
        }
    }
}
