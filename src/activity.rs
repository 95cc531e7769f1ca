//! Activity data model.
//!
//! Every activity carries two presentations of the same task — `standard`
//! and `adapted` — plus exactly one answer. The central correctness
//! contract of the whole crate:
//!
//! ```text
//! answer must be valid against BOTH sides
//!
//! standard.options: A B C D        adapted.options: A B      (subset!)
//!                     ^ answer                        ^ same answer
//! ```
//!
//! Adapted sides may show fewer options or a simplified prompt; they never
//! relabel, reorder answers, or introduce new correct options. One answer
//! key therefore serves both the Standard and Adapted printed sheets.

use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

/// Activity category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// One main-idea MCQ over the whole script.
    GistMcq,
    /// Per-chunk fact MCQ.
    DetailMcq,
    /// Per-chunk true/false statement.
    DetailTf,
    /// Reorder the chunk labels into script order.
    Order,
    /// Match key terms to chunk labels.
    Match,
    /// Best-summary MCQ.
    SummaryMcq,
}

/// One selectable option in an MCQ-shaped activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Option letter (`A`–`D`) or `T`/`F`.
    pub id: String,
    /// Display text.
    pub text: String,
}

impl ChoiceOption {
    /// Create an option from a letter id and display text.
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// One presentation (Standard or Adapted) of an activity.
///
/// Exactly one payload is populated, matching the activity kind:
/// `options` for MCQ/true-false, `items` for ordering, `left` + `right`
/// for matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Side {
    /// Learner-facing instruction or question.
    pub prompt: String,
    /// MCQ options, when this is an MCQ-shaped activity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ChoiceOption>>,
    /// Left column of a matching task.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Vec<String>>,
    /// Right column of a matching task.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Vec<String>>,
    /// Display list of an ordering task.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
}

impl Side {
    /// An MCQ-shaped side.
    #[must_use]
    pub fn choices(prompt: impl Into<String>, options: Vec<ChoiceOption>) -> Self {
        Self {
            prompt: prompt.into(),
            options: Some(options),
            ..Self::default()
        }
    }

    /// An ordering side.
    #[must_use]
    pub fn ordering(prompt: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            prompt: prompt.into(),
            items: Some(items),
            ..Self::default()
        }
    }

    /// A matching side.
    #[must_use]
    pub fn matching(prompt: impl Into<String>, left: Vec<String>, right: Vec<String>) -> Self {
        Self {
            prompt: prompt.into(),
            left: Some(left),
            right: Some(right),
            ..Self::default()
        }
    }

    /// The ids of this side's options, in display order. Empty for
    /// non-MCQ sides.
    #[must_use]
    pub fn option_ids(&self) -> Vec<&str> {
        self.options
            .as_deref()
            .map(|opts| opts.iter().map(|o| o.id.as_str()).collect())
            .unwrap_or_default()
    }
}

/// The single shared answer of an activity, one variant per answer shape.
///
/// Consumers pattern-match exhaustively instead of sniffing a JSON union.
/// On the wire this serializes to the renderer contract: a one-letter
/// string, `"T"`/`"F"`, a string array, or a number array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Correct option letter of an MCQ.
    Letter(char),
    /// True/false verdict.
    TrueFalse(bool),
    /// Correct sequence for an ordering task.
    Order(Vec<String>),
    /// For each left item, the index of its partner in `right`.
    Match(Vec<usize>),
}

impl Answer {
    /// The letter id this answer occupies in an options list (`A`–`D`,
    /// `T`, `F`), if it is letter-shaped.
    #[must_use]
    pub fn letter_id(&self) -> Option<String> {
        match self {
            Self::Letter(letter) => Some(letter.to_string()),
            Self::TrueFalse(true) => Some("T".to_string()),
            Self::TrueFalse(false) => Some("F".to_string()),
            _ => None,
        }
    }
}

impl Serialize for Answer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Letter(letter) => serializer.serialize_str(&letter.to_string()),
            Self::TrueFalse(value) => serializer.serialize_str(if *value { "T" } else { "F" }),
            Self::Order(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Match(indices) => {
                let mut seq = serializer.serialize_seq(Some(indices.len()))?;
                for index in indices {
                    seq.serialize_element(index)?;
                }
                seq.end()
            }
        }
    }
}

/// A comprehension activity with Standard and Adapted presentations
/// sharing one answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Stable sequence key: `q1`, `q2`, …
    pub id: String,
    /// Activity category.
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    /// Back-reference to the chunk this activity is about, when chunk-scoped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_id: Option<String>,
    /// Full presentation.
    pub standard: Side,
    /// Supported presentation (subset of options, simplified prompts).
    pub adapted: Side,
    /// The shared answer, valid against both sides.
    pub answer: Answer,
}
