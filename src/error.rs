//! Error types for earshot.

/// Errors that can occur during pack generation or export.
///
/// The generator itself has exactly one failure mode: an empty script.
/// Every structural shortfall downstream (too few chunks for an ordering
/// item, an exhausted distractor pool) degrades to fewer activities
/// instead of erroring.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The script is empty after trimming. There is nothing to chunk.
    #[error("script is empty after trimming")]
    EmptyScript,

    /// Pack serialization failed while preparing renderer output.
    #[error("pack serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for earshot operations.
pub type Result<T> = std::result::Result<T, Error>;
