//! Pack assembly: the `ListeningPack` aggregate and the generation
//! entry point.
//!
//! The pipeline, end to end:
//!
//! ```text
//! script ──segment──> sentences ──chunk──> chunk texts
//!                                             │
//!                          ┌──────────────────┤
//!                          ▼                  ▼
//!                   lexical pools      Chunk structs
//!                          │                  │
//!                          └────synthesize────┘
//!                                   │
//!                                   ▼
//!                             ListeningPack
//! ```
//!
//! The pack is the single artifact handed to rendering collaborators
//! (HTML exporter, PDF/DOCX builders). It is created once here and never
//! mutated downstream. A remote LLM-backed service may produce a pack of
//! the identical shape; this local generator is the deterministic
//! fallback, so renderers stay agnostic to the source.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::activity::Activity;
use crate::chunker::{chunk_sentences, Chunk};
use crate::error::{Error, Result};
use crate::level::Level;
use crate::lexicon::{LexicalPools, Lexicon};
use crate::segment::segment_sentences;
use crate::shuffle::{Shuffler, ThreadShuffler};
use crate::synth::{synthesize, ActivityBlock, QuestionFocus};
use crate::ChunkBudget;

/// Fallback pack title when none is supplied.
const DEFAULT_TITLE: &str = "Listening Focus";

/// How the audio for a pack is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioMode {
    /// Synthesized speech from the transcript.
    #[default]
    Tts,
    /// A pre-recorded file at `AudioTrack::url`.
    Url,
    /// Teacher reads the script aloud; no audio asset.
    None,
}

/// Audio configuration attached to a pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioTrack {
    /// How the audio is produced.
    pub mode: AudioMode,
    /// Preferred voice for TTS renderers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_hint: Option<String>,
    /// Location of a pre-recorded file, for [`AudioMode::Url`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Playback rate; 1.0 is natural speed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
}

/// Pack-level metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackMeta {
    /// Display title; defaults to "Listening Focus".
    pub title: String,
    /// CEFR level the pack was tuned for.
    pub level: Level,
    /// Optional genre tag (news report, dialogue, announcement, …).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_type: Option<String>,
    /// Optional topic tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Generation timestamp, RFC 3339 UTC.
    #[serde(rename = "createdAtISO")]
    pub created_at_iso: String,
}

/// A complete listening pack: chunks, activities, and metadata.
///
/// The root aggregate. Owns its chunks and activities; read-only after
/// assembly.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListeningPack {
    /// Pack-level metadata.
    pub meta: PackMeta,
    /// Audio configuration.
    pub audio: AudioTrack,
    /// The script, partitioned into listening units.
    pub chunks: Vec<Chunk>,
    /// Comprehension activities over those chunks.
    pub activities: Vec<Activity>,
}

/// Inputs for one generation call.
///
/// ```rust
/// use earshot::{generate_pack, Level, PackRequest};
///
/// let request = PackRequest::new(Level::B1, "The tide rose quickly. Fishermen hauled their nets early.")
///     .with_title("Harbour Morning");
/// let pack = generate_pack(&request).unwrap();
/// assert!(!pack.chunks.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct PackRequest {
    /// Display title; empty falls back to "Listening Focus".
    pub title: String,
    /// CEFR level.
    pub level: Level,
    /// Optional genre tag.
    pub text_type: Option<String>,
    /// Optional topic tag.
    pub topic: Option<String>,
    /// The raw script.
    pub script: String,
    /// Audio production mode.
    pub audio_mode: AudioMode,
    /// Audio file location for [`AudioMode::Url`].
    pub audio_url: Option<String>,
    /// Preferred TTS voice.
    pub voice_hint: Option<String>,
    /// Question-focus preset, used when `selected_blocks` is `None`.
    pub question_focus: QuestionFocus,
    /// Explicit activity-category gate; overrides the focus preset.
    pub selected_blocks: Option<Vec<ActivityBlock>>,
}

impl PackRequest {
    /// A request with defaults: TTS audio, balanced focus, no explicit blocks.
    #[must_use]
    pub fn new(level: Level, script: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            level,
            text_type: None,
            topic: None,
            script: script.into(),
            audio_mode: AudioMode::default(),
            audio_url: None,
            voice_hint: None,
            question_focus: QuestionFocus::default(),
            selected_blocks: None,
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the question-focus preset.
    #[must_use]
    pub fn with_focus(mut self, focus: QuestionFocus) -> Self {
        self.question_focus = focus;
        self
    }

    /// Gate generation to exactly these activity categories.
    #[must_use]
    pub fn with_blocks(mut self, blocks: Vec<ActivityBlock>) -> Self {
        self.selected_blocks = Some(blocks);
        self
    }
}

/// Generate a pack with explicit collaborators.
///
/// Pure and synchronous: script in, pack out. Inject a
/// [`SeededShuffler`](crate::SeededShuffler) for reproducible output.
///
/// # Errors
///
/// [`Error::EmptyScript`] when the script is empty after trimming — the
/// single input-validation boundary. Everything downstream degrades to
/// fewer activities instead of failing.
pub fn generate(
    request: &PackRequest,
    lexicon: &Lexicon,
    shuffler: &mut dyn Shuffler,
) -> Result<ListeningPack> {
    let script = request.script.trim();
    if script.is_empty() {
        return Err(Error::EmptyScript);
    }

    let budget = ChunkBudget::new(request.level.profile().chunk_budget);
    let sentences = segment_sentences(script);
    let chunk_texts = chunk_sentences(&sentences, budget);
    let pools = LexicalPools::extract(lexicon, &chunk_texts, script);

    let chunks: Vec<Chunk> = chunk_texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let mut chunk = Chunk::new(i, text);
            chunk.anchors = pools.chunk_anchors.get(i).cloned().unwrap_or_default();
            chunk
        })
        .collect();

    debug!(
        level = %request.level,
        sentences = sentences.len(),
        chunks = chunks.len(),
        anchors = pools.anchor_pool.len(),
        phrases = pools.phrase_pool.len(),
        "chunked script"
    );

    let activities = synthesize(
        &chunks,
        &pools,
        request.level,
        request.question_focus,
        request.selected_blocks.as_deref(),
        shuffler,
    );

    let title = if request.title.trim().is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        request.title.trim().to_string()
    };

    Ok(ListeningPack {
        meta: PackMeta {
            title,
            level: request.level,
            text_type: request.text_type.clone(),
            topic: request.topic.clone(),
            created_at_iso: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        },
        audio: AudioTrack {
            mode: request.audio_mode,
            voice_hint: request.voice_hint.clone(),
            url: request.audio_url.clone(),
            rate: match request.audio_mode {
                AudioMode::Tts => Some(1.0),
                _ => None,
            },
        },
        chunks,
        activities,
    })
}

/// Generate a pack with the default lexicon and thread-RNG shuffling.
///
/// # Errors
///
/// [`Error::EmptyScript`] when the script is empty after trimming.
pub fn generate_pack(request: &PackRequest) -> Result<ListeningPack> {
    generate(request, &Lexicon::default(), &mut ThreadShuffler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shuffle::SeededShuffler;

    #[test]
    fn test_empty_script_is_the_only_error() {
        assert!(matches!(
            generate_pack(&PackRequest::new(Level::A1, "   \n  ")),
            Err(Error::EmptyScript)
        ));
    }

    #[test]
    fn test_title_fallback() {
        let pack = generate_pack(&PackRequest::new(Level::A2, "A short line.")).unwrap();
        assert_eq!(pack.meta.title, "Listening Focus");

        let titled =
            generate_pack(&PackRequest::new(Level::A2, "A short line.").with_title("  Tides  "))
                .unwrap();
        assert_eq!(titled.meta.title, "Tides");
    }

    #[test]
    fn test_chunks_carry_ids_labels_anchors() {
        let script = "The harbour closed for repairs. The harbour reopened in spring. \
                      Tourists returned with the ferries. Local shops doubled their orders.";
        let pack = generate_pack(&PackRequest::new(Level::A1, script)).unwrap();
        assert!(!pack.chunks.is_empty());
        assert_eq!(pack.chunks[0].id, "c1");
        assert_eq!(pack.chunks[0].label, "Part 1");
        assert!(pack.chunks[0].anchors.len() <= 5);
        assert!(pack.chunks[0].anchors.contains(&"harbour".to_string()));
    }

    #[test]
    fn test_tts_rate_defaults_to_natural() {
        let pack = generate_pack(&PackRequest::new(Level::B1, "One line here.")).unwrap();
        assert_eq!(pack.audio.mode, AudioMode::Tts);
        assert_eq!(pack.audio.rate, Some(1.0));
    }

    #[test]
    fn test_chunk_back_references_resolve() {
        let script = "First part talks about trains. Second part talks about stations. \
                      Third part talks about tickets and delays on the line.";
        let pack = generate_pack(&PackRequest::new(Level::B1, script)).unwrap();
        for activity in &pack.activities {
            if let Some(chunk_id) = &activity.chunk_id {
                assert!(pack.chunks.iter().any(|c| &c.id == chunk_id));
            }
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let script = "Dawn broke over the valley. Climbers checked their ropes carefully. \
                      The guide counted heads twice. Snow started falling near the ridge. \
                      Everyone reached the shelter before dark.";
        let request = PackRequest::new(Level::B2, script);
        let lexicon = Lexicon::default();

        let first = generate(&request, &lexicon, &mut SeededShuffler::new(5)).unwrap();
        let second = generate(&request, &lexicon, &mut SeededShuffler::new(5)).unwrap();

        assert_eq!(first.chunks, second.chunks);
        assert_eq!(first.activities, second.activities);
    }

    #[test]
    fn test_timestamp_is_rfc3339_utc() {
        let pack = generate_pack(&PackRequest::new(Level::A1, "Hello there.")).unwrap();
        assert!(pack.meta.created_at_iso.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&pack.meta.created_at_iso).is_ok());
    }
}
