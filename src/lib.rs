//! # earshot
//!
//! Deterministic generation of CEFR-leveled ESL listening packs.
//!
//! ## The Problem
//!
//! A listening lesson needs more than a transcript. Learners need the
//! script broken into pieces short enough to hold in working memory,
//! vocabulary anchors to listen for, and comprehension activities — and
//! a classroom needs two versions of every activity (a full "Standard"
//! sheet and a supported "Adapted" sheet) that share **one** answer key,
//! so the teacher grades once.
//!
//! Doing that by hand takes an hour per script. Doing it with a language
//! model requires a language model. This crate does it deterministically:
//! script in, pack out, no I/O, no network, no model.
//!
//! ## The Pipeline
//!
//! ```text
//! raw script
//!     │  segment: punctuation heuristics, newline fallback
//!     ▼
//! sentences
//!     │  chunk: greedy grouping under a per-level character budget,
//!     │         force-slice past the 1.8× ceiling
//!     ▼
//! chunks ──────────────┐
//!     │                │  extract: frequency-ranked anchors per chunk,
//!     │                │           phrasal verbs + collocations corpus-wide
//!     ▼                ▼
//! activity synthesis (gist / detail / true-false / order / match / summary)
//!     │
//!     ▼
//! ListeningPack  ->  handed to HTML / PDF / DOCX renderers
//! ```
//!
//! ## The Shared-Answer Contract
//!
//! Every activity carries a `standard` and an `adapted` presentation and
//! exactly one answer, valid against both. Adapted MCQs show a strict
//! subset of Standard's options (never a relabeling, never missing the
//! correct one), so one key serves both sheets. This invariant is the
//! point of the crate; the property tests in `tests/` pin it.
//!
//! ## Quick Start
//!
//! ```rust
//! use earshot::{generate_pack, Level, PackRequest};
//!
//! let script = "The market opens at dawn. Farmers arrive with crates of fruit. \
//!               By noon the square is full. Music starts near the fountain.";
//!
//! let pack = generate_pack(
//!     &PackRequest::new(Level::B1, script).with_title("Market Day"),
//! ).unwrap();
//!
//! assert!(!pack.chunks.is_empty());
//! assert!(!pack.activities.is_empty());
//! ```
//!
//! ## Determinism
//!
//! The only nondeterminism is the display-order shuffle for ordering and
//! matching items. Inject a [`SeededShuffler`] through [`generate`] for
//! fully reproducible packs:
//!
//! ```rust
//! use earshot::{generate, Level, Lexicon, PackRequest, SeededShuffler};
//!
//! let request = PackRequest::new(Level::B1, "One. Two. Three. Four. Five. Six.");
//! let a = generate(&request, &Lexicon::default(), &mut SeededShuffler::new(7)).unwrap();
//! let b = generate(&request, &Lexicon::default(), &mut SeededShuffler::new(7)).unwrap();
//! assert_eq!(a.activities, b.activities);
//! ```

mod activity;
mod budget;
mod chunker;
mod error;
mod export;
mod level;
mod lexicon;
mod pack;
mod segment;
mod shuffle;
mod synth;

pub use activity::{Activity, ActivityKind, Answer, ChoiceOption, Side};
pub use budget::ChunkBudget;
pub use chunker::{chunk_sentences, Chunk};
pub use error::{Error, Result};
pub use export::{answer_key_lines, inline_json, readable_answer};
pub use level::{Level, LevelProfile, Tier};
pub use lexicon::{tokenize, LexicalPools, Lexicon, ANCHORS_PER_CHUNK};
pub use pack::{generate, generate_pack, AudioMode, AudioTrack, ListeningPack, PackMeta, PackRequest};
pub use segment::{collapse_whitespace, segment_sentences};
pub use shuffle::{SeededShuffler, Shuffler, ThreadShuffler};
pub use synth::{synthesize, ActivityBlock, QuestionFocus};
