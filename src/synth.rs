//! Activity synthesis.
//!
//! Turns chunks + lexical pools + configuration into the activity list.
//! Six categories, generated in a fixed order:
//!
//! ```text
//! gist -> detail -> true/false -> ordering -> matching -> summary
//! ```
//!
//! Which categories run is decided once, up front: an explicit block
//! selection strictly gates them; otherwise a (focus, tier) lookup table
//! does. Every category silently produces zero items when its structural
//! precondition fails (too few chunks, level too low) — synthesis never
//! errors, it degrades.
//!
//! ## The shared-answer contract
//!
//! Every MCQ-shaped item is built through one funnel ([`McqBuild`] below):
//! a four-slot letter map with the correct text at a chosen letter and
//! distractors in the rest. Standard exposes all four letters; Adapted
//! exposes the correct letter plus the first `n−1` remaining letters,
//! re-sorted into letter order. Adapted option ids are therefore always a
//! strict subset of Standard's and always include the correct id — which
//! is what lets one answer key serve both sheets.
//!
//! ## Fixed policies, not bugs
//!
//! Several placements are deliberate fixed heuristics carried over from
//! classroom practice rather than randomized:
//!
//! - the first true/false item is always false (when ≥2 chunks exist),
//!   so every set contains at least one F;
//! - the gist answer sits at A for A1 and B otherwise;
//! - the summary answer letter is `(chunk_count + 1) % 4`;
//! - detail answers cycle A,B,C,D by item index.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::activity::{Activity, ActivityKind, Answer, ChoiceOption, Side};
use crate::chunker::Chunk;
use crate::lexicon::LexicalPools;
use crate::level::{Level, Tier};
use crate::segment::collapse_whitespace;
use crate::shuffle::Shuffler;

const LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Question-focus preset steering category selection when no explicit
/// blocks are given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionFocus {
    /// A spread across comprehension skills.
    #[default]
    Balanced,
    /// Factual who/what/where retrieval.
    WhoWhatWhere,
    /// Vocabulary and phrasal language.
    VocabPhrases,
    /// Discourse structure and sequencing.
    TextStructure,
    /// Exam-format coverage.
    ExamStyle,
}

/// An activity category that can be switched on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityBlock {
    /// Main-idea MCQ.
    Gist,
    /// Per-chunk detail MCQs.
    Detail,
    /// True/false statements.
    TrueFalse,
    /// Sequence-ordering task.
    Ordering,
    /// Term-to-part matching task.
    Matching,
    /// Best-summary MCQ.
    Summary,
}

impl ActivityBlock {
    /// All blocks, in generation order.
    pub const ALL: [Self; 6] = [
        Self::Gist,
        Self::Detail,
        Self::TrueFalse,
        Self::Ordering,
        Self::Matching,
        Self::Summary,
    ];
}

/// The fixed (focus, tier) category table.
///
/// Rows were tuned for classroom balance: low tiers drop the tasks that
/// presuppose holding multi-part structure in memory, vocab focus leans
/// on matching, structure focus leans on ordering and summary.
fn blocks_for(focus: QuestionFocus, tier: Tier) -> &'static [ActivityBlock] {
    use ActivityBlock::{Detail, Gist, Matching, Ordering, Summary, TrueFalse};
    match (focus, tier) {
        (QuestionFocus::Balanced, Tier::Low) | (QuestionFocus::ExamStyle, Tier::Low) => {
            &[Gist, Detail, TrueFalse]
        }
        (QuestionFocus::Balanced, Tier::Mid) => &[Gist, Detail, TrueFalse, Ordering],
        (QuestionFocus::Balanced | QuestionFocus::ExamStyle, Tier::High) => &ActivityBlock::ALL,
        (QuestionFocus::WhoWhatWhere, Tier::Low) => &[Detail, TrueFalse],
        (QuestionFocus::WhoWhatWhere, Tier::Mid) => &[Detail, TrueFalse, Matching],
        (QuestionFocus::WhoWhatWhere, Tier::High) => &[Detail, TrueFalse, Ordering, Matching],
        (QuestionFocus::VocabPhrases, Tier::Low) => &[Detail, Matching],
        (QuestionFocus::VocabPhrases, Tier::Mid) => &[Gist, Detail, Matching],
        (QuestionFocus::VocabPhrases, Tier::High) => &[Gist, Detail, Matching, Summary],
        (QuestionFocus::TextStructure, Tier::Low) => &[TrueFalse, Ordering],
        (QuestionFocus::TextStructure, Tier::Mid) => &[TrueFalse, Ordering, Summary],
        (QuestionFocus::TextStructure, Tier::High) => &[TrueFalse, Ordering, Matching, Summary],
        (QuestionFocus::ExamStyle, Tier::Mid) => &[Gist, Detail, TrueFalse, Summary],
    }
}

/// Synthesize the activity list for one pack.
///
/// `selected` strictly gates categories when present; otherwise the
/// (focus, tier) table decides. Never fails; structurally impossible
/// categories yield zero items.
pub fn synthesize(
    chunks: &[Chunk],
    pools: &LexicalPools,
    level: Level,
    focus: QuestionFocus,
    selected: Option<&[ActivityBlock]>,
    shuffler: &mut dyn Shuffler,
) -> Vec<Activity> {
    if chunks.is_empty() {
        return Vec::new();
    }

    let enabled: Vec<ActivityBlock> = match selected {
        Some(blocks) => ActivityBlock::ALL
            .into_iter()
            .filter(|block| blocks.contains(block))
            .collect(),
        None => blocks_for(focus, level.tier()).to_vec(),
    };

    let mut synth = Synthesizer {
        chunks,
        pools,
        level,
        shuffler,
        out: Vec::new(),
    };

    for block in &enabled {
        match block {
            ActivityBlock::Gist => synth.gist(),
            ActivityBlock::Detail => synth.detail(),
            ActivityBlock::TrueFalse => synth.true_false(),
            ActivityBlock::Ordering => synth.ordering(),
            ActivityBlock::Matching => synth.matching(),
            ActivityBlock::Summary => synth.summary(),
        }
    }

    debug!(
        chunk_count = chunks.len(),
        enabled = enabled.len(),
        activities = synth.out.len(),
        %level,
        "synthesized activities"
    );
    synth.out
}

struct Synthesizer<'a> {
    chunks: &'a [Chunk],
    pools: &'a LexicalPools,
    level: Level,
    shuffler: &'a mut dyn Shuffler,
    out: Vec<Activity>,
}

impl Synthesizer<'_> {
    fn next_id(&self) -> String {
        format!("q{}", self.out.len() + 1)
    }

    /// The "key fact" of chunk `i`: a pool phrase appearing verbatim in
    /// the chunk (B1+ only), else the chunk's top anchor, else a cleaned
    /// snippet of its text.
    fn chunk_key(&self, i: usize) -> String {
        if self.level >= Level::B1 {
            let lowered = self.chunks[i].text.to_lowercase();
            if let Some(phrase) = self
                .pools
                .phrase_pool
                .iter()
                .find(|phrase| lowered.contains(phrase.as_str()))
            {
                return phrase.clone();
            }
        }
        self.pools
            .chunk_anchors
            .get(i)
            .and_then(|anchors| anchors.first().cloned())
            .unwrap_or_else(|| clean_snippet(&self.chunks[i].text, 60))
    }

    /// Build Standard and Adapted MCQ sides plus the shared answer.
    fn mcq(&mut self, build: McqBuild) -> (Side, Side, Answer) {
        let McqBuild {
            standard_prompt,
            adapted_prompt,
            correct_letter,
            correct_text,
            distractors,
            adapted_count,
        } = build;

        // Deduplicated distractor queue, correct text excluded.
        let mut pool: Vec<String> = Vec::new();
        for candidate in distractors {
            let candidate = collapse_whitespace(&candidate);
            if candidate.is_empty()
                || candidate.eq_ignore_ascii_case(&correct_text)
                || pool.iter().any(|seen| seen.eq_ignore_ascii_case(&candidate))
            {
                continue;
            }
            pool.push(candidate);
        }
        let mut pool = pool.into_iter();

        let standard_options: Vec<ChoiceOption> = LETTERS
            .iter()
            .enumerate()
            .map(|(slot, &letter)| {
                let text = if letter == correct_letter {
                    correct_text.clone()
                } else {
                    pool.next().unwrap_or_else(|| format!("Option {}", slot + 1))
                };
                ChoiceOption::new(letter.to_string(), text)
            })
            .collect();

        // Adapted: correct letter + the first (n-1) other letters, shown
        // in letter order. A strict id-subset of Standard.
        let adapted_count = adapted_count.clamp(2, LETTERS.len());
        let mut keep: Vec<char> = vec![correct_letter];
        keep.extend(
            LETTERS
                .iter()
                .copied()
                .filter(|&letter| letter != correct_letter)
                .take(adapted_count - 1),
        );
        keep.sort_unstable();
        let adapted_options: Vec<ChoiceOption> = standard_options
            .iter()
            .filter(|option| keep.iter().any(|&letter| option.id == letter.to_string()))
            .cloned()
            .collect();

        (
            Side::choices(standard_prompt, standard_options),
            Side::choices(adapted_prompt, adapted_options),
            Answer::Letter(correct_letter),
        )
    }

    fn push(&mut self, kind: ActivityKind, chunk_id: Option<String>, sides: (Side, Side, Answer)) {
        let (standard, adapted, answer) = sides;
        self.out.push(Activity {
            id: self.next_id(),
            kind,
            chunk_id,
            standard,
            adapted,
            answer,
        });
    }

    fn gist(&mut self) {
        let topic = if self.pools.anchor_pool.is_empty() {
            clean_snippet(&self.chunks[0].text, 60)
        } else {
            self.pools
                .anchor_pool
                .iter()
                .take(3)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        };

        let correct_letter = if self.level == Level::A1 { 'A' } else { 'B' };
        let sides = self.mcq(McqBuild {
            standard_prompt: "What is this listening mainly about?".to_string(),
            adapted_prompt: "What is it mostly about?".to_string(),
            correct_letter,
            correct_text: format!("Mainly about: {topic}"),
            distractors: vec![
                "A step-by-step cooking recipe".to_string(),
                "A weather forecast for next week".to_string(),
                "An advertisement for a new product".to_string(),
            ],
            adapted_count: self.level.profile().adapted_options,
        });
        self.push(ActivityKind::GistMcq, None, sides);
    }

    fn detail(&mut self) {
        let count = self.level.profile().max_detail.min(self.chunks.len());
        let keys: Vec<String> = (0..self.chunks.len()).map(|i| self.chunk_key(i)).collect();

        for i in 0..count {
            let correct = keys[i].clone();
            let mut distractors: Vec<String> = keys
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, key)| key.clone())
                .collect();
            distractors.extend(self.pools.anchor_pool.iter().cloned());
            distractors.extend(self.pools.phrase_pool.iter().cloned());
            distractors.extend(["a date", "a place", "a name"].map(String::from));

            let label = self.chunks[i].label.clone();
            let chunk_id = self.chunks[i].id.clone();
            let sides = self.mcq(McqBuild {
                standard_prompt: format!("Which of these is mentioned in {label}?"),
                adapted_prompt: format!("{label}: what do you hear about?"),
                correct_letter: LETTERS[i % 4],
                correct_text: correct,
                distractors,
                adapted_count: self.level.profile().adapted_options,
            });
            self.push(ActivityKind::DetailMcq, Some(chunk_id), sides);
        }
    }

    fn true_false(&mut self) {
        let count = self.chunks.len().min(3);
        for i in 0..count {
            // First item is deliberately false when the script has parts
            // to confuse: it attributes the next part's fact to this one.
            let (statement, verdict) = if i == 0 && self.chunks.len() >= 2 {
                (
                    format!(
                        "In {}, you hear about {}.",
                        self.chunks[0].label,
                        self.chunk_key(1)
                    ),
                    false,
                )
            } else {
                (
                    format!(
                        "In {}, you hear about {}.",
                        self.chunks[i].label,
                        self.chunk_key(i)
                    ),
                    true,
                )
            };

            let tf_options = || {
                vec![
                    ChoiceOption::new("T", "True"),
                    ChoiceOption::new("F", "False"),
                ]
            };
            let standard = Side::choices(
                format!("True or false: {statement}"),
                tf_options(),
            );
            let adapted = Side::choices(format!("{statement} True or false?"), tf_options());
            let chunk_id = self.chunks[i].id.clone();
            self.push(
                ActivityKind::DetailTf,
                Some(chunk_id),
                (standard, adapted, Answer::TrueFalse(verdict)),
            );
        }
    }

    fn ordering(&mut self) {
        if self.chunks.len() < 3 || self.level < Level::A2 {
            return;
        }
        let in_order: Vec<String> = self.chunks.iter().map(|c| c.label.clone()).collect();
        let mut display = in_order.clone();
        self.shuffler.shuffle(&mut display);

        let standard = Side::ordering(
            "Put the parts in the order you hear them.",
            display.clone(),
        );
        let adapted = Side::ordering(
            "Put the parts in order. Tip: listen for what happens first.",
            display,
        );
        self.push(
            ActivityKind::Order,
            None,
            (standard, adapted, Answer::Order(in_order)),
        );
    }

    fn matching(&mut self) {
        if self.chunks.len() < 3 {
            return;
        }
        let mut pairs: Vec<(String, String)> = Vec::new();
        for (i, chunk) in self.chunks.iter().enumerate() {
            let term = self
                .pools
                .chunk_anchors
                .get(i)
                .and_then(|anchors| anchors.first().cloned())
                .unwrap_or_else(|| self.chunk_key(i));
            if pairs.iter().any(|(seen, _)| seen == &term) {
                continue;
            }
            pairs.push((term, chunk.label.clone()));
            if pairs.len() == 4 {
                break;
            }
        }
        if pairs.len() < 3 {
            return;
        }

        let left: Vec<String> = pairs.iter().map(|(term, _)| term.clone()).collect();
        let mut right: Vec<String> = pairs.iter().map(|(_, label)| label.clone()).collect();
        self.shuffler.shuffle(&mut right);
        let answer: Vec<usize> = pairs
            .iter()
            .map(|(_, label)| {
                // The label came from `pairs`, so it is always present.
                right.iter().position(|r| r == label).unwrap_or(0)
            })
            .collect();

        let standard = Side::matching(
            "Match each key word to the part where you hear it.",
            left.clone(),
            right.clone(),
        );
        let adapted = Side::matching("Match the word to its part.", left, right);
        self.push(
            ActivityKind::Match,
            None,
            (standard, adapted, Answer::Match(answer)),
        );
    }

    fn summary(&mut self) {
        if self.level < Level::A2 {
            return;
        }
        let combined = self
            .chunks
            .iter()
            .map(|chunk| chunk.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let correct = format!("Best summary: {}", clean_snippet(&combined, 160));

        let sides = self.mcq(McqBuild {
            standard_prompt: "Which option is the best summary of the listening?".to_string(),
            adapted_prompt: "Pick the best summary.".to_string(),
            correct_letter: LETTERS[(self.chunks.len() + 1) % 4],
            correct_text: correct,
            distractors: vec![
                "A summary of a completely different story".to_string(),
                "A list of unrelated announcements".to_string(),
                "A description of the speakers, not the content".to_string(),
            ],
            adapted_count: self.level.profile().adapted_options,
        });
        self.push(ActivityKind::SummaryMcq, None, sides);
    }
}

/// Inputs for one MCQ-shaped item.
struct McqBuild {
    standard_prompt: String,
    adapted_prompt: String,
    correct_letter: char,
    correct_text: String,
    distractors: Vec<String>,
    adapted_count: usize,
}

/// Whitespace-normalize and cap at `cap` characters, appending an
/// ellipsis when truncated.
fn clean_snippet(text: &str, cap: usize) -> String {
    let cleaned = collapse_whitespace(text);
    if cleaned.chars().count() <= cap {
        return cleaned;
    }
    let mut cut: String = cleaned.chars().take(cap).collect();
    cut.push('…');
    cut
}
