//! Core data model types for lexigrade.
//!
//! These are the fundamental types that the rest of the system uses to
//! represent student feed blocks, vocabulary-test attempts, and
//! practice-card sessions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One student's raw segment of the feed, before record extraction.
///
/// Borrows from the input text; blocks are discarded once their records
/// have been extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudentBlock<'a> {
    /// Display name from the block header (text before the first `:`).
    pub name: &'a str,
    /// The whole block, header line included.
    pub body: &'a str,
}

/// Test modality: how the vocabulary was prompted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    /// Audio prompt (descriptor contains the 听测 marker).
    Listening,
    /// Visual prompt (the default when no marker is present).
    Reading,
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modality::Listening => write!(f, "listening"),
            Modality::Reading => write!(f, "reading"),
        }
    }
}

/// Practice-card exam category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardCategory {
    /// Descriptor carries a `[SAT]` tag.
    Sat,
    /// Everything else.
    Toefl,
}

impl fmt::Display for CardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardCategory::Sat => write!(f, "SAT"),
            CardCategory::Toefl => write!(f, "TOEFL"),
        }
    }
}

/// Completion state of a practice card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    Completed,
    InProgress,
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardStatus::Completed => write!(f, "completed"),
            CardStatus::InProgress => write!(f, "in_progress"),
        }
    }
}

/// Identity of a repeatable test: the same student retaking the same
/// range in the same modality produces attempts under one key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttemptKey {
    pub student: String,
    pub modality: Modality,
    /// Range label from the descriptor, e.g. `2601~2700`, a bare
    /// number, or `unknown` when the descriptor carries no number.
    pub range: String,
}

/// One completed vocabulary-test attempt with all result fields present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    pub student: String,
    pub modality: Modality,
    pub range: String,
    /// Number of words tested.
    pub word_count: u32,
    /// Accuracy as an integer percentage.
    pub accuracy: u32,
    /// Mean reaction time in seconds.
    pub reaction_secs: f64,
    pub error_count: u32,
}

impl TestRecord {
    /// The attempt-history key this record belongs to.
    pub fn key(&self) -> AttemptKey {
        AttemptKey {
            student: self.student.clone(),
            modality: self.modality,
            range: self.range.clone(),
        }
    }
}

/// One countable vocabulary-test occurrence.
///
/// Every non-in-progress test with a parseable accuracy is an
/// observation and feeds the retry history. Only observations whose
/// other result fields also parsed carry a full [`TestRecord`]; the
/// rest count toward retry stars but produce no result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestObservation {
    pub key: AttemptKey,
    pub accuracy: u32,
    pub record: Option<TestRecord>,
}

/// One practice-card session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub student: String,
    pub category: CardCategory,
    /// Card title, taken from the descriptor after its bracketed tags.
    pub name: String,
    /// Wrong answers on the first pass.
    pub initial_wrong: u32,
    /// Total questions on the card.
    pub total: u32,
    /// First-pass accuracy percentage. Signed: malformed feeds can
    /// report more wrong answers than questions.
    pub initial_accuracy: i32,
    /// Wrong answers remaining after the correction pass, if one ran.
    #[serde(default)]
    pub corrected_wrong: Option<u32>,
    /// Post-correction accuracy, computed against the initial total.
    #[serde(default)]
    pub corrected_accuracy: Option<i32>,
    pub status: CardStatus,
}

/// Percentage of `total` answered correctly, rounded to an integer.
/// Zero when the card has no questions.
pub fn card_accuracy(wrong: u32, total: u32) -> i32 {
    if total == 0 {
        return 0;
    }
    ((total as f64 - wrong as f64) / total as f64 * 100.0).round() as i32
}
