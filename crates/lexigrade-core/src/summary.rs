//! Per-student result assembly and whole-feed totals.

use serde::{Deserialize, Serialize};

use crate::classify::ClassifiedTest;
use crate::model::{CardCategory, CardRecord};

/// One student's classified results, assembled per feed block.
///
/// A student pasted twice with a blank line between the copies shows
/// up as two summaries; the retry history still joins across them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentSummary {
    pub name: String,
    pub passed: Vec<ClassifiedTest>,
    pub failed: Vec<ClassifiedTest>,
    pub sat_cards: Vec<CardRecord>,
    pub toefl_cards: Vec<CardRecord>,
}

impl StudentSummary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: Vec::new(),
            failed: Vec::new(),
            sat_cards: Vec::new(),
            toefl_cards: Vec::new(),
        }
    }

    pub fn add_card(&mut self, card: CardRecord) {
        match card.category {
            CardCategory::Sat => self.sat_cards.push(card),
            CardCategory::Toefl => self.toefl_cards.push(card),
        }
    }

    /// Every classified test, passed first, as exports list them.
    pub fn tests(&self) -> impl Iterator<Item = &ClassifiedTest> {
        self.passed.iter().chain(self.failed.iter())
    }

    /// Whether this student belongs in the result set. Failed tests
    /// only qualify a student when failures are being shown; cards
    /// always qualify.
    pub fn qualifies(&self, show_failed: bool) -> bool {
        !self.passed.is_empty()
            || (show_failed && !self.failed.is_empty())
            || !self.sat_cards.is_empty()
            || !self.toefl_cards.is_empty()
    }
}

/// Aggregates over the final result set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisTotals {
    pub students: usize,
    pub tests_passed: usize,
    pub tests_failed: usize,
    /// Share of classified tests that passed, as a percentage.
    pub pass_rate: f64,
    /// Mean accuracy over all classified tests, as a percentage.
    pub mean_accuracy: f64,
    pub sat_cards: usize,
    pub toefl_cards: usize,
}

/// Computes totals over the students that made it into the result set.
pub fn totals(students: &[StudentSummary]) -> AnalysisTotals {
    let tests_passed: usize = students.iter().map(|s| s.passed.len()).sum();
    let tests_failed: usize = students.iter().map(|s| s.failed.len()).sum();
    let classified = tests_passed + tests_failed;

    let pass_rate = if classified == 0 {
        0.0
    } else {
        tests_passed as f64 / classified as f64 * 100.0
    };
    let mean_accuracy = if classified == 0 {
        0.0
    } else {
        students
            .iter()
            .flat_map(|s| s.tests())
            .map(|t| t.record.accuracy as f64)
            .sum::<f64>()
            / classified as f64
    };

    AnalysisTotals {
        students: students.len(),
        tests_passed,
        tests_failed,
        pass_rate,
        mean_accuracy,
        sat_cards: students.iter().map(|s| s.sat_cards.len()).sum(),
        toefl_cards: students.iter().map(|s| s.toefl_cards.len()).sum(),
    }
}
