//! Retry history: every countable attempt per (student, modality, range).

use std::collections::HashMap;

use crate::model::{AttemptKey, TestObservation};

/// Accuracy of every countable attempt, keyed by the test identity.
///
/// Built once over the whole feed before any classification, then read
/// immutably. Entries stay in input order; classification only counts
/// them, so order never changes a verdict.
#[derive(Debug, Clone, Default)]
pub struct AttemptHistory {
    attempts: HashMap<AttemptKey, Vec<u32>>,
}

impl AttemptHistory {
    /// Builds the history from every observation in the feed,
    /// record-less ones included.
    pub fn from_observations<'a, I>(observations: I) -> Self
    where
        I: IntoIterator<Item = &'a TestObservation>,
    {
        let mut history = Self::default();
        for obs in observations {
            history.record(obs.key.clone(), obs.accuracy);
        }
        history
    }

    pub fn record(&mut self, key: AttemptKey, accuracy: u32) {
        self.attempts.entry(key).or_default().push(accuracy);
    }

    /// All recorded accuracies for a key; empty when never attempted.
    pub fn accuracies(&self, key: &AttemptKey) -> &[u32] {
        self.attempts.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct keys with at least one attempt.
    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }
}
