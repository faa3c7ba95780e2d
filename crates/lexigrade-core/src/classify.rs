//! Pass/fail classification with retry-aware failure counting.

use serde::{Deserialize, Serialize};

use crate::history::AttemptHistory;
use crate::model::TestRecord;

/// A test record with its verdict and retry annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedTest {
    pub record: TestRecord,
    /// True when accuracy met the threshold.
    pub passed: bool,
    /// Failed attempts on the same key other than this one.
    pub prior_failures: u32,
}

impl ClassifiedTest {
    /// Accuracy with one `*` per prior failure, e.g. `96%*`.
    pub fn accuracy_display(&self) -> String {
        format!(
            "{}%{}",
            self.record.accuracy,
            "*".repeat(self.prior_failures as usize)
        )
    }
}

/// Classifies one record against the threshold, counting its prior
/// failures from the key's full history.
///
/// The history includes the current attempt itself, so when this
/// attempt is below the threshold its own entry is discounted; a
/// passing attempt never contributed to the failure count, so nothing
/// is subtracted. The count covers every other failure on the key, not
/// just the ones earlier in the feed.
pub fn classify(history: &AttemptHistory, record: TestRecord, threshold: u32) -> ClassifiedTest {
    let attempts = history.accuracies(&record.key());
    let failures = attempts.iter().filter(|&&a| a < threshold).count() as u32;
    let prior_failures = if record.accuracy < threshold {
        failures.saturating_sub(1)
    } else {
        failures
    };

    ClassifiedTest {
        passed: record.accuracy >= threshold,
        prior_failures,
        record,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttemptKey, Modality};

    fn record(accuracy: u32) -> TestRecord {
        TestRecord {
            student: "小明".into(),
            modality: Modality::Reading,
            range: "2601~2700".into(),
            word_count: 100,
            accuracy,
            reaction_secs: 2.0,
            error_count: 100 - accuracy,
        }
    }

    fn history_of(accuracies: &[u32]) -> AttemptHistory {
        let mut history = AttemptHistory::default();
        for &a in accuracies {
            history.record(record(a).key(), a);
        }
        history
    }

    #[test]
    fn fail_then_pass_earns_one_star() {
        let history = history_of(&[90, 96]);

        let first = classify(&history, record(90), 94);
        assert!(!first.passed);
        assert_eq!(first.prior_failures, 0);
        assert_eq!(first.accuracy_display(), "90%");

        let second = classify(&history, record(96), 94);
        assert!(second.passed);
        assert_eq!(second.prior_failures, 1);
        assert_eq!(second.accuracy_display(), "96%*");
    }

    #[test]
    fn duplicate_failures_discount_only_themselves() {
        // Two identical failing attempts: each sees the other.
        let history = history_of(&[90, 90]);
        let classified = classify(&history, record(90), 94);
        assert!(!classified.passed);
        assert_eq!(classified.prior_failures, 1);
        assert_eq!(classified.accuracy_display(), "90%*");
    }

    #[test]
    fn passing_attempt_counts_all_failures() {
        let history = history_of(&[80, 85, 96]);
        let classified = classify(&history, record(96), 94);
        assert!(classified.passed);
        assert_eq!(classified.prior_failures, 2);
        assert_eq!(classified.accuracy_display(), "96%**");
    }

    #[test]
    fn lone_failure_never_goes_negative() {
        let history = history_of(&[50]);
        let classified = classify(&history, record(50), 94);
        assert_eq!(classified.prior_failures, 0);
    }

    #[test]
    fn threshold_boundary_is_a_pass() {
        let history = history_of(&[94]);
        let classified = classify(&history, record(94), 94);
        assert!(classified.passed);
        assert_eq!(classified.prior_failures, 0);
    }

    #[test]
    fn raising_the_threshold_only_adds_failures() {
        let history = history_of(&[90, 93, 96]);
        for (threshold, expect_pass, expect_stars) in
            [(90, true, 0), (94, false, 1), (97, false, 2)]
        {
            let classified = classify(&history, record(93), threshold);
            assert_eq!(classified.passed, expect_pass, "threshold {threshold}");
            assert_eq!(
                classified.prior_failures, expect_stars,
                "threshold {threshold}"
            );
        }
    }

    #[test]
    fn other_keys_never_leak_into_the_count() {
        let mut history = history_of(&[96]);
        history.record(
            AttemptKey {
                student: "李雷".into(),
                modality: Modality::Reading,
                range: "2601~2700".into(),
            },
            10,
        );
        let classified = classify(&history, record(96), 94);
        assert_eq!(classified.prior_failures, 0);
    }
}
