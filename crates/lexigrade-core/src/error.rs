//! Non-fatal scan problems: skip reasons, warnings, and counters.
//!
//! Hand-copied feeds are noisy, so the scanner never aborts; every
//! malformed fragment is dropped, counted, and reported here instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a fragment of the feed was dropped during scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The block has no `name :` header to attribute records to.
    #[error("no student header before the first colon")]
    MissingHeader,
    /// A vocabulary test was missing one of its result fields.
    #[error("vocabulary test missing result fields")]
    IncompleteTest,
    /// A practice card was missing its wrong/total counts.
    #[error("practice card missing error counts")]
    IncompleteCard,
}

/// A non-fatal problem found while scanning a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Position of the block in the feed, starting at 1.
    pub block: usize,
    /// Student the fragment belonged to, when the header was readable.
    pub student: Option<String>,
    pub reason: SkipReason,
}

/// Counters describing what a scan kept and what it dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanDiagnostics {
    pub blocks_seen: usize,
    pub blocks_dropped: usize,
    /// Vocabulary-test occurrences, in-progress ones included.
    pub tests_seen: usize,
    /// Tests skipped because they were still running.
    pub tests_in_progress: usize,
    /// Tests that did not yield a full record.
    pub tests_dropped: usize,
    pub cards_seen: usize,
    pub cards_dropped: usize,
    pub warnings: Vec<ScanWarning>,
}

impl ScanDiagnostics {
    /// True when nothing was dropped. In-progress tests are expected
    /// platform output and do not count against cleanliness.
    pub fn is_clean(&self) -> bool {
        self.blocks_dropped == 0 && self.tests_dropped == 0 && self.cards_dropped == 0
    }

    pub(crate) fn warn(&mut self, block: usize, student: Option<&str>, reason: SkipReason) {
        self.warnings.push(ScanWarning {
            block,
            student: student.map(str::to_owned),
            reason,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_reason_messages() {
        assert_eq!(
            SkipReason::MissingHeader.to_string(),
            "no student header before the first colon"
        );
        assert_eq!(
            SkipReason::IncompleteCard.to_string(),
            "practice card missing error counts"
        );
    }

    #[test]
    fn fresh_diagnostics_are_clean() {
        let diag = ScanDiagnostics::default();
        assert!(diag.is_clean());
        assert!(diag.warnings.is_empty());
    }

    #[test]
    fn in_progress_tests_do_not_dirty_the_scan() {
        let diag = ScanDiagnostics {
            blocks_seen: 2,
            tests_seen: 3,
            tests_in_progress: 3,
            ..Default::default()
        };
        assert!(diag.is_clean());
    }

    #[test]
    fn drops_dirty_the_scan() {
        let mut diag = ScanDiagnostics::default();
        diag.blocks_dropped = 1;
        diag.warn(1, None, SkipReason::MissingHeader);
        assert!(!diag.is_clean());
        assert_eq!(diag.warnings[0].block, 1);
        assert_eq!(diag.warnings[0].reason, SkipReason::MissingHeader);
    }
}
