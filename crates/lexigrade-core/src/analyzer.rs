//! The analysis pipeline: scan, build history, classify, summarize.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classify;
use crate::history::AttemptHistory;
use crate::parser;
use crate::report::AnalysisReport;
use crate::summary::{self, StudentSummary};

/// Lowest selectable pass threshold, in percent.
pub const MIN_THRESHOLD: u32 = 85;
/// Highest selectable pass threshold, in percent.
pub const MAX_THRESHOLD: u32 = 100;
/// Default pass threshold, in percent.
pub const DEFAULT_THRESHOLD: u32 = 94;

/// Knobs for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeOptions {
    /// Accuracy (percent) a test needs to count as passed.
    #[serde(default = "default_threshold")]
    pub threshold: u32,
    /// Whether failed tests alone qualify a student for the result set.
    #[serde(default)]
    pub show_failed: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            show_failed: false,
        }
    }
}

fn default_threshold() -> u32 {
    DEFAULT_THRESHOLD
}

/// Runs the whole pipeline over a pasted feed.
///
/// History is built over every countable attempt in the feed before
/// any classification, so retry stars are correct even when the
/// attempts sit in different blocks or in blocks that end up filtered
/// out of the result set.
pub fn analyze(input: &str, options: &AnalyzeOptions) -> AnalysisReport {
    let outcome = parser::scan_feed(input);
    let history = AttemptHistory::from_observations(outcome.observations());
    debug!(
        blocks = outcome.blocks.len(),
        keys = history.len(),
        "feed scan complete"
    );

    let mut students = Vec::new();
    for block in outcome.blocks {
        let mut summary = StudentSummary::new(block.student);
        for obs in block.observations {
            if let Some(record) = obs.record {
                let classified = classify::classify(&history, record, options.threshold);
                if classified.passed {
                    summary.passed.push(classified);
                } else {
                    summary.failed.push(classified);
                }
            }
        }
        for card in block.cards {
            summary.add_card(card);
        }
        if summary.qualifies(options.show_failed) {
            students.push(summary);
        }
    }

    let totals = summary::totals(&students);
    info!(
        students = totals.students,
        passed = totals.tests_passed,
        failed = totals.tests_failed,
        "analysis complete"
    );
    AnalysisReport::new(options.clone(), students, totals, outcome.diagnostics)
}
