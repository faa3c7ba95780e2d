//! Markdown digest of a report, shaped for pasting into a group chat.

use std::fmt::Write;

use lexigrade_core::classify::ClassifiedTest;
use lexigrade_core::model::CardRecord;
use lexigrade_core::report::AnalysisReport;

/// Builds the digest: per-student sections in feed order, then totals.
/// Failed-test tables appear only when the report was run with
/// `show_failed`, matching the terminal view.
pub fn build_markdown(report: &AnalysisReport) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Vocabulary Test Analysis");
    let _ = writeln!(
        output,
        "Generated {} with a {}% pass threshold.",
        report.created_at.format("%Y-%m-%d %H:%M UTC"),
        report.options.threshold
    );
    let _ = writeln!(output);

    if report.is_empty() {
        let _ = writeln!(output, "No matching data in this feed.");
        return output;
    }

    for student in &report.students {
        let _ = writeln!(output, "## {}", student.name);
        let _ = writeln!(output);

        if !student.passed.is_empty() {
            let _ = writeln!(output, "### Passed");
            write_test_table(&mut output, &student.passed);
        }
        if report.options.show_failed && !student.failed.is_empty() {
            let _ = writeln!(output, "### Failed");
            write_test_table(&mut output, &student.failed);
        }
        if !student.sat_cards.is_empty() {
            let _ = writeln!(output, "### SAT cards");
            write_cards(&mut output, &student.sat_cards);
        }
        if !student.toefl_cards.is_empty() {
            let _ = writeln!(output, "### TOEFL cards");
            write_cards(&mut output, &student.toefl_cards);
        }
    }

    let totals = &report.totals;
    let _ = writeln!(output, "## Totals");
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "{} students; {} passed / {} failed tests ({:.1}% pass rate, \
         {:.1}% mean accuracy); {} SAT and {} TOEFL cards.",
        totals.students,
        totals.tests_passed,
        totals.tests_failed,
        totals.pass_rate,
        totals.mean_accuracy,
        totals.sat_cards,
        totals.toefl_cards
    );

    output
}

fn write_test_table(output: &mut String, tests: &[ClassifiedTest]) {
    let _ = writeln!(output);
    let _ = writeln!(output, "| Modality | Range | Words | Accuracy | Time | Errors |");
    let _ = writeln!(output, "|----------|-------|-------|----------|------|--------|");
    for test in tests {
        let _ = writeln!(
            output,
            "| {} | {} | {} | {} | {:.2}s | {} |",
            test.record.modality,
            test.record.range,
            test.record.word_count,
            test.accuracy_display(),
            test.record.reaction_secs,
            test.record.error_count
        );
    }
    let _ = writeln!(output);
}

fn write_cards(output: &mut String, cards: &[CardRecord]) {
    let _ = writeln!(output);
    for card in cards {
        let mut line = format!(
            "- **{}** ({}): first pass {}/{} wrong ({}%)",
            card.name, card.status, card.initial_wrong, card.total, card.initial_accuracy
        );
        if let (Some(wrong), Some(accuracy)) = (card.corrected_wrong, card.corrected_accuracy) {
            let _ = write!(
                line,
                ", corrected {}/{} ({}%)",
                wrong, card.total, accuracy
            );
        }
        let _ = writeln!(output, "{line}");
    }
    let _ = writeln!(output);
}
