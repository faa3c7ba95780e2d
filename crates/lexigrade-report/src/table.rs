//! Terminal tables for per-student results and feed totals.

use comfy_table::{Cell, Table};

use lexigrade_core::classify::ClassifiedTest;
use lexigrade_core::model::CardRecord;
use lexigrade_core::report::AnalysisReport;
use lexigrade_core::summary::{AnalysisTotals, StudentSummary};

/// Renders every qualifying student followed by the aggregate table.
pub fn render(report: &AnalysisReport) -> String {
    let mut output = String::new();
    for student in &report.students {
        output.push_str(&render_student(student, report.options.show_failed));
    }
    output.push_str("\n== Totals ==\n");
    output.push_str(&totals_table(&report.totals).to_string());
    output.push('\n');
    output
}

fn render_student(student: &StudentSummary, show_failed: bool) -> String {
    let mut output = format!("\n== {} ==\n", student.name);

    if !student.passed.is_empty() {
        output.push_str("Passed tests\n");
        output.push_str(&test_table(&student.passed).to_string());
        output.push('\n');
    }
    if show_failed && !student.failed.is_empty() {
        output.push_str("Failed tests\n");
        output.push_str(&test_table(&student.failed).to_string());
        output.push('\n');
    }
    if !student.sat_cards.is_empty() {
        output.push_str("SAT cards\n");
        output.push_str(&card_table(&student.sat_cards).to_string());
        output.push('\n');
    }
    if !student.toefl_cards.is_empty() {
        output.push_str("TOEFL cards\n");
        output.push_str(&card_table(&student.toefl_cards).to_string());
        output.push('\n');
    }

    output
}

fn test_table(tests: &[ClassifiedTest]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Modality", "Range", "Words", "Accuracy", "Time", "Errors",
    ]);
    for test in tests {
        table.add_row(vec![
            Cell::new(test.record.modality),
            Cell::new(&test.record.range),
            Cell::new(test.record.word_count),
            Cell::new(test.accuracy_display()),
            Cell::new(format!("{:.2}s", test.record.reaction_secs)),
            Cell::new(test.record.error_count),
        ]);
    }
    table
}

fn card_table(cards: &[CardRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Card", "Status", "First pass", "Corrected"]);
    for card in cards {
        table.add_row(vec![
            Cell::new(&card.name),
            Cell::new(card.status),
            Cell::new(format!(
                "{}/{} ({}%)",
                card.initial_wrong, card.total, card.initial_accuracy
            )),
            Cell::new(match (card.corrected_wrong, card.corrected_accuracy) {
                (Some(wrong), Some(accuracy)) => {
                    format!("{}/{} ({}%)", wrong, card.total, accuracy)
                }
                _ => "N/A".to_owned(),
            }),
        ]);
    }
    table
}

fn totals_table(totals: &AnalysisTotals) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Students",
        "Passed",
        "Failed",
        "Pass rate",
        "Mean accuracy",
        "SAT cards",
        "TOEFL cards",
    ]);
    table.add_row(vec![
        Cell::new(totals.students),
        Cell::new(totals.tests_passed),
        Cell::new(totals.tests_failed),
        Cell::new(format!("{:.1}%", totals.pass_rate)),
        Cell::new(format!("{:.1}%", totals.mean_accuracy)),
        Cell::new(totals.sat_cards),
        Cell::new(totals.toefl_cards),
    ]);
    table
}
