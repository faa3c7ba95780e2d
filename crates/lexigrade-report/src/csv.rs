//! Flat CSV export: one row per test attempt, one row per card.
//!
//! Test and card rows share a single header; cells that do not apply
//! to a row stay empty, except the correction columns on cards, which
//! read `N/A` when no correction pass ran. The output starts with a
//! UTF-8 BOM so spreadsheet tools decode the CJK text correctly.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;

use lexigrade_core::classify::ClassifiedTest;
use lexigrade_core::model::CardRecord;
use lexigrade_core::report::AnalysisReport;

/// One line of the flat export.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    student: &'a str,
    kind: &'a str,
    modality: String,
    range: &'a str,
    word_count: String,
    accuracy: String,
    reaction_s: String,
    error_count: String,
    card_category: String,
    card_name: &'a str,
    status: String,
    total: String,
    first_wrong: String,
    first_accuracy: String,
    corrected_wrong: String,
    corrected_accuracy: String,
}

impl<'a> ExportRow<'a> {
    fn test(student: &'a str, test: &'a ClassifiedTest) -> Self {
        Self {
            student,
            kind: "test",
            modality: test.record.modality.to_string(),
            range: &test.record.range,
            word_count: test.record.word_count.to_string(),
            accuracy: test.record.accuracy.to_string(),
            reaction_s: test.record.reaction_secs.to_string(),
            error_count: test.record.error_count.to_string(),
            card_category: String::new(),
            card_name: "",
            status: String::new(),
            total: String::new(),
            first_wrong: String::new(),
            first_accuracy: String::new(),
            corrected_wrong: String::new(),
            corrected_accuracy: String::new(),
        }
    }

    fn card(student: &'a str, card: &'a CardRecord) -> Self {
        let or_na = |value: Option<String>| value.unwrap_or_else(|| "N/A".to_owned());
        Self {
            student,
            kind: "card",
            modality: String::new(),
            range: "",
            word_count: String::new(),
            accuracy: String::new(),
            reaction_s: String::new(),
            error_count: String::new(),
            card_category: card.category.to_string(),
            card_name: &card.name,
            status: card.status.to_string(),
            total: card.total.to_string(),
            first_wrong: card.initial_wrong.to_string(),
            first_accuracy: card.initial_accuracy.to_string(),
            corrected_wrong: or_na(card.corrected_wrong.map(|w| w.to_string())),
            corrected_accuracy: or_na(card.corrected_accuracy.map(|a| a.to_string())),
        }
    }
}

/// Renders the whole report as BOM-prefixed CSV text.
pub fn to_csv(report: &AnalysisReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for student in &report.students {
        for test in student.tests() {
            writer
                .serialize(ExportRow::test(&student.name, test))
                .context("failed to serialize test row")?;
        }
        for card in student.sat_cards.iter().chain(student.toefl_cards.iter()) {
            writer
                .serialize(ExportRow::card(&student.name, card))
                .context("failed to serialize card row")?;
        }
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("failed to flush csv: {e}"))?;
    let data = String::from_utf8(bytes).context("csv output was not utf-8")?;
    Ok(format!("\u{feff}{data}"))
}

/// Writes the CSV export to a file.
pub fn write_csv(report: &AnalysisReport, path: &Path) -> Result<()> {
    let data = to_csv(report)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, data)
        .with_context(|| format!("failed to write csv to {}", path.display()))?;
    Ok(())
}
