//! The `lexigrade analyze` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use lexigrade_core::analyzer::{self, AnalyzeOptions, MAX_THRESHOLD, MIN_THRESHOLD};
use lexigrade_report::{csv, markdown, table};

use crate::config::load_config_from;

pub fn execute(
    input: Option<PathBuf>,
    threshold: Option<u32>,
    show_failed: bool,
    format: String,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    // Config fills in whatever the flags left unset
    let config = load_config_from(config_path.as_deref())?;
    let threshold = threshold.unwrap_or(config.threshold);
    let show_failed = show_failed || config.show_failed;
    let output_dir = output.unwrap_or(config.output_dir);

    anyhow::ensure!(
        (MIN_THRESHOLD..=MAX_THRESHOLD).contains(&threshold),
        "threshold must be between {MIN_THRESHOLD} and {MAX_THRESHOLD}"
    );

    let feed = super::read_feed(input.as_deref())?;
    let options = AnalyzeOptions {
        threshold,
        show_failed,
    };
    debug!(threshold, show_failed, format = %format, "analyzing feed");

    let report = analyzer::analyze(&feed, &options);
    eprintln!(
        "Scanned {} block(s): {} test record(s), {} card record(s).",
        report.diagnostics.blocks_seen,
        report.diagnostics.tests_seen,
        report.diagnostics.cards_seen
    );
    if !report.diagnostics.is_clean() {
        let dropped = report.diagnostics.blocks_dropped
            + report.diagnostics.tests_dropped
            + report.diagnostics.cards_dropped;
        eprintln!("Warning: {dropped} fragment(s) could not be parsed (see lexigrade check).");
    }
    if report.is_empty() {
        eprintln!("No matching data in this feed.");
        return Ok(());
    }

    let formats: Vec<&str> = if format == "all" {
        vec!["table", "json", "csv", "markdown"]
    } else {
        format.split(',').collect()
    };
    if formats.iter().any(|f| *f != "table") {
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("failed to create {}", output_dir.display()))?;
    }

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
    for fmt in &formats {
        match *fmt {
            "table" => eprintln!("{}", table::render(&report)),
            "json" => {
                let path = output_dir.join(format!("report-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "csv" => {
                let path = output_dir.join(format!("report-{timestamp}.csv"));
                csv::write_csv(&report, &path)?;
                eprintln!("CSV export: {}", path.display());
            }
            "markdown" => {
                let path = output_dir.join(format!("report-{timestamp}.md"));
                std::fs::write(&path, markdown::build_markdown(&report))
                    .with_context(|| format!("failed to write digest to {}", path.display()))?;
                eprintln!("Markdown digest: {}", path.display());
            }
            _ => eprintln!("Unknown format: {fmt}"),
        }
    }

    Ok(())
}
