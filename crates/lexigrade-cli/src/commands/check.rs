//! The `lexigrade check` command.

use std::path::PathBuf;

use anyhow::Result;

use lexigrade_core::parser;

pub fn execute(input: Option<PathBuf>) -> Result<()> {
    let feed = super::read_feed(input.as_deref())?;
    let outcome = parser::scan_feed(&feed);
    let diag = &outcome.diagnostics;

    println!(
        "Feed: {} block(s), {} test record(s), {} card record(s)",
        diag.blocks_seen, diag.tests_seen, diag.cards_seen
    );
    if diag.tests_in_progress > 0 {
        println!("{} test(s) still in progress.", diag.tests_in_progress);
    }

    for w in &diag.warnings {
        let prefix = w
            .student
            .as_ref()
            .map(|name| format!("  [block {} | {name}]", w.block))
            .unwrap_or_else(|| format!("  [block {}]", w.block));
        println!("{prefix} WARNING: {}", w.reason);
    }

    if diag.warnings.is_empty() {
        println!("Feed is clean.");
    } else {
        println!("\n{} warning(s) found.", diag.warnings.len());
    }

    Ok(())
}
