//! CLI subcommands.

pub mod analyze;
pub mod check;
pub mod init;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Reads the feed from a file, or from stdin when no path is given.
fn read_feed(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read feed: {}", path.display())),
        None => {
            let mut feed = String::new();
            std::io::stdin()
                .read_to_string(&mut feed)
                .context("failed to read feed from stdin")?;
            Ok(feed)
        }
    }
}
