//! CLI configuration loaded from `lexigrade.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use lexigrade_core::analyzer::DEFAULT_THRESHOLD;

/// Top-level lexigrade configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexigradeConfig {
    /// Pass threshold in percent.
    #[serde(default = "default_threshold")]
    pub threshold: u32,
    /// Whether failed tests are listed alongside passed ones.
    #[serde(default)]
    pub show_failed: bool,
    /// Output directory for report files.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_threshold() -> u32 {
    DEFAULT_THRESHOLD
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./lexigrade-results")
}

impl Default for LexigradeConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            show_failed: false,
            output_dir: default_output_dir(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `lexigrade.toml` in the current directory
/// 2. `~/.config/lexigrade/config.toml`
///
/// Environment variable overrides: `LEXIGRADE_THRESHOLD`,
/// `LEXIGRADE_SHOW_FAILED`.
pub fn load_config_from(path: Option<&Path>) -> Result<LexigradeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("lexigrade.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<LexigradeConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => LexigradeConfig::default(),
    };

    apply_env(&mut config)?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("lexigrade"))
}

/// Apply `LEXIGRADE_*` environment overrides on top of the file values.
fn apply_env(config: &mut LexigradeConfig) -> Result<()> {
    if let Ok(raw) = std::env::var("LEXIGRADE_THRESHOLD") {
        config.threshold = raw
            .parse()
            .with_context(|| format!("failed to parse LEXIGRADE_THRESHOLD: {raw}"))?;
    }
    if let Ok(raw) = std::env::var("LEXIGRADE_SHOW_FAILED") {
        config.show_failed = parse_bool(&raw)
            .with_context(|| format!("failed to parse LEXIGRADE_SHOW_FAILED: {raw}"))?;
    }
    Ok(())
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => anyhow::bail!("expected a boolean, got: {other}"),
    }
}
