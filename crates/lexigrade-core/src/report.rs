//! Analysis report type with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analyzer::AnalyzeOptions;
use crate::error::ScanDiagnostics;
use crate::summary::{AnalysisTotals, StudentSummary};

/// A complete analysis run: results, totals, and scan diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Options the feed was analyzed with.
    pub options: AnalyzeOptions,
    /// Qualifying students, feed order.
    pub students: Vec<StudentSummary>,
    pub totals: AnalysisTotals,
    pub diagnostics: ScanDiagnostics,
}

impl AnalysisReport {
    pub fn new(
        options: AnalyzeOptions,
        students: Vec<StudentSummary>,
        totals: AnalysisTotals,
        diagnostics: ScanDiagnostics,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            options,
            students,
            totals,
            diagnostics,
        }
    }

    /// True when no student qualified for the result set.
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AnalysisReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
