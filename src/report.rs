//! JSON report of a finished run, for CI artifacts

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::outcome::{Outcome, Summary, Verdict};

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub api_url: String,
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub attempted: usize,
    pub passed: usize,
    pub failed: usize,
    /// Percentage, rounded to one decimal place
    pub success_rate: f64,
    pub verdict: Verdict,
    pub exit_code: i32,
    pub outcomes: Vec<Outcome>,
}

impl RunReport {
    pub fn new(
        api_url: impl Into<String>,
        run_id: impl Into<String>,
        started_at: DateTime<Utc>,
        summary: Summary,
        outcomes: &[Outcome],
    ) -> Self {
        Self {
            api_url: api_url.into(),
            run_id: run_id.into(),
            started_at,
            finished_at: Utc::now(),
            attempted: summary.attempted,
            passed: summary.passed,
            failed: summary.failed(),
            success_rate: (summary.success_rate() * 10.0).round() / 10.0,
            verdict: summary.verdict(),
            exit_code: summary.exit_code(),
            outcomes: outcomes.to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize run report")
    }

    /// Write the report, creating parent directories as needed
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create report directory: {}", parent.display())
            })?;
        }

        let json = self.to_json()?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write report: {}", path.display()))
    }
}
