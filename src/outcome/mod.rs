//! Test outcomes and the recorder that tallies them

mod summary;

pub use summary::{Summary, Verdict};

use colored::Colorize;
use serde::Serialize;
use tracing::info;

/// Verdict and explanation for one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub name: String,
    pub success: bool,
    pub detail: String,
}

impl Outcome {
    pub fn passed(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: true,
            detail: detail.into(),
        }
    }

    pub fn failed(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: false,
            detail: detail.into(),
        }
    }

    /// One-line status, e.g. `✓ Get Reviews - PASSED - Found 3 reviews`
    pub fn status_line(&self) -> String {
        let line = if self.success {
            format!("{} - PASSED", self.name)
        } else {
            format!("{} - FAILED", self.name)
        };
        let line = if self.detail.is_empty() {
            line
        } else {
            format!("{line} {}", self.detail)
        };

        if self.success {
            format!("{} {}", "✓".green().bold(), line.green())
        } else {
            format!("{} {}", "✗".red().bold(), line.red())
        }
    }
}

/// Counts every recorded outcome and prints its status line
#[derive(Debug, Default)]
pub struct Recorder {
    attempted: usize,
    passed: usize,
    outcomes: Vec<Outcome>,
    silent: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder that tallies without printing
    pub fn silent() -> Self {
        Self {
            silent: true,
            ..Self::default()
        }
    }

    /// Fold an outcome into the tallies; returns its success flag
    pub fn record(&mut self, outcome: Outcome) -> bool {
        self.attempted += 1;
        if outcome.success {
            self.passed += 1;
        }

        info!(
            step = %outcome.name,
            success = outcome.success,
            attempted = self.attempted,
            passed = self.passed,
            "step recorded"
        );

        if !self.silent {
            println!("{}", outcome.status_line());
        }

        let success = outcome.success;
        self.outcomes.push(outcome);
        success
    }

    pub fn summary(&self) -> Summary {
        Summary::new(self.attempted, self.passed)
    }

    /// Outcomes in the order they were recorded
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }
}
