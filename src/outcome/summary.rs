//! Aggregate pass rate and the process exit code derived from it

use serde::Serialize;
use std::fmt;

/// Pass rate at or above which the backend is considered healthy
pub const HEALTHY_THRESHOLD: f64 = 80.0;
/// Pass rate at or above which core functionality is considered working
pub const DEGRADED_THRESHOLD: f64 = 50.0;

/// Overall assessment of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// At least 80% of steps passed
    Healthy,
    /// At least 50% of steps passed
    Degraded,
    /// Fewer than half of the steps passed
    Broken,
}

impl Verdict {
    pub fn from_rate(rate: f64) -> Self {
        if rate >= HEALTHY_THRESHOLD {
            Verdict::Healthy
        } else if rate >= DEGRADED_THRESHOLD {
            Verdict::Degraded
        } else {
            Verdict::Broken
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Verdict::Healthy => 0,
            Verdict::Degraded => 1,
            Verdict::Broken => 2,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Healthy => "Backend tests mostly successful!",
            Verdict::Degraded => "Backend has some issues but core functionality works",
            Verdict::Broken => "Backend has major issues",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Healthy => write!(f, "healthy"),
            Verdict::Degraded => write!(f, "degraded"),
            Verdict::Broken => write!(f, "broken"),
        }
    }
}

/// Final counts of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub attempted: usize,
    pub passed: usize,
}

impl Summary {
    pub fn new(attempted: usize, passed: usize) -> Self {
        Self { attempted, passed }
    }

    pub fn failed(&self) -> usize {
        self.attempted.saturating_sub(self.passed)
    }

    /// Passed over attempted as a percentage; 0 when nothing ran
    pub fn success_rate(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            self.passed as f64 / self.attempted as f64 * 100.0
        }
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_rate(self.success_rate())
    }

    pub fn exit_code(&self) -> i32 {
        self.verdict().exit_code()
    }
}
