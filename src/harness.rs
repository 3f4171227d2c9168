//! Run orchestrator: executes the pipeline and reports the aggregate result

use anyhow::Result;
use colored::Colorize;
use tracing::info;

use crate::client::ApiClient;
use crate::config::HarnessConfig;
use crate::outcome::{Outcome, Recorder, Summary, Verdict};
use crate::session::Session;
use crate::steps::{run_step, validate_order, Group, Step, PIPELINE};

/// Name of the forum under test, shown in the banner
pub const FORUM_NAME: &str = "Oyun Yazarlari";

const RULE_WIDTH: usize = 60;

/// Owns the client, session and recorder for one run
pub struct Harness {
    client: ApiClient,
    session: Session,
    recorder: Recorder,
    steps: Vec<Step>,
    quiet: bool,
}

impl Harness {
    pub fn new(config: &HarnessConfig) -> Result<Self> {
        Self::with_session(config, Session::new())
    }

    /// Build a harness around an existing session, e.g. one with a fixed run id
    pub fn with_session(config: &HarnessConfig, session: Session) -> Result<Self> {
        let client = ApiClient::new(config)?;
        Ok(Self {
            client,
            session,
            recorder: Recorder::new(),
            steps: PIPELINE.to_vec(),
            quiet: false,
        })
    }

    /// Suppress banner, headers, status lines and summary output
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self.recorder = Recorder::silent();
        self
    }

    /// Replace the step list; the order must satisfy every step's requirements
    pub fn with_steps(mut self, steps: Vec<Step>) -> Result<Self> {
        validate_order(&steps)?;
        self.steps = steps;
        Ok(self)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn outcomes(&self) -> &[Outcome] {
        self.recorder.outcomes()
    }

    pub fn summary(&self) -> Summary {
        self.recorder.summary()
    }

    pub fn api_url(&self) -> &str {
        self.client.api_url()
    }

    /// Run one step and record its outcome; returns whether it passed
    pub fn run_step(&mut self, step: Step) -> bool {
        let outcome = run_step(step, &self.client, &mut self.session);
        self.recorder.record(outcome)
    }

    /// Run every step in order, print the summary and return it
    pub fn run(&mut self) -> Summary {
        info!(api_url = %self.client.api_url(), run_id = %self.session.run_id, "starting run");
        self.print_banner();

        let steps = self.steps.clone();
        let mut current_group: Option<Group> = None;
        for step in steps {
            if current_group != Some(step.group()) {
                current_group = Some(step.group());
                self.print_group(step.group());
            }
            self.run_step(step);
        }

        let summary = self.summary();
        info!(
            attempted = summary.attempted,
            passed = summary.passed,
            verdict = %summary.verdict(),
            "run complete"
        );
        self.print_summary(&summary);
        summary
    }

    fn print_banner(&self) {
        if self.quiet {
            return;
        }
        println!(
            "{} Starting Backend API Tests for {}",
            "→".cyan().bold(),
            FORUM_NAME.bold()
        );
        println!("  {} {}", "API:".bold(), self.client.api_url().dimmed());
        println!("{}", "=".repeat(RULE_WIDTH));
    }

    fn print_group(&self, group: Group) {
        if self.quiet {
            return;
        }
        println!("\n{}", group.title().bold());
    }

    fn print_summary(&self, summary: &Summary) {
        if self.quiet {
            return;
        }
        println!("\n{}", "=".repeat(RULE_WIDTH));
        println!(
            "{} {}/{} tests passed",
            "Test Results:".bold(),
            summary.passed,
            summary.attempted
        );

        let rate = format!("{:.1}%", summary.success_rate());
        let verdict = summary.verdict();
        let (rate, message) = match verdict {
            Verdict::Healthy => (rate.green(), format!("✓ {}", verdict.message()).green()),
            Verdict::Degraded => (rate.yellow(), format!("⚠ {}", verdict.message()).yellow()),
            Verdict::Broken => (rate.red(), format!("✗ {}", verdict.message()).red()),
        };
        println!("{} {}", "Success Rate:".bold(), rate);
        println!("{}", message.bold());
    }
}

/// Print the pipeline with each step's inputs and outputs
pub fn print_plan(steps: &[Step]) {
    println!("{}", "Steps".bold().underline());
    println!();
    println!(
        "{:<4} {:<26} {:<22} {:<40} {}",
        "#".bold(),
        "Step".bold(),
        "Group".bold(),
        "Requires".bold(),
        "Produces".bold()
    );
    println!("{}", "-".repeat(110).dimmed());

    for (index, step) in steps.iter().enumerate() {
        let requires = join_requirements(step.requires());
        let produces = join_requirements(step.produces());
        println!(
            "{:<4} {:<26} {:<22} {:<40} {}",
            index + 1,
            step.name().cyan(),
            step.group().title(),
            requires,
            produces
        );
    }
}

fn join_requirements(requirements: &[crate::session::Requirement]) -> String {
    if requirements.is_empty() {
        "-".to_string()
    } else {
        requirements
            .iter()
            .map(|r| r.describe())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
