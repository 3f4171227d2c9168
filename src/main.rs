use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use forum_smoke::config::{HarnessConfig, DEFAULT_BASE_URL};
use forum_smoke::harness::{print_plan, Harness};
use forum_smoke::logging::init_logging;
use forum_smoke::report::RunReport;
use forum_smoke::steps::PIPELINE;
use forum_smoke::validation::{clap_base_url_validator, clap_timeout_validator};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Exit code for setup failures, reported the same as a broken backend
const SETUP_FAILURE_EXIT_CODE: u8 = 2;

#[derive(Parser)]
#[command(name = "forum-smoke")]
#[command(about = "End-to-end smoke tests for the Oyun Yazarlari forum API", long_about = None)]
#[command(version)]
struct Cli {
    /// Backend root URL; the API is expected under <base-url>/api
    #[arg(long, default_value = DEFAULT_BASE_URL, value_parser = clap_base_url_validator)]
    base_url: String,

    /// Per-request timeout in seconds (1-600)
    #[arg(short, long, default_value_t = 30, value_parser = clap_timeout_validator)]
    timeout: u64,

    /// Write a JSON report of the run to this path
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Print the ordered steps with their inputs and outputs, then exit
    #[arg(long)]
    list: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            ExitCode::from(SETUP_FAILURE_EXIT_CODE)
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    if cli.list {
        print_plan(&PIPELINE);
        return Ok(0);
    }

    let config =
        HarnessConfig::new(cli.base_url).with_request_timeout(Duration::from_secs(cli.timeout));

    let started_at = Utc::now();
    let mut harness = Harness::new(&config)?;
    let summary = harness.run();

    if let Some(path) = cli.report {
        let report = RunReport::new(
            harness.api_url(),
            harness.session().run_id.clone(),
            started_at,
            summary,
            harness.outcomes(),
        );
        // Report failures leave the exit code unchanged
        match report.write_to(&path) {
            Ok(()) => println!("  {} {}", "Report:".bold(), path.display().to_string().dimmed()),
            Err(e) => eprintln!("{} {e:#}", "Warning:".yellow().bold()),
        }
    }

    Ok(summary.verdict().exit_code() as u8)
}
