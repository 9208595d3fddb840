//! `safetour`: replay SafeTourX contract scenarios against an in-process chain.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use safetour_cli::{Runner, Scenario};
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(name = "safetour", version, about, long_about = None)]
struct Cli {
    /// Maximum log level written to stderr
    #[arg(long, env = "SAFETOUR_LOG", default_value = "info")]
    log_level: Level,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scenario file and print one JSON report per step
    Run {
        scenario: PathBuf,

        /// Exit non-zero when any step contradicts its `expect`
        #[arg(long)]
        expect_strict: bool,
    },
}

fn init_logging(level: Level, json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(path: &Path, expect_strict: bool) -> Result<ExitCode> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    let scenario = Scenario::from_json(&raw)
        .with_context(|| format!("parsing scenario {}", path.display()))?;

    let mut runner = Runner::new(&scenario.genesis).context("starting ledger")?;
    let summary = runner
        .run(&scenario.steps)
        .with_context(|| format!("replaying {}", path.display()))?;

    for report in runner.reports() {
        println!("{}", serde_json::to_string(report)?);
    }
    println!("{}", serde_json::to_string(&summary)?);
    info!(
        steps = summary.steps,
        accepted = summary.accepted,
        rejected = summary.rejected,
        mismatches = summary.mismatches.len(),
        journal = runner.ledger().journal().len(),
        "scenario finished"
    );

    if expect_strict && !summary.mismatches.is_empty() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.log_level, cli.json_logs);

    match cli.command {
        Command::Run {
            scenario,
            expect_strict,
        } => run(&scenario, expect_strict),
    }
}
