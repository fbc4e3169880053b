//! # Lanepilot Runtime
//!
//! Entry point for the `lanepilot` binary.
//!
//! `run` evaluates an exported policy on a scenario and prints the
//! accumulated reward. `init-model` writes a randomly initialised policy.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueHint};
use lanepilot::agent::Outcome;
use lanepilot::app;
use lanepilot::config::{Overrides, RunConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Evaluate driving policies on a lane-keeping simulator")]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a model for one episode
    Run(RunArgs),
    /// Write a randomly initialised model
    InitModel(InitModelArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Scenario file or directory
    #[arg(long, value_hint = ValueHint::AnyPath)]
    scenario: Option<PathBuf>,

    /// Exported model directory
    #[arg(long, value_hint = ValueHint::DirPath)]
    model: Option<PathBuf>,

    /// JSON run configuration; flags override its values
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    #[arg(long)]
    max_steps: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Clamp raw model output into the action space instead of trusting it
    #[arg(long)]
    clamp: bool,

    /// Include every step in the report
    #[arg(long)]
    record_steps: bool,

    /// Write the episode report to this file
    #[arg(long, value_hint = ValueHint::FilePath)]
    report: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InitModelArgs {
    #[arg(long, value_hint = ValueHint::DirPath)]
    out: PathBuf,

    /// Hidden layer widths
    #[arg(long, value_delimiter = ',', default_values_t = [64, 64])]
    hidden: Vec<usize>,

    #[arg(long, default_value_t = 43)]
    seed: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let result = match cli.command {
        Command::Run(args) => run(args),
        Command::InitModel(args) => app::init_model(&args.out, &args.hidden, args.seed),
    };
    if let Err(err) = &result {
        tracing::error!("{err:#}");
    }
    result
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: RunArgs) -> Result<()> {
    let base = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    let config = base.with_overrides(Overrides {
        scenario: args.scenario,
        model: args.model,
        max_steps: args.max_steps,
        seed: args.seed,
        clamp: args.clamp,
        record_steps: args.record_steps,
        report: args.report,
    });

    let report = app::run(&config)?;
    if let Outcome::Terminated { .. } = report.outcome {
        println!("simulation ended");
    }
    println!("{}", report.outcome.total_reward());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_flags() {
        let cli = Cli::try_parse_from([
            "lanepilot",
            "run",
            "--scenario",
            "s.json",
            "--model",
            "m",
            "--max-steps",
            "10",
            "--clamp",
        ])
        .unwrap();
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.scenario, Some(PathBuf::from("s.json")));
                assert_eq!(args.max_steps, Some(10));
                assert!(args.clamp);
                assert!(args.seed.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn init_model_hidden_widths_are_comma_separated() {
        let cli = Cli::try_parse_from(["lanepilot", "init-model", "--out", "m", "--hidden", "8,4"]).unwrap();
        match cli.command {
            Command::InitModel(args) => {
                assert_eq!(args.hidden, vec![8, 4]);
                assert_eq!(args.seed, 43);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
