//! # Lanepilot Application Logic
//!
//! [`run`] evaluates one episode: it loads the scenario, sets up the policy,
//! drives an [`EvalLoop`] and writes the report. The policy is torn down and
//! the environment closed whether or not the episode succeeded.
//!
//! [`init_model`] writes a randomly initialised artifact exposing the agreed
//! endpoints, which is enough to smoke-test the whole pipeline.

use crate::config::RunConfig;
use agent::{EndpointSchema, EpisodeReport, EvalConfig, EvalError, EvalLoop, Policy, PolicyConfig};
use anyhow::{Context, Result};
use ml::{Layer, ModelArtifact, RandomInit};
use road::{DrivingEnv, LaneSim, Scenario};
use std::fs;
use std::path::Path;

/// Runs one evaluation episode as described by `config`.
///
/// # Errors
///
/// Returns any error loading the scenario or model, the first error raised
/// during the episode, or a failure writing the report.
pub fn run(config: &RunConfig) -> Result<EpisodeReport> {
    let scenario_path = config.scenario_path()?;
    let model_dir = config.model_dir()?;

    let scenario = Scenario::load(scenario_path)
        .with_context(|| format!("loading scenario {}", scenario_path.display()))?;
    let mut env = LaneSim::new(scenario, config.seed)?;
    let mut policy = Policy::new(PolicyConfig::new(model_dir));

    let result = evaluate(&mut env, &mut policy, config.eval_config());
    policy.teardown();
    env.close();
    let report = result.with_context(|| format!("evaluating model {}", model_dir.display()))?;

    if let Some(path) = &config.report {
        write_report(path, &report)?;
    }
    Ok(report)
}

fn evaluate<E: DrivingEnv>(
    env: &mut E,
    policy: &mut Policy,
    config: EvalConfig,
) -> Result<EpisodeReport, EvalError> {
    policy.setup()?;
    EvalLoop::new(env, policy, config).run()
}

/// Writes `report` as pretty JSON, creating parent directories.
///
/// # Errors
///
/// Returns an I/O or serialisation error.
pub fn write_report(path: &Path, report: &EpisodeReport) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(report)?)
        .with_context(|| format!("writing report {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote episode report");
    Ok(())
}

/// Writes a freshly initialised policy with the default endpoints to `out`.
///
/// # Errors
///
/// Returns an error if the artifact cannot be written.
pub fn init_model(out: &Path, hidden: &[usize], seed: u64) -> Result<()> {
    let schema = EndpointSchema::default();
    let input_dim = schema
        .input
        .features()
        .context("default input endpoint has no feature dimension")?;
    let output_dim = schema
        .output
        .features()
        .context("default output endpoint has no feature dimension")?;
    let artifact = ModelArtifact::random(&RandomInit {
        input: schema.input.name,
        output: schema.output.name,
        input_dim,
        hidden: hidden.to_vec(),
        output_dim,
        seed,
    });
    artifact
        .write(out)
        .with_context(|| format!("writing model to {}", out.display()))?;
    tracing::info!(
        path = %out.display(),
        params = artifact.network.param_count(),
        "initialised model"
    );
    Ok(())
}
