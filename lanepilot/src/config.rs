//! # Run configuration
//!
//! A run is configured from an optional JSON file, then overridden by
//! whatever flags were given on the command line.
//!
//! ```json
//! {
//!   "scenario": "scenarios/3lane.json",
//!   "model": "models/ppo",
//!   "max_steps": 1000,
//!   "seed": 43,
//!   "clamp": "trust"
//! }
//! ```

use agent::{ClampMode, EvalConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SEED: u64 = 43;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Scenario file, or a directory holding `scenario.json`.
    pub scenario: Option<PathBuf>,
    /// Exported model directory.
    pub model: Option<PathBuf>,
    pub max_steps: usize,
    pub seed: u64,
    pub clamp: ClampMode,
    pub record_steps: bool,
    /// Where to write the episode report as JSON.
    pub report: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        let eval = EvalConfig::default();
        Self {
            scenario: None,
            model: None,
            max_steps: eval.max_steps,
            seed: DEFAULT_SEED,
            clamp: eval.clamp,
            record_steps: eval.record_steps,
            report: None,
        }
    }
}

/// Command line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub scenario: Option<PathBuf>,
    pub model: Option<PathBuf>,
    pub max_steps: Option<usize>,
    pub seed: Option<u64>,
    pub clamp: bool,
    pub record_steps: bool,
    pub report: Option<PathBuf>,
}

impl RunConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading run config {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("parsing run config {}", path.display()))
    }

    /// Flags that were given win; flags that were not keep the file's value.
    #[must_use]
    pub fn with_overrides(mut self, o: Overrides) -> Self {
        if o.scenario.is_some() {
            self.scenario = o.scenario;
        }
        if o.model.is_some() {
            self.model = o.model;
        }
        if let Some(max_steps) = o.max_steps {
            self.max_steps = max_steps;
        }
        if let Some(seed) = o.seed {
            self.seed = seed;
        }
        if o.clamp {
            self.clamp = ClampMode::Clamp;
        }
        self.record_steps |= o.record_steps;
        if o.report.is_some() {
            self.report = o.report;
        }
        self
    }

    pub fn scenario_path(&self) -> Result<&Path> {
        self.scenario
            .as_deref()
            .context("no scenario given; pass --scenario or set \"scenario\" in the config file")
    }

    pub fn model_dir(&self) -> Result<&Path> {
        self.model
            .as_deref()
            .context("no model given; pass --model or set \"model\" in the config file")
    }

    #[must_use]
    pub fn eval_config(&self) -> EvalConfig {
        EvalConfig {
            max_steps: self.max_steps,
            clamp: self.clamp,
            record_steps: self.record_steps,
        }
    }
}
