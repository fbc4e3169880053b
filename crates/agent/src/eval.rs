//! # Evaluation loop
//!
//! Drives one episode: `encode → act → decode → step → shape → accumulate`,
//! until the environment reports `done` or `max_steps` is reached.
//!
//! ```text
//! Created ──run──▶ Running ──done──────▶ Terminated
//!                     │ └────max_steps──▶ Exhausted
//!                     └──────error──────▶ Failed
//! ```
//!
//! Errors are never recovered: the first failure aborts the episode and no
//! reward is reported.

use crate::action::{Action, ActionDecoder, ClampMode, RawAction};
use crate::encoder::encode;
use crate::error::{ConfigurationError, EvalError};
use crate::policy::Agent;
use crate::reward::shape;
use road::{DrivingEnv, EnvObservation, Transition};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_STEPS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    pub max_steps: usize,
    pub clamp: ClampMode,
    /// Keep a [`StepRecord`] for every step in the report.
    pub record_steps: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            clamp: ClampMode::Trust,
            record_steps: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Created,
    Running,
    Terminated,
    Exhausted,
    Failed,
}

/// How a successful episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// The environment reported `done`.
    Terminated { steps: usize, total_reward: f64 },
    /// `max_steps` elapsed without `done`.
    Exhausted { steps: usize, total_reward: f64 },
}

impl Outcome {
    #[must_use]
    pub fn total_reward(&self) -> f64 {
        match *self {
            Outcome::Terminated { total_reward, .. } | Outcome::Exhausted { total_reward, .. } => total_reward,
        }
    }

    #[must_use]
    pub fn steps(&self) -> usize {
        match *self {
            Outcome::Terminated { steps, .. } | Outcome::Exhausted { steps, .. } => steps,
        }
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        matches!(self, Outcome::Terminated { .. })
    }
}

/// Running sum of shaped rewards for one episode.
#[derive(Debug, Default, Clone, Copy)]
pub struct EpisodeAccumulator {
    total: f64,
    steps: usize,
}

impl EpisodeAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, reward: f64) {
        self.total += reward;
        self.steps += 1;
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.total
    }

    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.total / self.steps as f64
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: usize,
    pub raw_action: RawAction,
    pub action: Action,
    pub base_reward: f64,
    pub shaped_reward: f64,
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeReport {
    pub outcome: Outcome,
    pub mean_reward: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<StepRecord>,
}

/// One evaluation episode against `env` with `agent`.
pub struct EvalLoop<'a, E, A> {
    env: &'a mut E,
    agent: &'a mut A,
    decoder: ActionDecoder,
    config: EvalConfig,
    phase: Phase,
}

impl<'a, E: DrivingEnv, A: Agent> EvalLoop<'a, E, A> {
    pub fn new(env: &'a mut E, agent: &'a mut A, config: EvalConfig) -> Self {
        Self {
            env,
            agent,
            decoder: ActionDecoder::new(config.clamp),
            config,
            phase: Phase::Created,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Resets the environment and runs the episode to completion.
    ///
    /// # Errors
    ///
    /// The first encoder, inference, configuration or environment error.
    pub fn run(&mut self) -> Result<EpisodeReport, EvalError> {
        self.phase = Phase::Running;
        match self.drive() {
            Ok(report) => {
                self.phase = if report.outcome.is_terminated() {
                    Phase::Terminated
                } else {
                    Phase::Exhausted
                };
                tracing::info!(
                    steps = report.outcome.steps(),
                    total_reward = report.outcome.total_reward(),
                    phase = ?self.phase,
                    "episode finished"
                );
                Ok(report)
            }
            Err(err) => {
                self.phase = Phase::Failed;
                tracing::error!(error = %err, "episode aborted");
                Err(err)
            }
        }
    }

    fn drive(&mut self) -> Result<EpisodeReport, EvalError> {
        if self.config.max_steps == 0 {
            return Err(ConfigurationError::ZeroMaxSteps.into());
        }
        let mut observation = self.env.reset()?;
        let mut acc = EpisodeAccumulator::new();
        let mut records = Vec::new();

        for step in 0..self.config.max_steps {
            let (transition, record) = self.tick(step, &observation)?;
            acc.add(record.shaped_reward);
            if self.config.record_steps {
                records.push(record);
            }
            if transition.done {
                return Ok(EpisodeReport {
                    outcome: Outcome::Terminated {
                        steps: acc.steps(),
                        total_reward: acc.total(),
                    },
                    mean_reward: acc.mean(),
                    records,
                });
            }
            observation = transition.observation;
        }

        Ok(EpisodeReport {
            outcome: Outcome::Exhausted {
                steps: acc.steps(),
                total_reward: acc.total(),
            },
            mean_reward: acc.mean(),
            records,
        })
    }

    fn tick(&mut self, step: usize, raw: &EnvObservation) -> Result<(Transition, StepRecord), EvalError> {
        let observation = encode(raw)?;
        let raw_action = self.agent.act(&observation)?;
        let action = self.decoder.decode(raw_action);
        let transition = self.env.step(&action.into())?;
        let shaped_reward = shape(&transition.observation, transition.reward)?;
        tracing::debug!(
            step,
            lane = observation.lane_idx,
            offset = observation.distance_from_center[0],
            throttle = action.throttle,
            brake = action.brake,
            steering_deg = action.steering_degrees,
            base_reward = transition.reward,
            shaped_reward,
            "step"
        );
        let record = StepRecord {
            step,
            raw_action,
            action,
            base_reward: transition.reward,
            shaped_reward,
            done: transition.done,
        };
        Ok((transition, record))
    }
}
