#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap
)]
//! # Lanepilot Agent
//!
//! The evaluation bridge between a driving environment and an exported
//! policy.
//!
//! One evaluation step runs the following pipeline:
//!
//! ```text
//! EnvObservation ─encode─▶ Observation ─Agent::act─▶ RawAction ─decode─▶ Action
//!        ▲                                                              │
//!        └──────────── DrivingEnv::step ◀── Controls ◀──────────────────┘
//!                           │
//!                           └─ base reward ─shape─▶ shaped reward ─▶ accumulator
//! ```
//!
//! -   [`encoder`] turns raw simulator state into the fixed-shape
//!     [`Observation`] the model was trained on.
//! -   [`reward`] shapes the environment's base reward by heading alignment
//!     and distance from the lane centre.
//! -   [`action`] rounds and rescales raw model output into an [`Action`].
//! -   [`adapter`] and [`policy`] own the inference session and expose the
//!     `setup` / `act` / `teardown` contract.
//! -   [`eval`] drives the loop and reports the accumulated reward.

pub mod action;
pub mod adapter;
pub mod encoder;
pub mod error;
pub mod eval;
pub mod policy;
pub mod reward;
pub mod spaces;

pub use action::{Action, ActionDecoder, ClampMode, RawAction};
pub use adapter::{EndpointSchema, InferenceAdapter};
pub use encoder::{encode, Observation};
pub use error::{ConfigurationError, EncodingError, EvalError, InferenceError};
pub use eval::{EpisodeAccumulator, EpisodeReport, EvalConfig, EvalLoop, Outcome, Phase, StepRecord};
pub use policy::{Agent, Policy, PolicyConfig};
pub use reward::shape;
pub use spaces::MAX_LANES;
