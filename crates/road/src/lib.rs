#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
//! # Lanepilot Road Simulator
//!
//! A small kinematic driving environment used to evaluate lane-keeping
//! policies.
//!
//! The crate has two layers. The geometric layer ([`types`] and
//! [`waypoint`]) describes points, headings and lane-centre waypoints together
//! with the measurements a policy bridge needs: straight-line distance,
//! signed lateral error and relative heading. The simulation layer
//! ([`simulation`], [`integrator`] and [`scenario`]) steps a single vehicle
//! along a straight multi-lane road and exposes it through the
//! [`DrivingEnv`] trait.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use road::{Controls, DrivingEnv, LaneSim, Scenario};
//!
//! let mut env = LaneSim::new(Scenario::default(), 43)?;
//! let obs = env.reset()?;
//! let step = env.step(&Controls::new(0.5, 0.0, 0.0))?;
//! println!("travelled {} m", step.reward);
//! ```

pub mod env;
pub mod error;
pub mod integrator;
pub mod scenario;
pub mod simulation;
pub mod types;
pub mod waypoint;

pub use env::{Controls, DrivingEnv, EgoState, EnvObservation, StepInfo, Transition};
pub use error::RoadError;
pub use scenario::Scenario;
pub use simulation::LaneSim;
pub use types::{Heading, Point2};
pub use waypoint::Waypoint;
