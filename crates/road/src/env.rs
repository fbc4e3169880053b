use crate::error::RoadError;
use crate::types::{Heading, Point2};
use crate::waypoint::Waypoint;
use serde::{Deserialize, Serialize};

/// Kinematic state of the controlled vehicle.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EgoState {
    pub position: Point2,
    pub heading: Heading,
    /// Forward speed in m/s.
    pub speed: f64,
    /// Front wheel angle in radians.
    pub steering: f64,
}

/// Everything the environment reports after a reset or a step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvObservation {
    pub ego: EgoState,
    /// Candidate paths ahead of the vehicle, one per reachable lane. Each
    /// path is ordered from the nearest waypoint outwards.
    pub waypoint_paths: Vec<Vec<Waypoint>>,
}

/// Environment-facing action.
///
/// `steering_deg` is expressed in degrees of front wheel angle; throttle and
/// brake are pedal fractions in `[0, 1]`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Controls {
    pub throttle: f64,
    pub brake: f64,
    pub steering_deg: f64,
}

impl Controls {
    #[must_use]
    pub const fn new(throttle: f64, brake: f64, steering_deg: f64) -> Self {
        Self {
            throttle,
            brake,
            steering_deg,
        }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.throttle.is_finite() && self.brake.is_finite() && self.steering_deg.is_finite()
    }
}

/// Auxiliary per-step diagnostics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    pub step: usize,
    pub off_road: bool,
    pub reached_goal: bool,
    /// Distance travelled along the road since the last reset.
    pub distance_travelled: f64,
}

/// Result of a single [`DrivingEnv::step`]: `(observation, reward, done, info)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub observation: EnvObservation,
    pub reward: f64,
    pub done: bool,
    pub info: StepInfo,
}

/// Driving environment interface.
///
/// Modelled on the classic Gym contract: [`reset`] starts an episode and
/// returns the first observation, [`step`] advances the simulation by one
/// action.
///
/// [`reset`]: DrivingEnv::reset
/// [`step`]: DrivingEnv::step
pub trait DrivingEnv {
    /// Reset the environment to the start of an episode.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment has been closed.
    fn reset(&mut self) -> Result<EnvObservation, RoadError>;

    /// Apply `controls` for one simulation step.
    ///
    /// # Errors
    ///
    /// Returns an error for non-finite controls or when the environment has
    /// not been reset or has been closed.
    fn step(&mut self, controls: &Controls) -> Result<Transition, RoadError>;

    /// Release simulator resources. Further calls to `reset` or `step` fail.
    fn close(&mut self) {}
}
