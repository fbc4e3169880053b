use ml::ModelError;
use road::RoadError;
use thiserror::Error;

/// Malformed or empty geometric input from the environment.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodingError {
    #[error("environment reported no candidate waypoint paths")]
    NoCandidatePaths,
    #[error("lane width {lane_width} at the closest waypoint is not positive")]
    NonPositiveLaneWidth { lane_width: f64 },
    #[error("angle error {degrees} deg is outside [-180, 180]")]
    AngleOutOfRange { degrees: f64 },
    #[error("non-finite {0} in environment state")]
    NonFinite(&'static str),
}

/// The model artifact or its runtime does not match what the adapter expects.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("endpoint {name:?} has shape {found:?}, schema v{version} expects {expected:?}")]
    Schema {
        name: String,
        version: u32,
        expected: Vec<i64>,
        found: Vec<i64>,
    },
    #[error("model produced {found} action components, expected {expected}")]
    OutputArity { expected: usize, found: usize },
    #[error("policy used before setup")]
    NotSetUp,
}

/// Declared spaces or run settings disagree with what was observed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("lane index {lane_index} is outside the declared {max_lanes} lanes")]
    LaneIndexOutOfRange { lane_index: usize, max_lanes: usize },
    #[error("max_steps must be at least 1")]
    ZeroMaxSteps,
}

/// Every failure that ends an evaluation run.
#[derive(Error, Debug)]
pub enum EvalError {
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),
    #[error("inference error: {0}")]
    Inference(#[from] InferenceError),
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("environment error: {0}")]
    Environment(#[from] RoadError),
}
