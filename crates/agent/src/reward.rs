//! # Reward shaping
//!
//! `shaped = base * cos(angle_error) / (|distance_from_center| + 0.01)`
//!
//! The encoder reports `angle_error` in degrees, so it is converted to
//! radians here. The epsilon bounds the multiplier at `100` on the lane
//! centre.

use crate::encoder::{encode, Observation};
use crate::error::EvalError;
use road::EnvObservation;

/// Added to the absolute normalised offset before inversion.
pub const CENTER_EPSILON: f64 = 0.01;

/// `cos` of an angle error given in degrees.
#[must_use]
pub fn angle_multiplier(angle_error_deg: f64) -> f64 {
    angle_error_deg.to_radians().cos()
}

#[must_use]
pub fn center_multiplier(distance_from_center: f64) -> f64 {
    1.0 / (distance_from_center.abs() + CENTER_EPSILON)
}

/// Combined factor applied to the base reward.
#[must_use]
pub fn shaping_multiplier(obs: &Observation) -> f64 {
    angle_multiplier(obs.angle_error[0]) * center_multiplier(obs.distance_from_center[0])
}

/// Shapes the environment's `base_reward` for `state`.
///
/// The observation is re-encoded from `state`.
///
/// # Errors
///
/// Propagates any [`encode`] failure.
pub fn shape(state: &EnvObservation, base_reward: f64) -> Result<f64, EvalError> {
    let obs = encode(state)?;
    Ok(base_reward * shaping_multiplier(&obs))
}
