//! # Observation encoding
//!
//! Maps raw environment state to the fixed-shape [`Observation`] record.
//!
//! The reference waypoint is the nearest of the *first* waypoints of every
//! candidate path. Lateral offset is normalised by half the lane width at
//! that waypoint, so `±1.0` means the vehicle sits on a lane boundary.
//! `angle_error` is in degrees; [`crate::reward`] converts it to radians
//! before taking the cosine.

use crate::error::{ConfigurationError, EncodingError, EvalError};
use crate::spaces::{self, MAX_LANES};
use ml::SpaceValue;
use road::{EnvObservation, Point2, Waypoint};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Model input. Every float field is a single-element array so the record
/// keeps the shape declared in [`spaces::observation_space`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Signed lateral offset divided by half the lane width; positive left.
    pub distance_from_center: [f64; 1],
    /// Lane heading relative to the vehicle heading, degrees in `[-180, 180]`.
    pub angle_error: [f64; 1],
    pub speed: [f64; 1],
    /// Front wheel angle in radians, as reported by the environment. Decoded
    /// actions command steering in degrees; the two are not interchangeable.
    pub steering: [f64; 1],
    pub lane_idx: usize,
}

impl Observation {
    /// The observation as a value of the declared observation space.
    #[must_use]
    pub fn to_space_value(&self) -> SpaceValue {
        let fields = BTreeMap::from([
            (
                spaces::DISTANCE_FROM_CENTER.to_string(),
                SpaceValue::Array(self.distance_from_center.to_vec()),
            ),
            (spaces::ANGLE_ERROR.to_string(), SpaceValue::Array(self.angle_error.to_vec())),
            (spaces::SPEED.to_string(), SpaceValue::Array(self.speed.to_vec())),
            (spaces::STEERING.to_string(), SpaceValue::Array(self.steering.to_vec())),
            (spaces::LANE_IDX.to_string(), SpaceValue::Index(self.lane_idx)),
        ]);
        SpaceValue::Dict(fields)
    }
}

/// The first waypoint of each path that is nearest to `point`.
///
/// Empty paths are skipped. Equidistant candidates resolve to the earliest
/// path, since `min_by` keeps the first of equal elements.
#[must_use]
pub fn closest_waypoint(paths: &[Vec<Waypoint>], point: Point2) -> Option<&Waypoint> {
    paths
        .iter()
        .filter_map(|path| path.first())
        .map(|wp| (wp.dist_to(point), wp))
        .min_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, wp)| wp)
}

/// Encodes raw environment state into an [`Observation`].
///
/// # Errors
///
/// [`EncodingError`] for non-finite state, missing candidate paths, a
/// non-positive lane width or an out-of-range heading error;
/// [`ConfigurationError::LaneIndexOutOfRange`] when the closest waypoint's
/// lane does not fit the declared lane enumeration.
pub fn encode(state: &EnvObservation) -> Result<Observation, EvalError> {
    let ego = &state.ego;
    if !ego.position.is_finite() {
        return Err(EncodingError::NonFinite("ego position").into());
    }
    if !ego.heading.is_finite() {
        return Err(EncodingError::NonFinite("ego heading").into());
    }

    let closest = closest_waypoint(&state.waypoint_paths, ego.position)
        .ok_or(EncodingError::NoCandidatePaths)?;

    let lane_hwidth = closest.lane_width * 0.5;
    if !(lane_hwidth.is_finite() && lane_hwidth > 0.0) {
        return Err(EncodingError::NonPositiveLaneWidth {
            lane_width: closest.lane_width,
        }
        .into());
    }
    let signed_dist_from_center = closest.signed_lateral_error(ego.position);
    if !signed_dist_from_center.is_finite() {
        return Err(EncodingError::NonFinite("lateral error").into());
    }

    let angle_error = closest.relative_heading(ego.heading);
    if !(-180.0..=180.0).contains(&angle_error) {
        return Err(EncodingError::AngleOutOfRange { degrees: angle_error }.into());
    }

    if closest.lane_index >= MAX_LANES {
        return Err(ConfigurationError::LaneIndexOutOfRange {
            lane_index: closest.lane_index,
            max_lanes: MAX_LANES,
        }
        .into());
    }

    Ok(Observation {
        distance_from_center: [signed_dist_from_center / lane_hwidth],
        angle_error: [angle_error],
        speed: [ego.speed],
        steering: [ego.steering],
        lane_idx: closest.lane_index,
    })
}
