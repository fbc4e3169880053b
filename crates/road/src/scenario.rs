//! # Scenario files
//!
//! Scenarios are JSON documents describing a straight multi-lane road and the
//! vehicle's starting conditions. Every field has a default, so `{}` is the
//! three-lane road used for smoke runs.
//!
//! ```json
//! { "name": "3lane", "lanes": 3, "lane_width": 3.2, "start_lane": 1 }
//! ```

use crate::error::RoadError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    pub name: String,
    pub lanes: usize,
    /// Full lane width in metres.
    pub lane_width: f64,
    /// Road length in metres.
    pub length: f64,
    pub speed_limit: f64,
    pub start_lane: usize,
    /// Lateral offset from the start lane's centre, positive to the left.
    pub start_offset: f64,
    pub start_speed: f64,
    /// Half-width of the uniform noise added to the start offset.
    pub spawn_jitter: f64,
    pub dt: f64,
    /// Hard cap on steps per episode.
    pub max_step_length: usize,
    /// Waypoints per lane path.
    pub lookahead: usize,
    pub waypoint_spacing: f64,
    pub vehicle: VehicleParams,
}

/// Parameters of the kinematic bicycle model.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VehicleParams {
    pub wheel_base: f64,
    /// Acceleration at full throttle, m/s².
    pub max_accel: f64,
    /// Deceleration at full brake, m/s².
    pub max_decel: f64,
    /// Largest front wheel angle the vehicle can reach, degrees.
    pub max_steer_deg: f64,
    /// Speed lost per second to rolling resistance, as a fraction.
    pub drag: f64,
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self {
            wheel_base: 2.5,
            max_accel: 3.0,
            max_decel: 8.0,
            max_steer_deg: 45.0,
            drag: 0.02,
        }
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "3lane".to_string(),
            lanes: 3,
            lane_width: 3.2,
            length: 500.0,
            speed_limit: 20.0,
            start_lane: 1,
            start_offset: 0.0,
            start_speed: 0.0,
            spawn_jitter: 0.0,
            dt: 0.1,
            max_step_length: 10_000,
            lookahead: 20,
            waypoint_spacing: 1.0,
            vehicle: VehicleParams::default(),
        }
    }
}

impl Scenario {
    /// Parses and validates a scenario from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`RoadError::Parse`] for malformed JSON and
    /// [`RoadError::InvalidScenario`] when a field is out of range.
    pub fn from_json(json: &str) -> Result<Self, RoadError> {
        let scenario: Self = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Loads a scenario file. A directory is resolved to its `scenario.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails [`Scenario::from_json`].
    pub fn load(path: &Path) -> Result<Self, RoadError> {
        let file = if path.is_dir() {
            path.join("scenario.json")
        } else {
            path.to_path_buf()
        };
        let json = std::fs::read_to_string(&file)?;
        let scenario = Self::from_json(&json)?;
        tracing::info!(name = %scenario.name, path = %file.display(), "loaded scenario");
        Ok(scenario)
    }

    /// Checks that every parameter describes a drivable road.
    ///
    /// # Errors
    ///
    /// Returns [`RoadError::InvalidScenario`] naming the first bad field.
    pub fn validate(&self) -> Result<(), RoadError> {
        let bad = |msg: &str| Err(RoadError::InvalidScenario(msg.to_string()));
        if self.lanes == 0 {
            return bad("lanes must be at least 1");
        }
        if !positive(self.lane_width) {
            return bad("lane_width must be positive");
        }
        if !positive(self.length) {
            return bad("length must be positive");
        }
        if self.start_lane >= self.lanes {
            return bad("start_lane must be a valid lane index");
        }
        if !positive(self.dt) {
            return bad("dt must be positive");
        }
        if self.max_step_length == 0 {
            return bad("max_step_length must be at least 1");
        }
        if self.lookahead == 0 {
            return bad("lookahead must be at least 1");
        }
        if !positive(self.waypoint_spacing) {
            return bad("waypoint_spacing must be positive");
        }
        let jitter_ok = self.spawn_jitter.is_finite() && self.spawn_jitter >= 0.0;
        if !jitter_ok || !self.start_offset.is_finite() {
            return bad("spawn_jitter and start_offset must be finite, jitter non-negative");
        }
        if !positive(self.vehicle.wheel_base) {
            return bad("vehicle.wheel_base must be positive");
        }
        Ok(())
    }

    /// Width of the whole carriageway.
    #[must_use]
    pub fn road_width(&self) -> f64 {
        self.lanes as f64 * self.lane_width
    }

    /// Lateral coordinate of a lane's centreline. Lane 0 is the right-most
    /// lane and sits at the bottom of the road.
    #[must_use]
    pub fn lane_center(&self, lane: usize) -> f64 {
        (lane as f64 + 0.5) * self.lane_width
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
