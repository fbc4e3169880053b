//! # Lane Simulation Core
//!
//! [`LaneSim`] drives one vehicle along a straight road that runs in the +x
//! direction. Lanes are stacked along +y with lane 0 at the bottom. The base
//! reward is the distance covered along the road during the step.

use crate::env::{Controls, DrivingEnv, EgoState, EnvObservation, StepInfo, Transition};
use crate::error::RoadError;
use crate::integrator::integrate_vehicle;
use crate::scenario::Scenario;
use crate::types::{Heading, Point2};
use crate::waypoint::Waypoint;

/// Main lane simulation container
pub struct LaneSim {
    scenario: Scenario,
    ego: EgoState,
    rng: fastrand::Rng,
    step_count: usize,
    distance_travelled: f64,
    episode_active: bool,
    closed: bool,
}

impl LaneSim {
    /// Create a simulation for `scenario`, seeding the spawn noise with `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`RoadError::InvalidScenario`] if the scenario fails validation.
    pub fn new(scenario: Scenario, seed: u64) -> Result<Self, RoadError> {
        scenario.validate()?;
        let ego = Self::spawn_state(&scenario, 0.0);
        Ok(Self {
            scenario,
            ego,
            rng: fastrand::Rng::with_seed(seed),
            step_count: 0,
            distance_travelled: 0.0,
            episode_active: false,
            closed: false,
        })
    }

    #[must_use]
    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    #[must_use]
    pub fn ego(&self) -> &EgoState {
        &self.ego
    }

    /// Overwrite the vehicle state, e.g. to place it at a given offset in tests.
    pub fn set_ego(&mut self, ego: EgoState) {
        self.ego = ego;
    }

    fn spawn_state(scenario: &Scenario, noise: f64) -> EgoState {
        let y = scenario.lane_center(scenario.start_lane) + scenario.start_offset + noise;
        EgoState {
            position: Point2::new(0.0, y),
            heading: Heading::default(),
            speed: scenario.start_speed,
            steering: 0.0,
        }
    }

    /// Builds one waypoint path per lane, each starting at the vehicle's
    /// projection onto the road axis.
    #[must_use]
    pub fn observe(&self) -> EnvObservation {
        let s = &self.scenario;
        let start = self.ego.position.x.clamp(0.0, s.length);
        let remaining = ((s.length - start) / s.waypoint_spacing).floor();
        // At least the projection itself, even past the end of the road.
        let count = (remaining.max(0.0) as usize + 1).min(s.lookahead);

        let waypoint_paths = (0..s.lanes)
            .map(|lane| {
                let y = s.lane_center(lane);
                (0..count)
                    .map(|i| {
                        let x = start + i as f64 * s.waypoint_spacing;
                        Waypoint::new(Point2::new(x, y), Heading::default(), s.lane_width, lane)
                            .with_speed_limit(s.speed_limit)
                    })
                    .collect()
            })
            .collect();

        EnvObservation {
            ego: self.ego,
            waypoint_paths,
        }
    }

    fn is_off_road(&self) -> bool {
        let y = self.ego.position.y;
        y < 0.0 || y > self.scenario.road_width()
    }
}

impl DrivingEnv for LaneSim {
    fn reset(&mut self) -> Result<EnvObservation, RoadError> {
        if self.closed {
            return Err(RoadError::Closed);
        }
        let jitter = self.scenario.spawn_jitter;
        let noise = if jitter > 0.0 {
            (self.rng.f64() * 2.0 - 1.0) * jitter
        } else {
            0.0
        };
        self.ego = Self::spawn_state(&self.scenario, noise);
        self.step_count = 0;
        self.distance_travelled = 0.0;
        self.episode_active = true;
        tracing::debug!(scenario = %self.scenario.name, y = self.ego.position.y, "episode reset");
        Ok(self.observe())
    }

    fn step(&mut self, controls: &Controls) -> Result<Transition, RoadError> {
        if self.closed {
            return Err(RoadError::Closed);
        }
        if !self.episode_active {
            return Err(RoadError::NotReset);
        }
        if !controls.is_finite() {
            return Err(RoadError::InvalidControls {
                throttle: controls.throttle,
                brake: controls.brake,
                steering_deg: controls.steering_deg,
            });
        }

        let old_x = self.ego.position.x;
        integrate_vehicle(&mut self.ego, controls, &self.scenario.vehicle, self.scenario.dt);
        let reward = self.ego.position.x - old_x;
        self.distance_travelled += reward;
        self.step_count += 1;

        let off_road = self.is_off_road();
        let reached_goal = self.ego.position.x >= self.scenario.length;
        let done = off_road || reached_goal || self.step_count >= self.scenario.max_step_length;
        if done {
            self.episode_active = false;
            tracing::debug!(
                step = self.step_count,
                off_road,
                reached_goal,
                "episode finished"
            );
        }

        Ok(Transition {
            observation: self.observe(),
            reward,
            done,
            info: StepInfo {
                step: self.step_count,
                off_road,
                reached_goal,
                distance_travelled: self.distance_travelled,
            },
        })
    }

    fn close(&mut self) {
        if !self.closed {
            tracing::info!(scenario = %self.scenario.name, "closing lane simulation");
        }
        self.closed = true;
        self.episode_active = false;
    }
}
