#![allow(dead_code)]

use agent::{Agent, InferenceError, Observation, RawAction};
use road::{
    Controls, DrivingEnv, EgoState, EnvObservation, Heading, Point2, RoadError, StepInfo,
    Transition, Waypoint,
};
use std::collections::VecDeque;

pub const LANE_WIDTH: f64 = 3.2;

pub fn lane_center(lane: usize) -> f64 {
    (lane as f64 + 0.5) * LANE_WIDTH
}

pub fn ego_at(x: f64, y: f64, heading_deg: f64) -> EgoState {
    EgoState {
        position: Point2::new(x, y),
        heading: Heading::from_degrees(heading_deg),
        speed: 10.0,
        steering: 0.0,
    }
}

/// Straight eastbound road with `lanes` lanes, one three-waypoint path per
/// lane starting at the ego's x.
pub fn straight_road(ego: EgoState, lanes: usize) -> EnvObservation {
    let waypoint_paths = (0..lanes)
        .map(|lane| {
            (0..3)
                .map(|i| {
                    Waypoint::new(
                        Point2::new(ego.position.x + f64::from(i), lane_center(lane)),
                        Heading::from_radians(0.0),
                        LANE_WIDTH,
                        lane,
                    )
                })
                .collect()
        })
        .collect();
    EnvObservation { ego, waypoint_paths }
}

/// Ego on the centre of lane 1, aligned with the road.
pub fn centered() -> EnvObservation {
    straight_road(ego_at(0.0, lane_center(1), 0.0), 3)
}

/// Replays a fixed list of `(observation, base reward, done)` steps.
pub struct ScriptedEnv {
    initial: EnvObservation,
    script: VecDeque<(EnvObservation, f64, bool)>,
    pub submitted: Vec<Controls>,
    pub resets: usize,
}

impl ScriptedEnv {
    pub fn new(initial: EnvObservation, script: Vec<(EnvObservation, f64, bool)>) -> Self {
        Self {
            initial,
            script: script.into(),
            submitted: Vec::new(),
            resets: 0,
        }
    }

    /// Every step reports `reward` from the centred state; never done.
    pub fn endless(reward: f64, steps: usize) -> Self {
        Self::new(centered(), vec![(centered(), reward, false); steps])
    }
}

impl DrivingEnv for ScriptedEnv {
    fn reset(&mut self) -> Result<EnvObservation, RoadError> {
        self.resets += 1;
        Ok(self.initial.clone())
    }

    fn step(&mut self, controls: &Controls) -> Result<Transition, RoadError> {
        self.submitted.push(*controls);
        let (observation, reward, done) = self.script.pop_front().ok_or(RoadError::NotReset)?;
        Ok(Transition {
            observation,
            reward,
            done,
            info: StepInfo {
                step: self.submitted.len(),
                ..StepInfo::default()
            },
        })
    }
}

/// Returns the same raw action for every observation.
pub struct ConstantAgent {
    pub action: RawAction,
    pub seen: Vec<Observation>,
}

impl ConstantAgent {
    pub fn new(action: RawAction) -> Self {
        Self {
            action,
            seen: Vec::new(),
        }
    }
}

impl Agent for ConstantAgent {
    fn act(&mut self, observation: &Observation) -> Result<RawAction, InferenceError> {
        self.seen.push(*observation);
        Ok(self.action)
    }
}

pub fn assert_close(got: f64, want: f64) {
    assert!((got - want).abs() < 1e-9, "{got} vs {want}");
}
