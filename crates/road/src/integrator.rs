//! # Vehicle Integration
//!
//! Explicit Euler integration of a kinematic bicycle model. The rear axle is
//! the reference point, so the yaw rate is `v / L * tan(δ)`.

use crate::env::{Controls, EgoState};
use crate::scenario::VehicleParams;

/// Advance `ego` by `dt` seconds under `controls`.
///
/// Pedal inputs are clamped to `[0, 1]` and the steering command to the
/// vehicle's mechanical limit; speed never becomes negative.
pub fn integrate_vehicle(ego: &mut EgoState, controls: &Controls, params: &VehicleParams, dt: f64) {
    let throttle = controls.throttle.clamp(0.0, 1.0);
    let brake = controls.brake.clamp(0.0, 1.0);
    let limit = params.max_steer_deg.abs();
    let steer = controls.steering_deg.clamp(-limit, limit).to_radians();

    let accel = throttle * params.max_accel - brake * params.max_decel;
    let speed = (ego.speed + accel * dt) * (1.0 - params.drag * dt);
    ego.speed = speed.max(0.0);
    ego.steering = steer;

    let yaw_rate = ego.speed / params.wheel_base * steer.tan();
    ego.heading = ego.heading + yaw_rate * dt;
    ego.position += ego.heading.direction_vector() * (ego.speed * dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Heading, Point2};

    fn ego_at_rest() -> EgoState {
        EgoState {
            position: Point2::ZERO,
            heading: Heading::default(),
            speed: 0.0,
            steering: 0.0,
        }
    }

    #[test]
    fn brake_never_reverses() {
        let mut ego = ego_at_rest();
        let params = VehicleParams::default();
        integrate_vehicle(&mut ego, &Controls::new(0.0, 1.0, 0.0), &params, 0.1);
        assert!(ego.speed.abs() < f64::EPSILON);
        assert!(ego.position.distance(Point2::ZERO) < f64::EPSILON);
    }

    #[test]
    fn left_steer_turns_counter_clockwise() {
        let mut ego = ego_at_rest();
        ego.speed = 10.0;
        let params = VehicleParams::default();
        for _ in 0..5 {
            integrate_vehicle(&mut ego, &Controls::new(0.0, 0.0, 10.0), &params, 0.1);
        }
        assert!(ego.heading.radians() > 0.0);
        assert!(ego.position.y > 0.0);
    }

    #[test]
    fn steering_is_limited_mechanically() {
        let mut ego = ego_at_rest();
        let params = VehicleParams::default();
        integrate_vehicle(&mut ego, &Controls::new(0.0, 0.0, 90.0), &params, 0.1);
        assert!((ego.steering - params.max_steer_deg.to_radians()).abs() < 1e-12);
    }
}
