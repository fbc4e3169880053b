//! # Declared spaces
//!
//! The observation and action spaces shared by the environment, the encoder
//! and the exported model. They must match the spaces the policy was trained
//! with.

use ml::Space;

/// The maximum number of lanes expected in any scenario.
pub const MAX_LANES: usize = 5;

/// Action components produced by the model: throttle, brake, steering.
pub const ACTION_DIM: usize = 3;

/// Model-facing steering is normalised to `[-1, 1]`; the environment takes
/// degrees in `[-ENV_STEERING_BOUND_DEG, ENV_STEERING_BOUND_DEG]`.
pub const ENV_STEERING_BOUND_DEG: f64 = 45.0;

const UNBOUNDED: f64 = 1e10;

pub const DISTANCE_FROM_CENTER: &str = "distance_from_center";
pub const ANGLE_ERROR: &str = "angle_error";
pub const SPEED: &str = "speed";
pub const STEERING: &str = "steering";
pub const LANE_IDX: &str = "lane_idx";

#[must_use]
pub fn observation_space() -> Space {
    Space::dict([
        (DISTANCE_FROM_CENTER, Space::uniform_box(-UNBOUNDED, UNBOUNDED, vec![1])),
        (ANGLE_ERROR, Space::uniform_box(-180.0, 180.0, vec![1])),
        (SPEED, Space::uniform_box(-UNBOUNDED, UNBOUNDED, vec![1])),
        (STEERING, Space::uniform_box(-UNBOUNDED, UNBOUNDED, vec![1])),
        (LANE_IDX, Space::Discrete { n: MAX_LANES }),
    ])
}

/// Bounds of the raw model output (pre-scale).
#[must_use]
pub fn action_space() -> Space {
    Space::bounded(vec![0.0, 0.0, -1.0], vec![1.0, 1.0, 1.0])
}

/// Bounds of the decoded action submitted to the environment (post-scale).
#[must_use]
pub fn env_action_space() -> Space {
    Space::bounded(
        vec![0.0, 0.0, -ENV_STEERING_BOUND_DEG],
        vec![1.0, 1.0, ENV_STEERING_BOUND_DEG],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observation_space_flattens_to_nine_features() {
        // four 1-element boxes plus a one-hot over MAX_LANES
        assert_eq!(observation_space().flat_dim(), 4 + MAX_LANES);
    }

    #[test]
    fn action_spaces_share_dimension() {
        assert_eq!(action_space().flat_dim(), ACTION_DIM);
        assert_eq!(env_action_space().flat_dim(), ACTION_DIM);
    }
}
