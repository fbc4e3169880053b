//! # Action decoding
//!
//! Raw model output is `(throttle, brake, steering)` with steering normalised
//! to `[-1, 1]`. Decoding rounds every component to four decimal places and
//! converts steering to degrees.
//!
//! Rounding is correctly rounded to the nearest multiple of `10^-4` of the
//! exact binary value, with exact ties going to even. `0.12345` is stored
//! slightly above the tie and decodes to `0.1235`; `0.03125` is an exact tie
//! and decodes to `0.0312`.

use crate::error::InferenceError;
use crate::spaces::{self, ACTION_DIM};
use ml::SpaceValue;
use road::Controls;
use serde::{Deserialize, Serialize};

/// Degrees of front wheel angle per unit of normalised steering.
pub const STEERING_SCALE_DEG: f64 = 45.0;

const DECIMAL_SCALE: f64 = 1e4;

/// Above this every scaled value is an integer and nothing is left to round.
const EXACT_INT_LIMIT: f64 = 4_503_599_627_370_496.0; // 2^52

/// Rounds to four decimal places.
///
/// The decision is made on the exact value of `value * 10^4`, not on its
/// rounded `f64` product: the product's rounding error is recovered with a
/// fused multiply-add and added back before comparing against the midpoint.
/// Only exact ties go to even. Symmetric in sign.
#[must_use]
pub fn round4(value: f64) -> f64 {
    let magnitude = value.abs();
    let scaled = magnitude * DECIMAL_SCALE;
    if !scaled.is_finite() || scaled >= EXACT_INT_LIMIT {
        return value;
    }
    // exact: scaled + err == magnitude * 10^4
    let err = magnitude.mul_add(DECIMAL_SCALE, -scaled);
    let floor = scaled.floor();
    let past_midpoint = (scaled - floor - 0.5) + err;
    let k = if past_midpoint > 0.0 {
        floor + 1.0
    } else if past_midpoint < 0.0 || floor % 2.0 == 0.0 {
        floor
    } else {
        floor + 1.0
    };
    (k / DECIMAL_SCALE).copysign(value)
}

/// Unprocessed model output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawAction {
    pub throttle: f64,
    pub brake: f64,
    pub steering: f64,
}

impl RawAction {
    #[must_use]
    pub const fn new(throttle: f64, brake: f64, steering: f64) -> Self {
        Self {
            throttle,
            brake,
            steering,
        }
    }

    /// Reads one output row of the model.
    ///
    /// # Errors
    ///
    /// [`InferenceError::OutputArity`] unless the row has exactly three
    /// components.
    pub fn from_row(row: &[f32]) -> Result<Self, InferenceError> {
        match *row {
            [throttle, brake, steering] => Ok(Self::new(
                f64::from(throttle),
                f64::from(brake),
                f64::from(steering),
            )),
            _ => Err(InferenceError::OutputArity {
                expected: ACTION_DIM,
                found: row.len(),
            }),
        }
    }

    #[must_use]
    pub fn to_array(self) -> [f64; ACTION_DIM] {
        [self.throttle, self.brake, self.steering]
    }

    /// Whether the action lies inside [`spaces::action_space`].
    #[must_use]
    pub fn within_bounds(self) -> bool {
        spaces::action_space().contains(&SpaceValue::Array(self.to_array().to_vec()))
    }
}

/// Environment-ready action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub throttle: f64,
    pub brake: f64,
    pub steering_degrees: f64,
}

impl From<Action> for Controls {
    fn from(action: Action) -> Self {
        Controls::new(action.throttle, action.brake, action.steering_degrees)
    }
}

/// What the decoder does with raw actions outside the declared action space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampMode {
    /// Pass values through; the model's output layer is trusted to respect
    /// the bounds. Violations are logged.
    #[default]
    Trust,
    /// Clamp each component into the action space before rounding.
    Clamp,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ActionDecoder {
    pub mode: ClampMode,
}

impl ActionDecoder {
    #[must_use]
    pub const fn new(mode: ClampMode) -> Self {
        Self { mode }
    }

    #[must_use]
    pub fn decode(&self, raw: RawAction) -> Action {
        let raw = if raw.within_bounds() {
            raw
        } else {
            match self.mode {
                ClampMode::Trust => {
                    tracing::warn!(?raw, "raw action outside the declared action space");
                    raw
                }
                ClampMode::Clamp => {
                    let c = spaces::action_space().clip(&raw.to_array());
                    RawAction::new(c[0], c[1], c[2])
                }
            }
        };
        decode(raw)
    }
}

/// Rounds throttle and brake and converts steering to degrees, with no
/// bounds handling.
#[must_use]
pub fn decode(raw: RawAction) -> Action {
    Action {
        throttle: round4(raw.throttle),
        brake: round4(raw.brake),
        steering_degrees: round4(raw.steering) * STEERING_SCALE_DEG,
    }
}
