use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::ops::{Add, AddAssign, Mul, Sub};

/// A position or displacement on the road plane, in metres.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    /// Z component of the 3-D cross product `self × other`.
    #[must_use]
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Wraps an angle in radians into `[-π, π)`.
#[must_use]
pub fn wrap_angle(radians: f64) -> f64 {
    (radians + PI).rem_euclid(TAU) - PI
}

/// Direction of travel in radians, counter-clockwise from the +x axis.
///
/// Values are kept wrapped into `[-π, π)` so that two headings describing the
/// same direction compare equal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Heading(f64);

impl Heading {
    #[must_use]
    pub fn from_radians(radians: f64) -> Self {
        Self(wrap_angle(radians))
    }

    #[must_use]
    pub fn from_degrees(degrees: f64) -> Self {
        Self::from_radians(degrees.to_radians())
    }

    #[must_use]
    pub fn radians(self) -> f64 {
        self.0
    }

    /// Unit vector pointing along the heading.
    #[must_use]
    pub fn direction_vector(self) -> Point2 {
        Point2::new(self.0.cos(), self.0.sin())
    }

    /// Signed angle from `other` to `self`, wrapped into `[-π, π)`.
    #[must_use]
    pub fn relative_to(self, other: Self) -> f64 {
        wrap_angle(self.0 - other.0)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Add<f64> for Heading {
    type Output = Self;
    fn add(self, rhs: f64) -> Self {
        Self::from_radians(self.0 + rhs)
    }
}
