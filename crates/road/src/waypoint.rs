//! # Lane-centre waypoints
//!
//! A [`Waypoint`] is a sample of a lane's centreline. Besides its position it
//! carries the heading of the lane at that point, the full lane width and the
//! lane's index counted from the right-most lane.

use crate::types::{Heading, Point2};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub pos: Point2,
    pub heading: Heading,
    /// Full width of the lane in metres.
    pub lane_width: f64,
    pub lane_index: usize,
    pub speed_limit: f64,
}

impl Waypoint {
    #[must_use]
    pub fn new(pos: Point2, heading: Heading, lane_width: f64, lane_index: usize) -> Self {
        Self {
            pos,
            heading,
            lane_width,
            lane_index,
            speed_limit: f64::INFINITY,
        }
    }

    #[must_use]
    pub fn with_speed_limit(mut self, speed_limit: f64) -> Self {
        self.speed_limit = speed_limit;
        self
    }

    /// Straight-line distance from the waypoint to `point`.
    #[must_use]
    pub fn dist_to(&self, point: Point2) -> f64 {
        self.pos.distance(point)
    }

    /// Perpendicular distance from the lane centreline through this waypoint
    /// to `point`.
    ///
    /// Positive when `point` lies to the left of the direction of travel,
    /// negative to the right.
    #[must_use]
    pub fn signed_lateral_error(&self, point: Point2) -> f64 {
        self.heading.direction_vector().cross(point - self.pos)
    }

    /// Heading of the lane relative to `heading`, in degrees within
    /// `[-180, 180)`.
    #[must_use]
    pub fn relative_heading(&self, heading: Heading) -> f64 {
        self.heading.relative_to(heading).to_degrees()
    }
}
