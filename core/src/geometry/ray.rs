//! Ray

use super::{Float, Point3f, Vector3f, INFINITY};
use crate::medium::ArcMedium;

/// A semi-infinite line specified by its origin and direction.
#[derive(Clone, Default)]
pub struct Ray {
    /// Origin.
    pub o: Point3f,

    /// Direction.
    pub d: Vector3f,

    /// Maximum extent of the ray.
    pub t_max: Float,

    /// Time value.
    pub time: Float,

    /// The medium containing the ray origin.
    pub medium: Option<ArcMedium>,
}

impl Ray {
    /// Returns a ray.
    ///
    /// * `o`      - Origin.
    /// * `d`      - Direction.
    /// * `t_max`  - Maximum extent of the ray.
    /// * `time`   - Time value.
    /// * `medium` - The medium containing the ray origin.
    pub fn new(o: Point3f, d: Vector3f, t_max: Float, time: Float, medium: Option<ArcMedium>) -> Self {
        Self {
            o,
            d,
            t_max,
            time,
            medium,
        }
    }

    /// Returns an unbounded ray in vacuum.
    ///
    /// * `o` - Origin.
    /// * `d` - Direction.
    pub fn unbounded(o: Point3f, d: Vector3f) -> Self {
        Self::new(o, d, INFINITY, 0.0, None)
    }

    /// Returns the position along the ray at a given parametric distance.
    ///
    /// * `t` - Parameter along the ray.
    pub fn at(&self, t: Float) -> Point3f {
        self.o + self.d * t
    }
}
