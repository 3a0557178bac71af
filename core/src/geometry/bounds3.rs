//! 3-D Axis Aligned Bounding Boxes.

use super::common::*;
use super::{lerp, Float, Point3, Point3f, Vector3};
use num_traits::{Bounded, Num};

/// 3-D Axis Aligned Bounding Box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds3<T> {
    /// Minimum bounds.
    pub p_min: Point3<T>,

    /// Maximum bounds.
    pub p_max: Point3<T>,
}

/// 3-D bounding box containing `Float` points.
pub type Bounds3f = Bounds3<Float>;

impl<T: Num + Bounded + PartialOrd + Copy> Bounds3<T> {
    /// Creates a new 3-D bounding box from 2 points. The minimum and maximum
    /// bounds are used for each coordinate axis.
    ///
    /// * `p1` - First point.
    /// * `p2` - Second point.
    pub fn new(p1: Point3<T>, p2: Point3<T>) -> Self {
        Self {
            p_min: p1.min(&p2),
            p_max: p1.max(&p2),
        }
    }

    /// Returns an empty bounding box; unioning anything with it yields that
    /// thing.
    pub fn empty() -> Self {
        Self {
            p_min: Point3::new(T::max_value(), T::max_value(), T::max_value()),
            p_max: Point3::new(T::min_value(), T::min_value(), T::min_value()),
        }
    }

    /// Returns true if the box contains no volume.
    pub fn is_empty(&self) -> bool {
        self.p_min.x > self.p_max.x || self.p_min.y > self.p_max.y || self.p_min.z > self.p_max.z
    }

    /// Returns the vector along the box diagonal from the minimum point to
    /// the maximum point.
    pub fn diagonal(&self) -> Vector3<T> {
        self.p_max - self.p_min
    }

    /// Returns the continuous position of a point relative to the corners of
    /// the box, where a point at the minimum corner has offset `(0, 0, 0)`
    /// and a point at the maximum corner has offset `(1, 1, 1)`.
    ///
    /// * `p` - The point.
    pub fn offset(&self, p: &Point3<T>) -> Vector3<T> {
        let mut o = *p - self.p_min;
        if self.p_max.x > self.p_min.x {
            o.x = o.x / (self.p_max.x - self.p_min.x);
        }
        if self.p_max.y > self.p_min.y {
            o.y = o.y / (self.p_max.y - self.p_min.y);
        }
        if self.p_max.z > self.p_min.z {
            o.z = o.z / (self.p_max.z - self.p_min.z);
        }
        o
    }

    /// Returns true if a point is inside the bounding box.
    ///
    /// * `p` - The point.
    pub fn inside(&self, p: &Point3<T>) -> bool {
        p.x >= self.p_min.x
            && p.x <= self.p_max.x
            && p.y >= self.p_min.y
            && p.y <= self.p_max.y
            && p.z >= self.p_min.z
            && p.z <= self.p_max.z
    }
}

impl Bounds3f {
    /// Linearly interpolates between the corners of the box by the given
    /// amount in each dimension.
    ///
    /// * `t` - Interpolation parameter in each dimension.
    pub fn lerp(&self, t: &Point3f) -> Point3f {
        Point3f::new(
            lerp(t.x, self.p_min.x, self.p_max.x),
            lerp(t.y, self.p_min.y, self.p_max.y),
            lerp(t.z, self.p_min.z, self.p_max.z),
        )
    }
}

impl<T: Num + Bounded + PartialOrd + Copy> Default for Bounds3<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Num + Bounded + PartialOrd + Copy> Union<Point3<T>> for Bounds3<T> {
    /// Return a bounding box containing itself and a point.
    ///
    /// * `other` - The point.
    fn union(&self, other: &Point3<T>) -> Self {
        Self {
            p_min: self.p_min.min(other),
            p_max: self.p_max.max(other),
        }
    }
}

impl<T: Num + Bounded + PartialOrd + Copy> Union<Bounds3<T>> for Bounds3<T> {
    /// Return a bounding box containing both bounding boxes.
    ///
    /// * `other` - The other bounding box.
    fn union(&self, other: &Bounds3<T>) -> Self {
        Self {
            p_min: self.p_min.min(&other.p_min),
            p_max: self.p_max.max(&other.p_max),
        }
    }
}
