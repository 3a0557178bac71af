//! 3-D Points

use super::{max, min, Axis, Float, Vector3};
use num_traits::{Num, Zero};
use std::ops::{Add, Index, Mul, Sub};

/// A 3-D point containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point3<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,

    /// Z-coordinate.
    pub z: T,
}

/// 3-D point containing `Float` values.
pub type Point3f = Point3<Float>;

impl<T: Num> Point3<T> {
    /// Creates a new 3-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Creates a new 3-D point at the origin.
    pub fn zero() -> Self
    where
        T: Zero,
    {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    /// Returns the squared distance to another point.
    ///
    /// * `other` - The other point.
    pub fn distance_squared(&self, other: Self) -> T
    where
        T: Copy,
    {
        (*self - other).length_squared()
    }

    /// Returns the distance to another point.
    ///
    /// * `other` - The other point.
    pub fn distance(&self, other: Self) -> T
    where
        T: num_traits::Float,
    {
        (*self - other).length()
    }

    /// Return the component-wise minimum coordinate values with another point.
    ///
    /// * `other` - The other point.
    pub fn min(&self, other: &Self) -> Self
    where
        T: PartialOrd + Copy,
    {
        Self::new(
            min(self.x, other.x),
            min(self.y, other.y),
            min(self.z, other.z),
        )
    }

    /// Return the component-wise maximum coordinate values with another point.
    ///
    /// * `other` - The other point.
    pub fn max(&self, other: &Self) -> Self
    where
        T: PartialOrd + Copy,
    {
        Self::new(
            max(self.x, other.x),
            max(self.y, other.y),
            max(self.z, other.z),
        )
    }
}

impl<T: Num> Add<Vector3<T>> for Point3<T> {
    type Output = Point3<T>;

    fn add(self, v: Vector3<T>) -> Self::Output {
        Point3::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl<T: Num> Add for Point3<T> {
    type Output = Point3<T>;

    fn add(self, p: Point3<T>) -> Self::Output {
        Point3::new(self.x + p.x, self.y + p.y, self.z + p.z)
    }
}

impl<T: Num> Sub for Point3<T> {
    type Output = Vector3<T>;

    fn sub(self, p: Point3<T>) -> Self::Output {
        Vector3::new(self.x - p.x, self.y - p.y, self.z - p.z)
    }
}

impl<T: Num> Sub<Vector3<T>> for Point3<T> {
    type Output = Point3<T>;

    fn sub(self, v: Vector3<T>) -> Self::Output {
        Point3::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl<T: Num + Copy> Mul<T> for Point3<T> {
    type Output = Point3<T>;

    fn mul(self, f: T) -> Self::Output {
        Point3::new(f * self.x, f * self.y, f * self.z)
    }
}

impl Mul<Point3f> for Float {
    type Output = Point3f;

    fn mul(self, p: Point3f) -> Point3f {
        Point3f::new(self * p.x, self * p.y, self * p.z)
    }
}

impl<T> Index<Axis> for Point3<T> {
    type Output = T;

    fn index(&self, axis: Axis) -> &Self::Output {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

impl<T> Index<usize> for Point3<T> {
    type Output = T;

    fn index(&self, axis: usize) -> &Self::Output {
        &self[Axis::from(axis)]
    }
}

impl<T> From<Vector3<T>> for Point3<T> {
    fn from(v: Vector3<T>) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}
