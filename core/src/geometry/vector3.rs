//! 3-D Vectors

use super::common::*;
use super::{Axis, Float, Normal3, Point3};
use num_traits::{Num, Zero};
use std::ops::{Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 3-D direction or displacement.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

/// 3-D vector containing `Float` values.
pub type Vector3f = Vector3<Float>;

impl<T: Num> Vector3<T> {
    /// Creates a new 3-D vector.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Returns the zero vector.
    pub fn zero() -> Self
    where
        T: Zero,
    {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    pub fn length_squared(&self) -> T
    where
        T: Copy,
    {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn length(&self) -> T
    where
        T: num_traits::Float,
    {
        self.length_squared().sqrt()
    }

    /// Returns the vector scaled to unit length. The vector must not be zero.
    pub fn normalize(&self) -> Self
    where
        T: num_traits::Float,
    {
        *self / self.length()
    }

    /// Returns the cross product `self × other`.
    ///
    /// * `other` - The other vector.
    pub fn cross(&self, other: &Self) -> Self
    where
        T: Copy,
    {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Returns the axis along which the vector has its largest coordinate.
    pub fn max_dimension(&self) -> Axis
    where
        T: PartialOrd + Copy,
    {
        let xy = if self.x > self.y { Axis::X } else { Axis::Y };
        if self[xy] > self.z {
            xy
        } else {
            Axis::Z
        }
    }
}

macro_rules! dot_with {
    ($other: ident) => {
        impl<T: Num + Neg<Output = T> + PartialOrd + Copy> Dot<$other<T>> for Vector3<T> {
            type Output = T;

            fn dot(&self, other: &$other<T>) -> T {
                self.x * other.x + self.y * other.y + self.z * other.z
            }
        }

        impl<T: Num + Neg<Output = T> + PartialOrd + Copy> FaceForward<$other<T>> for Vector3<T> {}
    };
}

dot_with!(Vector3);
dot_with!(Normal3);

macro_rules! componentwise {
    ($op: ident, $fn: ident, $op_assign: ident, $fn_assign: ident) => {
        impl<T: Num> $op for Vector3<T> {
            type Output = Self;

            fn $fn(self, other: Self) -> Self {
                Self::new(self.x.$fn(other.x), self.y.$fn(other.y), self.z.$fn(other.z))
            }
        }

        impl<T: Num + Copy> $op_assign for Vector3<T> {
            fn $fn_assign(&mut self, other: Self) {
                *self = (*self).$fn(other);
            }
        }
    };
}

componentwise!(Add, add, AddAssign, add_assign);
componentwise!(Sub, sub, SubAssign, sub_assign);

impl<T: Num + Copy> Mul<T> for Vector3<T> {
    type Output = Self;

    fn mul(self, f: T) -> Self {
        Self::new(self.x * f, self.y * f, self.z * f)
    }
}

impl Mul<Vector3f> for Float {
    type Output = Vector3f;

    fn mul(self, v: Vector3f) -> Vector3f {
        v * self
    }
}

impl<T: Num + Copy> MulAssign<T> for Vector3<T> {
    fn mul_assign(&mut self, f: T) {
        *self = *self * f;
    }
}

impl<T: Num + Copy> Div<T> for Vector3<T> {
    type Output = Self;

    /// Multiplies by the reciprocal; `f` must not be zero.
    fn div(self, f: T) -> Self {
        debug_assert!(!f.is_zero());
        self * (T::one() / f)
    }
}

impl<T: Num + Copy> DivAssign<T> for Vector3<T> {
    fn div_assign(&mut self, f: T) {
        *self = *self / f;
    }
}

impl<T: Num + Neg<Output = T>> Neg for Vector3<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl<T> Index<Axis> for Vector3<T> {
    type Output = T;

    fn index(&self, axis: Axis) -> &Self::Output {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

impl<T> Index<usize> for Vector3<T> {
    type Output = T;

    fn index(&self, axis: usize) -> &Self::Output {
        &self[Axis::from(axis)]
    }
}

impl<T> From<Point3<T>> for Vector3<T> {
    /// Vector from the origin to `p`.
    fn from(p: Point3<T>) -> Self {
        let Point3 { x, y, z } = p;
        Self { x, y, z }
    }
}

impl<T> From<Normal3<T>> for Vector3<T> {
    fn from(n: Normal3<T>) -> Self {
        let Normal3 { x, y, z } = n;
        Self { x, y, z }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
