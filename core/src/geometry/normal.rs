//! 3-D normals

use super::common::*;
use super::{Float, Vector3};
use num_traits::Num;
use std::ops::{Mul, Neg};

/// A surface normal. Unlike `Vector3` it is not necessarily normalized and
/// only supports the operations shading code needs.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Normal3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

/// 3-D normal containing `Float` values.
pub type Normal3f = Normal3<Float>;

impl Normal3f {
    /// Zero normal.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
}

impl<T: Num> Normal3<T> {
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Returns the square of the normal's length.
    pub fn length_squared(&self) -> T
    where
        T: Copy,
    {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns the unit normal.
    pub fn normalize(&self) -> Self
    where
        T: num_traits::Float,
    {
        let inv = T::one() / self.length_squared().sqrt();
        Self::new(self.x * inv, self.y * inv, self.z * inv)
    }
}

macro_rules! dot_with {
    ($other: ident) => {
        impl<T: Num + Neg<Output = T> + PartialOrd + Copy> Dot<$other<T>> for Normal3<T> {
            type Output = T;

            fn dot(&self, other: &$other<T>) -> T {
                self.x * other.x + self.y * other.y + self.z * other.z
            }
        }
    };
}

dot_with!(Vector3);
dot_with!(Normal3);

impl<T: Num + Neg<Output = T> + PartialOrd + Copy> FaceForward<Vector3<T>> for Normal3<T> {}

impl<T: Num + Copy> Mul<T> for Normal3<T> {
    type Output = Normal3<T>;

    fn mul(self, f: T) -> Self::Output {
        Self::new(self.x * f, self.y * f, self.z * f)
    }
}

impl<T: Num + Neg<Output = T>> Neg for Normal3<T> {
    type Output = Normal3<T>;

    fn neg(self) -> Self::Output {
        Self::Output::new(-self.x, -self.y, -self.z)
    }
}

impl<T> From<Vector3<T>> for Normal3<T> {
    fn from(v: Vector3<T>) -> Self {
        let Vector3 { x, y, z } = v;
        Self { x, y, z }
    }
}
