//! Common

use super::abs;
use num_traits::{Num, Zero};
use std::ops::Neg;

/// Dot product interface.
pub trait Dot<V> {
    /// The result type.
    type Output: Num + Zero + Neg<Output = Self::Output> + PartialOrd + Copy;

    /// Returns the dot product.
    ///
    /// * `other` - The other vector.
    fn dot(&self, other: &V) -> Self::Output;

    /// Returns the absolute value of the dot product.
    ///
    /// * `other` - The other vector.
    fn abs_dot(&self, other: &V) -> Self::Output {
        abs(self.dot(other))
    }
}

/// Flips a vector or normal so it lies in the same hemisphere as another one.
pub trait FaceForward<V>: Dot<V> + Neg<Output = Self> + Sized + Copy {
    /// Returns `self` flipped if needed to lie in the same hemisphere as
    /// `other`.
    ///
    /// * `other` - The reference vector.
    fn face_forward(&self, other: &V) -> Self {
        if self.dot(other) < <<Self as Dot<V>>::Output as Zero>::zero() {
            -*self
        } else {
            *self
        }
    }
}

/// Union of two geometric objects.
pub trait Union<T> {
    /// Returns the union.
    ///
    /// * `other` - The other object.
    fn union(&self, other: &T) -> Self;
}
