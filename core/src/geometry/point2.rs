//! 2-D Points

use super::Float;
use num_traits::Num;
use std::ops::Index;

/// A 2-D point containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point2<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,
}

/// 2-D point containing `Float` values.
pub type Point2f = Point2<Float>;

impl<T: Num> Point2<T> {
    /// Creates a new 2-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T> Index<usize> for Point2<T> {
    type Output = T;

    /// Index the point by 0 for x and 1 for y.
    ///
    /// * `i` - The index.
    fn index(&self, i: usize) -> &Self::Output {
        match i {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Invalid index for Point2"),
        }
    }
}
