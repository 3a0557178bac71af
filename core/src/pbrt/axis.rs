//! Axis

/// Axis enumeration
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Axis {
    #[default]
    X = 0,
    Y = 1,
    Z = 2,
}

impl From<usize> for Axis {
    fn from(i: usize) -> Self {
        match i {
            0 => Axis::X,
            1 => Axis::Y,
            2 => Axis::Z,
            _ => panic!("invalid axis value"),
        }
    }
}

impl From<Axis> for usize {
    fn from(axis: Axis) -> usize {
        axis as usize
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
use proptest::prelude::*;

#[cfg(test)]
pub fn axis_3d_strategy() -> impl Strategy<Value = Axis> {
    prop_oneof![Just(Axis::X), Just(Axis::Y), Just(Axis::Z)]
}
