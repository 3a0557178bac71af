//! Common.

use crate::pbrt::*;
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, MulAssign, Neg, Sub};

/// Interface and helper functions for spectral values.
pub trait CoefficientSpectrum:
    Sized
    + Copy
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + Mul<Self, Output = Self>
    + MulAssign<Self>
    + Mul<Float, Output = Self>
    + MulAssign<Float>
    + Div<Float, Output = Self>
    + Neg<Output = Self>
    + Index<usize, Output = Float>
    + IndexMut<usize>
    + Clamp<Float>
{
    /// Returns the stored samples.
    fn samples(&self) -> &[Float];

    /// Returns stored samples as mutable.
    fn samples_mut(&mut self) -> &mut [Float];

    /// Returns true if either coordinate is NaN.
    fn has_nans(&self) -> bool {
        self.samples().iter().any(|v| v.is_nan())
    }

    /// Returns true if the values are zero everywhere.
    fn is_black(&self) -> bool {
        self.samples().iter().all(|v| *v == 0.0)
    }

    /// Returns the maximum sample value.
    fn max_component_value(&self) -> Float {
        let samples = self.samples();
        samples[1..].iter().fold(samples[0], |m, v| max(m, *v))
    }

    /// Applies a function to every sample value.
    ///
    /// * `f` - The function.
    fn map<F: Fn(Float) -> Float>(&self, f: F) -> Self {
        let mut s = *self;
        for v in s.samples_mut().iter_mut() {
            *v = f(*v);
        }
        s
    }

    /// Takes the square root of all sample values.
    fn sqrt(&self) -> Self {
        self.map(|v| v.sqrt())
    }

    /// Computes e^v for every sample value v.
    fn exp(&self) -> Self {
        self.map(|v| v.exp())
    }

    /// Returns the y-coefficient of XYZ colour (luminance).
    fn y(&self) -> Float;

    /// Converts RGB values to a spectral value.
    ///
    /// * `rgb` - RGB colour value.
    fn from_rgb(rgb: &[Float; 3]) -> Self;

    /// Convert the spectral value to RGB coefficients.
    fn to_rgb(&self) -> [Float; 3];
}
