//! RGB Spectrum

use super::CoefficientSpectrum;
use crate::pbrt::*;
use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// Number of samples in an `RGBSpectrum`.
pub const RGB_SAMPLES: usize = 3;

/// Spectral value stored as linear RGB coefficients.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RGBSpectrum {
    /// The RGB coefficients.
    c: [Float; RGB_SAMPLES],
}

impl RGBSpectrum {
    /// Zero spectral value.
    pub const ZERO: Self = Self {
        c: [0.0; RGB_SAMPLES],
    };

    /// Spectral value with all samples set to 1.
    pub const ONE: Self = Self {
        c: [1.0; RGB_SAMPLES],
    };

    /// Create a new `RGBSpectrum` with a constant value across all channels.
    ///
    /// * `v` - Constant value.
    pub fn new(v: Float) -> Self {
        Self {
            c: [v; RGB_SAMPLES],
        }
    }

    /// Create a new `RGBSpectrum` from individual channel values.
    ///
    /// * `r` - Red.
    /// * `g` - Green.
    /// * `b` - Blue.
    pub fn rgb(r: Float, g: Float, b: Float) -> Self {
        Self { c: [r, g, b] }
    }

    /// Linearly interpolate between two spectral values.
    ///
    /// * `t`  - Parameter.
    /// * `s1` - Value at t=0.
    /// * `s2` - Value at t=1.
    pub fn lerp(t: Float, s1: &Self, s2: &Self) -> Self {
        *s1 * (1.0 - t) + *s2 * t
    }
}

impl CoefficientSpectrum for RGBSpectrum {
    fn samples(&self) -> &[Float] {
        &self.c
    }

    fn samples_mut(&mut self) -> &mut [Float] {
        &mut self.c
    }

    fn y(&self) -> Float {
        const Y_WEIGHT: [Float; 3] = [0.212671, 0.715160, 0.072169];
        Y_WEIGHT[0] * self.c[0] + Y_WEIGHT[1] * self.c[1] + Y_WEIGHT[2] * self.c[2]
    }

    fn from_rgb(rgb: &[Float; 3]) -> Self {
        Self { c: *rgb }
    }

    fn to_rgb(&self) -> [Float; 3] {
        self.c
    }
}

impl Clamp<Float> for RGBSpectrum {
    /// Clamps the values to given [low, high] interval.
    ///
    /// * `low`  - Low value.
    /// * `high` - High value.
    fn clamp(&self, low: Float, high: Float) -> Self {
        self.map(|v| clamp(v, low, high))
    }

    /// Clamps the values to [0.0, INFINITY].
    fn clamp_default(&self) -> Self {
        self.clamp(0.0, INFINITY)
    }
}

impl Add for RGBSpectrum {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::rgb(
            self.c[0] + other.c[0],
            self.c[1] + other.c[1],
            self.c[2] + other.c[2],
        )
    }
}

impl AddAssign for RGBSpectrum {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for RGBSpectrum {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::rgb(
            self.c[0] - other.c[0],
            self.c[1] - other.c[1],
            self.c[2] - other.c[2],
        )
    }
}

impl SubAssign for RGBSpectrum {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Mul for RGBSpectrum {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self::rgb(
            self.c[0] * other.c[0],
            self.c[1] * other.c[1],
            self.c[2] * other.c[2],
        )
    }
}

impl MulAssign for RGBSpectrum {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl Mul<Float> for RGBSpectrum {
    type Output = Self;

    fn mul(self, f: Float) -> Self {
        Self::rgb(self.c[0] * f, self.c[1] * f, self.c[2] * f)
    }
}

impl Mul<RGBSpectrum> for Float {
    type Output = RGBSpectrum;

    fn mul(self, s: RGBSpectrum) -> RGBSpectrum {
        s * self
    }
}

impl MulAssign<Float> for RGBSpectrum {
    fn mul_assign(&mut self, f: Float) {
        *self = *self * f;
    }
}

impl Div for RGBSpectrum {
    type Output = Self;

    /// Component-wise division; zero denominators give zero.
    fn div(self, other: Self) -> Self {
        let d = |a: Float, b: Float| if b == 0.0 { 0.0 } else { a / b };
        Self::rgb(
            d(self.c[0], other.c[0]),
            d(self.c[1], other.c[1]),
            d(self.c[2], other.c[2]),
        )
    }
}

impl Div<Float> for RGBSpectrum {
    type Output = Self;

    fn div(self, f: Float) -> Self {
        debug_assert!(f != 0.0 && !f.is_nan());
        let inv = 1.0 / f;
        self * inv
    }
}

impl DivAssign<Float> for RGBSpectrum {
    fn div_assign(&mut self, f: Float) {
        *self = *self / f;
    }
}

impl Neg for RGBSpectrum {
    type Output = Self;

    fn neg(self) -> Self {
        Self::rgb(-self.c[0], -self.c[1], -self.c[2])
    }
}

impl Index<usize> for RGBSpectrum {
    type Output = Float;

    fn index(&self, i: usize) -> &Self::Output {
        &self.c[i]
    }
}

impl IndexMut<usize> for RGBSpectrum {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.c[i]
    }
}

impl fmt::Display for RGBSpectrum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.c[0], self.c[1], self.c[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn luminance_of_white_is_one() {
        assert!(approx_eq!(f32, RGBSpectrum::ONE.y(), 1.0, epsilon = 1e-5));
        assert_eq!(RGBSpectrum::ZERO.y(), 0.0);
    }

    #[test]
    fn clamp_each_channel() {
        let s = RGBSpectrum::rgb(-1.0, 0.5, 3.0).clamp(0.0, 1.0);
        assert_eq!(s, RGBSpectrum::rgb(0.0, 0.5, 1.0));
        assert_eq!(RGBSpectrum::rgb(-2.0, 2.0, 0.0).clamp_default(), RGBSpectrum::rgb(0.0, 2.0, 0.0));
    }

    #[test]
    fn lerp_between_values() {
        let a = RGBSpectrum::rgb(0.0, 1.0, 2.0);
        let b = RGBSpectrum::rgb(2.0, 1.0, 0.0);
        assert_eq!(RGBSpectrum::lerp(0.5, &a, &b), RGBSpectrum::new(1.0));
    }

    #[test]
    fn divide_by_spectrum_skips_zero_channels() {
        let a = RGBSpectrum::rgb(1.0, 2.0, 3.0);
        let b = RGBSpectrum::rgb(2.0, 0.0, 3.0);
        assert_eq!(a / b, RGBSpectrum::rgb(0.5, 0.0, 1.0));
    }

    #[test]
    fn is_black_and_max_component() {
        assert!(RGBSpectrum::ZERO.is_black());
        assert!(!RGBSpectrum::rgb(0.0, 0.1, 0.0).is_black());
        assert_eq!(RGBSpectrum::rgb(0.2, 0.9, 0.4).max_component_value(), 0.9);
    }
}
