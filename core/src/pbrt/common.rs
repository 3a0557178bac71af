//! Common

use super::clamp::*;
use num_traits::Num;
use std::ops::{Add, Mul, Neg};

/// Floating point type used for all radiometric and geometric quantities.
pub type Float = f32;

/// Signed integer type.
pub type Int = i32;

/// ∞
pub const INFINITY: Float = Float::INFINITY;

/// PI (π)
pub const PI: Float = std::f32::consts::PI;

/// 1/PI (1/π)
pub const INV_PI: Float = 1.0 / PI;

/// PI/2 (π/2)
pub const PI_OVER_TWO: Float = PI * 0.5;

/// PI/4 (π/4)
pub const PI_OVER_FOUR: Float = PI * 0.25;

/// 2*PI (2π)
pub const TWO_PI: Float = PI * 2.0;

/// 1/2*PI (1/2π)
pub const INV_TWO_PI: Float = 1.0 / TWO_PI;

/// 4*PI (4π)
pub const FOUR_PI: Float = PI * 4.0;

/// 1/4*PI (1/4π)
pub const INV_FOUR_PI: Float = 1.0 / FOUR_PI;

/// Fraction of a shadow ray left short of its target.
pub const SHADOW_EPSILON: Float = 0.0001;

/// Returns the absolute value of a number.
///
/// * `n` - The number.
#[inline(always)]
pub fn abs<T>(n: T) -> T
where
    T: Num + Neg<Output = T> + PartialOrd + Copy,
{
    if n < T::zero() {
        -n
    } else {
        n
    }
}

/// Returns the minimum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn min<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a < b {
        a
    } else {
        b
    }
}

/// Returns the maximum of 2 numbers.
///
/// * `a` - First number.
/// * `b` - Second number.
#[inline(always)]
pub fn max<T>(a: T, b: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if a > b {
        a
    } else {
        b
    }
}

/// Linearly interpolate between two points for parameters in [0, 1] and
/// extrapolate for parameters outside that interval.
///
/// * `t` - Parameter.
/// * `p0` - Point at t=0.
/// * `p1` - Point at t=1.
#[inline(always)]
pub fn lerp<P>(t: Float, p0: P, p1: P) -> P
where
    Float: Mul<P, Output = P>,
    P: Add<P, Output = P>,
{
    (1.0 - t) * p0 + t * p1
}

/// Emulates the behavior of `upper_bound` but uses a function object to get
/// values at various indices instead of requiring access to an actual array.
/// It is used to bisect arrays that are procedurally generated such as those
/// interpolated from point samples.
///
/// The result is clamped to `[0, size - 2]` so that `result + 1` is always a
/// valid index. `size` must be at least 2.
///
/// * `size` - Size of array.
/// * `pred` - Function that returns a value at a given index.
pub fn find_interval<Predicate>(size: usize, pred: Predicate) -> usize
where
    Predicate: Fn(usize) -> bool,
{
    debug_assert!(size >= 2);

    let (mut first, mut len) = (0_usize, size);
    while len > 0 {
        let half = len >> 1;
        let middle = first + half;

        // Bisect range based on value of `pred` at `middle`.
        if pred(middle) {
            first = middle + 1;
            len -= half + 1;
        } else {
            len = half;
        }
    }

    clamp(first as isize - 1, 0, size as isize - 2) as usize
}

// Free-function forms of the trigonometric methods keep formulas close to
// their textbook notation.

/// cos(θ) with `theta` in radians.
#[inline(always)]
pub fn cos(theta: Float) -> Float {
    theta.cos()
}

/// sin(θ) with `theta` in radians.
#[inline(always)]
pub fn sin(theta: Float) -> Float {
    theta.sin()
}

/// tan(θ) with `theta` in radians.
#[inline(always)]
pub fn tan(theta: Float) -> Float {
    theta.tan()
}

/// Inverse cosine in radians, in [0, π].
#[inline(always)]
pub fn acos(x: Float) -> Float {
    x.acos()
}

/// Inverse tangent in radians, in [-π/2, π/2].
#[inline(always)]
pub fn atan(x: Float) -> Float {
    x.atan()
}

/// Error function, using Abramowitz and Stegun formula 7.1.26 (absolute
/// error below 1.5e-7).
///
/// * `x` - The argument.
pub fn erf(x: Float) -> Float {
    const A: [Float; 5] = [0.254829592, -0.284496736, 1.421413741, -1.453152027, 1.061405429];
    const P: Float = 0.3275911;

    let ax = abs(x);
    let t = 1.0 / (1.0 + P * ax);
    let poly = A.iter().rev().fold(0.0, |acc, a| acc * t + a) * t;
    let y = 1.0 - poly * (-ax * ax).exp();
    if x < 0.0 {
        -y
    } else {
        y
    }
}

/// Inverse error function (Giles' single precision approximation). The
/// argument is clamped just inside (-1, 1).
///
/// * `x` - The argument.
pub fn erf_inv(x: Float) -> Float {
    let x = clamp(x, -0.99999, 0.99999);
    let mut w = -((1.0 - x) * (1.0 + x)).ln();
    if w < 5.0 {
        w -= 2.5;

        let mut p = 2.81022636e-08;
        p = 3.43273939e-07 + p * w;
        p = -3.5233877e-06 + p * w;
        p = -4.39150654e-06 + p * w;
        p = 0.00021858087 + p * w;
        p = -0.00125372503 + p * w;
        p = -0.00417768164 + p * w;
        p = 0.246640727 + p * w;
        p = 1.50140941 + p * w;
        p * x
    } else {
        w = w.sqrt() - 3.0;

        let mut p = -0.000200214257;
        p = 0.000100950558 + p * w;
        p = 0.00134934322 + p * w;
        p = -0.00367342844 + p * w;
        p = 0.00573950773 + p * w;
        p = -0.0076224613 + p * w;
        p = 0.00943887047 + p * w;
        p = 1.00167406 + p * w;
        p = 2.83297682 + p * w;
        p * x
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
