//! Interpolation Functions

use crate::pbrt::*;

/// Computes the four Catmull-Rom spline weights for `x` over a strictly
/// increasing knot array. Returns `None` if `x` lies outside
/// `[nodes[0], nodes[n - 1]]`.
///
/// The weights apply to the knots `offset..offset + 4`. Where the bracketing
/// interval touches either end of the array the missing neighbour is replaced
/// by a one-sided difference; its weight is folded into the two bracketing
/// knots and the out-of-range slot gets weight 0. `offset` is then -1 or
/// `n - 3` and callers must skip zero weights.
///
/// * `nodes` - Interpolation knots. Must contain at least 2 values.
/// * `x`     - Variable to interpolate.
pub fn catmull_rom_weights(nodes: &[Float], x: Float) -> Option<([Float; 4], isize)> {
    // Return None if `x` is out of bounds.
    let size = nodes.len();
    if size < 2 || !(x >= nodes[0] && x <= nodes[size - 1]) {
        return None;
    }

    // Search for the interval `idx` containing `x`.
    let idx = find_interval(size, |i| nodes[i] <= x);
    let offset = idx as isize - 1;
    let x0 = nodes[idx];
    let x1 = nodes[idx + 1];

    // Compute the `t` parameter and powers.
    let t = (x - x0) / (x1 - x0);
    let t2 = t * t;
    let t3 = t2 * t;

    // Compute initial node weights `w_1` and `w_2`.
    let mut weights = [0.0; 4];
    weights[1] = 2.0 * t3 - 3.0 * t2 + 1.0;
    weights[2] = -2.0 * t3 + 3.0 * t2;

    // Compute first node weight `w_0`.
    if idx > 0 {
        let w0 = (t3 - 2.0 * t2 + t) * (x1 - x0) / (x1 - nodes[idx - 1]);
        weights[0] = -w0;
        weights[2] += w0;
    } else {
        let w0 = t3 - 2.0 * t2 + t;
        weights[0] = 0.0;
        weights[1] -= w0;
        weights[2] += w0;
    }

    // Compute last node weight `w_3`.
    if idx + 2 < size {
        let w3 = (t3 - t2) * (x1 - x0) / (nodes[idx + 2] - x0);
        weights[1] -= w3;
        weights[3] = w3;
    } else {
        let w3 = t3 - t2;
        weights[1] -= w3;
        weights[2] += w3;
        weights[3] = 0.0;
    }

    Some((weights, offset))
}

/// Return value for `sample_catmull_rom_2d()`.
#[derive(Copy, Clone, Debug)]
pub struct CatmullRom2DSample {
    /// The sampled position along the second dimension.
    pub x: Float,

    /// The interpolated function value at `x`.
    pub fval: Float,

    /// The sampling density at `x`.
    pub pdf: Float,
}

/// Importance samples the second dimension of a 2D function tabulated on a
/// Catmull-Rom grid, after interpolating the first dimension at `alpha`.
///
/// * `nodes1` - Knots along the first dimension.
/// * `nodes2` - Knots along the second dimension.
/// * `values` - Function values, `nodes1.len()` rows of `nodes2.len()`.
/// * `cdf`    - Running integrals of each row of `values`.
/// * `alpha`  - Position along the first dimension.
/// * `u`      - Uniform sample value.
pub fn sample_catmull_rom_2d(
    nodes1: &[Float],
    nodes2: &[Float],
    values: &[Float],
    cdf: &[Float],
    alpha: Float,
    u: Float,
) -> Option<CatmullRom2DSample> {
    let size2 = nodes2.len();

    // Determine offset and coefficients for the `alpha` parameter.
    let (weights, offset) = catmull_rom_weights(nodes1, alpha)?;

    // Interpolate table entries along the first dimension.
    let interpolate = |array: &[Float], idx: usize| -> Float {
        weights
            .iter()
            .enumerate()
            .filter(|(_, w)| **w != 0.0)
            .map(|(i, w)| array[(offset + i as isize) as usize * size2 + idx] * w)
            .sum()
    };

    // Map `u` to a spline interval by inverting the interpolated `cdf`.
    let maximum = interpolate(cdf, size2 - 1);
    if maximum <= 0.0 {
        return None;
    }
    let u = u * maximum;
    let idx = find_interval(size2, |i| interpolate(cdf, i) <= u);

    // Look up node positions and interpolated function values.
    let f0 = interpolate(values, idx);
    let f1 = interpolate(values, idx + 1);
    let x0 = nodes2[idx];
    let x1 = nodes2[idx + 1];
    let width = x1 - x0;

    // Re-scale `u` using the interpolated `cdf`.
    let u = (u - interpolate(cdf, idx)) / width;

    // Approximate derivatives using finite differences of the interpolant.
    let d0 = if idx > 0 {
        width * (f1 - interpolate(values, idx - 1)) / (x1 - nodes2[idx - 1])
    } else {
        f1 - f0
    };
    let d1 = if idx + 2 < size2 {
        width * (interpolate(values, idx + 2) - f0) / (nodes2[idx + 2] - x0)
    } else {
        f1 - f0
    };

    // Invert definite integral over spline segment with Newton-bisection;
    // the initial guess importance samples a linear interpolant.
    let mut t = if f0 != f1 {
        (f0 - max(0.0, f0 * f0 + 2.0 * u * (f1 - f0)).sqrt()) / (f0 - f1)
    } else {
        u / f0
    };
    let mut a = 0.0;
    let mut b = 1.0;
    let mut fhat;
    loop {
        // Fall back to a bisection step when `t` is out of bounds.
        if !(t >= a && t <= b) {
            t = 0.5 * (a + b);
        }

        // Evaluate target function and its derivative in Horner form.
        let big_fhat = t
            * (f0
                + t * (0.5 * d0
                    + t * ((1.0 / 3.0) * (-2.0 * d0 - d1) + f1 - f0
                        + t * (0.25 * (d0 + d1) + 0.5 * (f0 - f1)))));
        fhat = f0 + t * (d0 + t * (-2.0 * d0 - d1 + 3.0 * (f1 - f0) + t * (d0 + d1 + 2.0 * (f0 - f1))));

        // Stop the iteration if converged.
        if abs(big_fhat - u) < 1e-6 || b - a < 1e-6 {
            break;
        }

        // Update bisection bounds using updated `t`.
        if big_fhat - u < 0.0 {
            a = t;
        } else {
            b = t;
        }

        // Perform a Newton step.
        t -= (big_fhat - u) / fhat;
    }

    Some(CatmullRom2DSample {
        x: x0 + width * t,
        fval: fhat,
        pdf: fhat / maximum,
    })
}

/// Evaluates a Fourier cosine series `Σ a[k] cos(kφ)` using the Chebyshev
/// recurrence for `cos(kφ)`.
///
/// * `a`       - Coefficients.
/// * `cos_phi` - cos(φ).
pub fn fourier(a: &[Float], cos_phi: f64) -> Float {
    let mut value = 0.0_f64;

    // Initialize cosine iterates.
    let mut cos_k_minus_one_phi = cos_phi;
    let mut cos_k_phi = 1.0_f64;
    for ak in a.iter() {
        // Add the current summand and update the cosine iterates.
        value += *ak as f64 * cos_k_phi;
        let cos_k_plus_one_phi = 2.0 * cos_phi * cos_k_phi - cos_k_minus_one_phi;
        cos_k_minus_one_phi = cos_k_phi;
        cos_k_phi = cos_k_plus_one_phi;
    }
    value as Float
}

/// Return value for `sample_fourier()`.
#[derive(Copy, Clone, Debug)]
pub struct FourierSample {
    /// Value of the Fourier series at `phi`.
    pub f: Float,

    /// Sampling density of `phi`.
    pub pdf: Float,

    /// The sampled azimuth in [0, 2π).
    pub phi: Float,
}

/// Importance samples the azimuth of a non-negative Fourier cosine series.
///
/// * `ak`    - Coefficients; `ak[0]` must be positive.
/// * `recip` - Table of integer reciprocals; `recip[k] = 1/k`.
/// * `u`     - Uniform sample value.
pub fn sample_fourier(ak: &[Float], recip: &[Float], u: Float) -> FourierSample {
    // Pick a side and declare bisection variables.
    let flip = u >= 0.5;
    let u = if flip { 1.0 - 2.0 * (u - 0.5) } else { u * 2.0 } as f64;
    let mut a = 0.0_f64;
    let mut b = std::f64::consts::PI;
    let mut phi = 0.5 * std::f64::consts::PI;
    let mut f;
    let a0 = ak[0] as f64;
    loop {
        // Evaluate F(φ) and its derivative f(φ).

        // Initialize sine and cosine iterates.
        let cos_phi = phi.cos();
        let sin_phi = (1.0 - cos_phi * cos_phi).max(0.0).sqrt();
        let mut cos_phi_prev = cos_phi;
        let mut cos_phi_cur = 1.0;
        let mut sin_phi_prev = -sin_phi;
        let mut sin_phi_cur = 0.0;

        // Initialize F and f with the first series term.
        let mut big_f = a0 * phi;
        f = a0;
        for k in 1..ak.len() {
            // Compute next sine and cosine iterates.
            let sin_phi_next = 2.0 * cos_phi * sin_phi_cur - sin_phi_prev;
            let cos_phi_next = 2.0 * cos_phi * cos_phi_cur - cos_phi_prev;
            sin_phi_prev = sin_phi_cur;
            sin_phi_cur = sin_phi_next;
            cos_phi_prev = cos_phi_cur;
            cos_phi_cur = cos_phi_next;

            // Add the next series term to F and f.
            big_f += ak[k] as f64 * recip[k] as f64 * sin_phi_next;
            f += ak[k] as f64 * cos_phi_next;
        }
        big_f -= u * a0 * std::f64::consts::PI;

        // Update bisection bounds using updated φ.
        if big_f > 0.0 {
            b = phi;
        } else {
            a = phi;
        }

        // Stop the Fourier bisection iteration if converged.
        if big_f.abs() < 1e-6 || b - a < 1e-6 {
            break;
        }

        // Perform a Newton step given f(φ) and F(φ).
        phi -= big_f / f;

        // Fall back to a bisection step when φ is out of bounds.
        if !(phi > a && phi < b) {
            phi = 0.5 * (a + b);
        }
    }

    // Potentially flip φ and return the result.
    if flip {
        phi = 2.0 * std::f64::consts::PI - phi;
    }
    FourierSample {
        f: f as Float,
        pdf: (INV_TWO_PI as f64 * f / a0) as Float,
        phi: phi as Float,
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    const MU: [Float; 5] = [-1.0, -0.5, 0.0, 0.5, 1.0];

    #[test]
    fn weights_at_interior_knot_select_that_knot() {
        let (weights, offset) = catmull_rom_weights(&MU, 0.0).unwrap();
        for (i, w) in weights.iter().enumerate() {
            let knot = offset + i as isize;
            if knot == 2 {
                assert_eq!(*w, 1.0);
            } else {
                assert_eq!(*w, 0.0);
            }
        }
    }

    #[test]
    fn weights_at_first_and_last_knot() {
        let (weights, offset) = catmull_rom_weights(&MU, -1.0).unwrap();
        assert_eq!(offset, -1);
        assert_eq!(weights, [0.0, 1.0, 0.0, 0.0]);

        let (weights, offset) = catmull_rom_weights(&MU, 1.0).unwrap();
        assert_eq!(offset, 2);
        assert_eq!(weights[2], 1.0);
        assert_eq!(weights[0], 0.0);
        assert_eq!(weights[1], 0.0);
        assert_eq!(weights[3], 0.0);
    }

    #[test]
    fn weights_outside_range() {
        assert!(catmull_rom_weights(&MU, -1.01).is_none());
        assert!(catmull_rom_weights(&MU, 1.01).is_none());
        assert!(catmull_rom_weights(&MU, Float::NAN).is_none());
    }

    proptest! {
        #[test]
        fn weights_partition_unity(x in -1.0..1.0f32) {
            let (weights, offset) = catmull_rom_weights(&MU, x).unwrap();
            let sum: Float = weights.iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-5);
            for (i, w) in weights.iter().enumerate() {
                let knot = offset + i as isize;
                if knot < 0 || knot >= MU.len() as isize {
                    prop_assert_eq!(*w, 0.0);
                }
            }
        }

        #[test]
        fn weights_reproduce_linear_function(x in -1.0..1.0f32) {
            // Catmull-Rom splines reproduce linear data exactly, including
            // the one-sided end intervals.
            let (weights, offset) = catmull_rom_weights(&MU, x).unwrap();
            let y: Float = weights
                .iter()
                .enumerate()
                .filter(|(_, w)| **w != 0.0)
                .map(|(i, w)| w * (2.0 * MU[(offset + i as isize) as usize] + 1.0))
                .sum();
            prop_assert!((y - (2.0 * x + 1.0)).abs() < 1e-4);
        }
    }

    #[test]
    fn fourier_series_values() {
        let a = [1.0, 0.5, 0.25];
        // cos(0) = 1 for every harmonic.
        assert!(approx_eq!(f32, fourier(&a, 1.0), 1.75, epsilon = 1e-6));
        // φ = π/2: cos φ = 0, cos 2φ = -1.
        assert!(approx_eq!(f32, fourier(&a, 0.0), 0.75, epsilon = 1e-6));
        assert_eq!(fourier(&[], 0.3), 0.0);
    }

    #[test]
    fn sample_fourier_constant_series_is_uniform() {
        let recip = [INFINITY, 1.0, 0.5];
        for &u in [0.1, 0.3, 0.6, 0.9].iter() {
            let s = sample_fourier(&[2.0], &recip, u);
            assert!(approx_eq!(f32, s.pdf, INV_TWO_PI, epsilon = 1e-5));
            assert!(approx_eq!(f32, s.f, 2.0, epsilon = 1e-6));
            let expected = if u < 0.5 { 2.0 * u * PI } else { TWO_PI - 2.0 * (1.0 - u) * PI };
            assert!(approx_eq!(f32, s.phi, expected, epsilon = 1e-4));
        }
    }

    #[test]
    fn sample_fourier_pdf_matches_series() {
        let ak = [1.0, 0.6, 0.1];
        let recip = [INFINITY, 1.0, 0.5];
        for &u in [0.05, 0.35, 0.55, 0.8].iter() {
            let s = sample_fourier(&ak, &recip, u);
            let value = fourier(&ak, (s.phi as f64).cos());
            assert!(approx_eq!(f32, s.f, value, epsilon = 1e-4));
            assert!(approx_eq!(f32, s.pdf, value * INV_TWO_PI / ak[0], epsilon = 1e-4));
        }
    }

    #[test]
    fn sample_catmull_rom_2d_constant_rows() {
        // Two identical constant rows; the sampled position is a linear map of u.
        let nodes1 = [0.0, 1.0];
        let nodes2 = [0.0, 0.5, 1.0];
        let values = [2.0, 2.0, 2.0, 2.0, 2.0, 2.0];
        let cdf = [0.0, 1.0, 2.0, 0.0, 1.0, 2.0];
        for &u in [0.1, 0.5, 0.9].iter() {
            let s = sample_catmull_rom_2d(&nodes1, &nodes2, &values, &cdf, 0.3, u).unwrap();
            assert!(approx_eq!(f32, s.x, u, epsilon = 1e-4));
            assert!(approx_eq!(f32, s.fval, 2.0, epsilon = 1e-4));
            assert!(approx_eq!(f32, s.pdf, 1.0, epsilon = 1e-4));
        }
        assert!(sample_catmull_rom_2d(&nodes1, &nodes2, &values, &cdf, 1.5, 0.5).is_none());
    }
}
