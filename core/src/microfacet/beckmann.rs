//! Beckmann–Spizzichino Distribution

use super::*;

/// Implements the Beckmann–Spizzichino distribution which is based on a
/// Gaussian distribution of microfacet slopes.
#[derive(Copy, Clone, Debug)]
pub struct BeckmannDistribution {
    /// Indicates whether or not the visible area is sampled or not.
    sample_visible_area: bool,

    /// Roughness along the x-axis.
    alpha_x: Float,

    /// Roughness along the y-axis.
    alpha_y: Float,
}

impl BeckmannDistribution {
    /// Create a new `BeckmannDistribution`.
    ///
    /// * `alpha_x`             - Roughness along the x-axis.
    /// * `alpha_y`             - Roughness along the y-axis.
    /// * `sample_visible_area` - Sample the distribution of visible normals.
    pub fn new(alpha_x: Float, alpha_y: Float, sample_visible_area: bool) -> Self {
        Self {
            sample_visible_area,
            alpha_x: max(0.001, alpha_x),
            alpha_y: max(0.001, alpha_y),
        }
    }

    /// Maps scalar roughness parameter in [0, 1] to alpha values.
    ///
    /// * `roughness` - Roughness parameter value.
    pub fn roughness_to_alpha(roughness: Float) -> Float {
        roughness_to_alpha(roughness)
    }
}

impl MicrofacetDistribution for BeckmannDistribution {
    fn sample_visible_area(&self) -> bool {
        self.sample_visible_area
    }

    fn alpha(&self) -> (Float, Float) {
        (self.alpha_x, self.alpha_y)
    }

    fn d(&self, wh: &Vector3f) -> Float {
        let tan2_theta = tan_2_theta(wh);
        if tan2_theta.is_infinite() {
            return 0.0;
        }
        let cos4_theta = cos_2_theta(wh) * cos_2_theta(wh);
        let e = cos_2_phi(wh) / (self.alpha_x * self.alpha_x)
            + sin_2_phi(wh) / (self.alpha_y * self.alpha_y);
        (-tan2_theta * e).exp() / (PI * self.alpha_x * self.alpha_y * cos4_theta)
    }

    fn lambda(&self, w: &Vector3f) -> Float {
        let abs_tan_theta = abs(tan_theta(w));
        if abs_tan_theta.is_infinite() {
            return 0.0;
        }
        // Rational approximation of the Beckmann Λ.
        let a = 1.0 / (projected_alpha(w, self.alpha_x, self.alpha_y) * abs_tan_theta);
        if a >= 1.6 {
            0.0
        } else {
            (1.0 - 1.259 * a + 0.396 * a * a) / (3.535 * a + 2.181 * a * a)
        }
    }

    fn sample_full(&self, u: &Point2f) -> Vector3f {
        let log_sample = (1.0 - u[0]).ln();
        debug_assert!(log_sample.is_finite());

        if self.alpha_x == self.alpha_y {
            half_vector(-self.alpha_x * self.alpha_x * log_sample, TWO_PI * u[1])
        } else {
            let (phi, alpha2) = sample_anisotropic_phi(self.alpha_x, self.alpha_y, u[1]);
            half_vector(-alpha2 * log_sample, phi)
        }
    }

    fn sample_slopes(&self, cos_theta_i: Float, u1: Float, u2: Float) -> (Float, Float) {
        // Special case (normal incidence).
        if cos_theta_i > 0.9999 {
            let r = (-(1.0 - u1).ln()).sqrt();
            let phi = TWO_PI * u2;
            return (r * cos(phi), r * sin(phi));
        }

        // Numerically invert the slope CDF; everything is parameterized in the
        // erf() domain.
        let sin_theta_i = max(0.0, 1.0 - cos_theta_i * cos_theta_i).sqrt();
        let tan_theta_i = sin_theta_i / cos_theta_i;
        let cot_theta_i = 1.0 / tan_theta_i;

        let mut a = -1.0;
        let mut c = erf(cot_theta_i);
        let sample_x = max(u1, 1e-6);

        // Initial guess from a fitted inverse.
        let theta_i = acos(cos_theta_i);
        let fit = 1.0 + theta_i * (-0.876 + theta_i * (0.4265 - 0.0594 * theta_i));
        let mut b = c - (1.0 + c) * (1.0 - sample_x).powf(fit);

        // Normalization factor for the CDF.
        let inv_sqrt_pi = 1.0 / PI.sqrt();
        let normalization =
            1.0 / (1.0 + c + inv_sqrt_pi * tan_theta_i * (-cot_theta_i * cot_theta_i).exp());

        for _ in 0..9 {
            // Bisection step; also catches NaN.
            if !(b >= a && b <= c) {
                b = 0.5 * (a + c);
            }

            // Evaluate the CDF and its derivative.
            let inv_erf = erf_inv(b);
            let value = normalization
                * (1.0 + b + inv_sqrt_pi * tan_theta_i * (-inv_erf * inv_erf).exp())
                - sample_x;
            let derivative = normalization * (1.0 - inv_erf * tan_theta_i);
            if abs(value) < 1e-5 {
                break;
            }

            if value > 0.0 {
                c = b;
            } else {
                a = b;
            }
            b -= value / derivative;
        }

        let slope_x = erf_inv(b);
        let slope_y = erf_inv(2.0 * max(u2, 1e-6) - 1.0);
        debug_assert!(slope_x.is_finite() && slope_y.is_finite());
        (slope_x, slope_y)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::projected_area;
    use super::*;
    use proptest::prelude::*;

    prop_hemisphere_vector3!(hemisphere_vector);

    #[test]
    fn projected_microfacet_area_is_one() {
        let m = BeckmannDistribution::new(0.6, 0.6, false);
        assert!((projected_area(&m) - 1.0).abs() < 0.03);
    }

    #[test]
    fn lambda_vanishes_at_normal_incidence() {
        let m = BeckmannDistribution::new(0.3, 0.3, true);
        assert_eq!(m.lambda(&Vector3f::new(0.0, 0.0, 1.0)), 0.0);
        assert_eq!(m.g1(&Vector3f::new(0.0, 0.0, 1.0)), 1.0);
    }

    proptest! {
        #[test]
        fn sampled_normal_shares_hemisphere_with_wo(
            wo in hemisphere_vector(),
            u0 in 0.01..0.99f32,
            u1 in 0.01..0.99f32,
            visible in proptest::bool::ANY,
        ) {
            let m = BeckmannDistribution::new(0.4, 0.4, visible);
            let wh = m.sample_wh(&wo, &Point2f::new(u0, u1));
            prop_assert!(wh.z > 0.0);
            prop_assert!((wh.length() - 1.0).abs() < 1e-3);
        }
    }
}
