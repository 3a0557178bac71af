//! Trowbridge-Reitz Distribution

use super::*;

/// Implements the anisotropic variant of the Trowbridge-Reitz (GGX)
/// distribution.
#[derive(Copy, Clone, Debug)]
pub struct TrowbridgeReitzDistribution {
    /// Indicates whether or not the visible area is sampled or not.
    sample_visible_area: bool,

    /// For microfacets oriented perpendicular to the x-axis and where
    /// α = sqrt(2) * σ and σ is the RMS slope of microfacets.
    alpha_x: Float,

    /// For microfacets oriented perpendicular to the y-axis and where
    /// α = sqrt(2) * σ and σ is the RMS slope of microfacets.
    alpha_y: Float,
}

impl TrowbridgeReitzDistribution {
    /// Create a new `TrowbridgeReitzDistribution`.
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

impl MicrofacetDistribution for TrowbridgeReitzDistribution {
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
        let e = (cos_2_phi(wh) / (self.alpha_x * self.alpha_x)
            + sin_2_phi(wh) / (self.alpha_y * self.alpha_y))
            * tan2_theta;
        1.0 / (PI * self.alpha_x * self.alpha_y * cos4_theta * (1.0 + e) * (1.0 + e))
    }

    fn lambda(&self, w: &Vector3f) -> Float {
        let abs_tan_theta = abs(tan_theta(w));
        if abs_tan_theta.is_infinite() {
            return 0.0;
        }
        let alpha = projected_alpha(w, self.alpha_x, self.alpha_y);
        let alpha2_tan2_theta = (alpha * abs_tan_theta) * (alpha * abs_tan_theta);
        (-1.0 + (1.0 + alpha2_tan2_theta).sqrt()) / 2.0
    }

    fn sample_full(&self, u: &Point2f) -> Vector3f {
        if self.alpha_x == self.alpha_y {
            let tan_2_theta = self.alpha_x * self.alpha_x * u[0] / (1.0 - u[0]);
            half_vector(tan_2_theta, TWO_PI * u[1])
        } else {
            let (phi, alpha2) = sample_anisotropic_phi(self.alpha_x, self.alpha_y, u[1]);
            half_vector(alpha2 * u[0] / (1.0 - u[0]), phi)
        }
    }

    fn sample_slopes(&self, cos_theta: Float, u1: Float, u2: Float) -> (Float, Float) {
        // Special case (normal incidence).
        if cos_theta > 0.9999 {
            let r = (u1 / (1.0 - u1)).sqrt();
            let phi = TWO_PI * u2;
            return (r * cos(phi), r * sin(phi));
        }

        let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
        let tan_theta = sin_theta / cos_theta;
        let a = 1.0 / tan_theta;
        let g1 = 2.0 / (1.0 + (1.0 + 1.0 / (a * a)).sqrt());

        // Sample slope_x.
        let a = 2.0 * u1 / g1 - 1.0;
        let tmp = min(1.0 / (a * a - 1.0), 1e10);
        let b = tan_theta;
        let d = max(b * b * tmp * tmp - (a * a - b * b) * tmp, 0.0).sqrt();
        let slope_x_1 = b * tmp - d;
        let slope_x_2 = b * tmp + d;
        let slope_x = if a < 0.0 || slope_x_2 > 1.0 / tan_theta {
            slope_x_1
        } else {
            slope_x_2
        };

        // Sample slope_y.
        let (s, u2) = if u2 > 0.5 {
            (1.0, 2.0 * (u2 - 0.5))
        } else {
            (-1.0, 2.0 * (0.5 - u2))
        };
        let z = (u2 * (u2 * (u2 * 0.27385 - 0.73369) + 0.46341))
            / (u2 * (u2 * (u2 * 0.093073 + 0.309420) - 1.000000) + 0.597999);
        let slope_y = s * z * (1.0 + slope_x * slope_x).sqrt();

        debug_assert!(slope_y.is_finite());
        (slope_x, slope_y)
    }
}
