//! Microfacet Distribution Models

use crate::geometry::*;
use crate::reflection::*;

mod beckmann;
mod trowbridge_reitz;

// Re-exports
pub use beckmann::*;
pub use trowbridge_reitz::*;

/// Interface for microfacet distribution models.
///
/// Concrete models supply `d()`, `lambda()` and the two slope samplers; the
/// masking terms, half-vector sampling and the PDF are shared.
pub trait MicrofacetDistribution {
    /// Returns whether `sample_wh()` draws from the distribution of visible
    /// normals instead of the full distribution.
    fn sample_visible_area(&self) -> bool;

    /// Returns the roughness along the x and y axes of the shading frame.
    fn alpha(&self) -> (Float, Float);

    /// Return the differential area of microfacets oriented with the surface
    /// normal `wh`.
    ///
    /// * `wh` - A sample normal from the distrubition of normal vectors.
    fn d(&self, wh: &Vector3f) -> Float;

    /// Returns the invisible masked microfacet area per visible microfacet area.
    ///
    /// * `w` - The direction from camera/viewer.
    fn lambda(&self, w: &Vector3f) -> Float;

    /// Samples the full distribution of normals.
    ///
    /// * `u` - The 2D uniform random values.
    fn sample_full(&self, u: &Point2f) -> Vector3f;

    /// Samples microfacet slopes visible from a direction with elevation
    /// `cos_theta` for the unit roughness configuration.
    ///
    /// * `cos_theta` - Cosine of the direction in the stretched frame.
    /// * `u1`        - The uniform random value.
    /// * `u2`        - The uniform random value.
    fn sample_slopes(&self, cos_theta: Float, u1: Float, u2: Float) -> (Float, Float);

    /// Evaluates Smith's masking-shadowing function which gives the fraction of
    /// microfacets that are visible from a given direction.
    ///
    /// * `w` - The direction from camera/viewer.
    fn g1(&self, w: &Vector3f) -> Float {
        1.0 / (1.0 + self.lambda(w))
    }

    /// Returns the fraction of microfacets in a differential area that are
    /// visible from both directions `wo` and `wi`.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    fn g(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        1.0 / (1.0 + self.lambda(wo) + self.lambda(wi))
    }

    /// Returns a sample from the distribution of normal vectors. The result
    /// lies in the same hemisphere as `wo`.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    fn sample_wh(&self, wo: &Vector3f, u: &Point2f) -> Vector3f {
        if !self.sample_visible_area() {
            let wh = self.sample_full(u);
            return if same_hemisphere(wo, &wh) { wh } else { -wh };
        }

        let flip = wo.z < 0.0;
        let wi = if flip { -(*wo) } else { *wo };
        let (alpha_x, alpha_y) = self.alpha();

        // Stretch `wi`.
        let wi_stretched = Vector3f::new(alpha_x * wi.x, alpha_y * wi.y, wi.z).normalize();

        // Sample slopes for the unit roughness configuration.
        let (slope_x, slope_y) = self.sample_slopes(cos_theta(&wi_stretched), u[0], u[1]);

        // Rotate and unstretch.
        let (cos_phi, sin_phi) = (cos_phi(&wi_stretched), sin_phi(&wi_stretched));
        let slope_x_rot = cos_phi * slope_x - sin_phi * slope_y;
        let slope_y_rot = sin_phi * slope_x + cos_phi * slope_y;
        let wh = Vector3f::new(-alpha_x * slope_x_rot, -alpha_y * slope_y_rot, 1.0).normalize();

        if flip {
            -wh
        } else {
            wh
        }
    }

    /// Evaluates the PDF for the given outgoing direction and sampled surface
    /// normal. Must branch on the same flag `sample_wh()` uses.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wh` - A sample normal from the distrubition of normal vectors.
    fn pdf(&self, wo: &Vector3f, wh: &Vector3f) -> Float {
        if self.sample_visible_area() {
            self.d(wh) * self.g1(wo) * wo.abs_dot(wh) / abs_cos_theta(wo)
        } else {
            self.d(wh) * abs_cos_theta(wh)
        }
    }
}

/// Maps scalar roughness parameter in [0, 1] to alpha values where values close
/// to 0 are near-perfect specular reflection.
///
/// * `roughness` - Roughness parameter value.
pub fn roughness_to_alpha(roughness: Float) -> Float {
    let x = max(roughness, 1e-3).ln();
    1.62142 + 0.819955 * x + 0.1734 * x * x + 0.0171201 * x * x * x + 0.000640711 * x * x * x * x
}

/// Returns the effective roughness for a direction in an anisotropic
/// distribution.
///
/// * `w`       - The direction.
/// * `alpha_x` - Roughness along the x-axis.
/// * `alpha_y` - Roughness along the y-axis.
fn projected_alpha(w: &Vector3f, alpha_x: Float, alpha_y: Float) -> Float {
    (cos_2_phi(w) * alpha_x * alpha_x + sin_2_phi(w) * alpha_y * alpha_y).sqrt()
}

/// Samples the azimuth of an anisotropic distribution of normals. Returns the
/// angle and 1/(cos²φ/αx² + sin²φ/αy²).
///
/// * `alpha_x` - Roughness along the x-axis.
/// * `alpha_y` - Roughness along the y-axis.
/// * `u`       - The uniform random value.
fn sample_anisotropic_phi(alpha_x: Float, alpha_y: Float, u: Float) -> (Float, Float) {
    let mut phi = atan(alpha_y / alpha_x * tan(TWO_PI * u + PI_OVER_TWO));
    if u > 0.5 {
        phi += PI;
    }
    let (sin_phi, cos_phi) = (sin(phi), cos(phi));
    let alpha2 =
        1.0 / (cos_phi * cos_phi / (alpha_x * alpha_x) + sin_phi * sin_phi / (alpha_y * alpha_y));
    (phi, alpha2)
}

/// Builds a half vector from tan²θ and φ.
///
/// * `tan_2_theta` - Squared tangent of the elevation.
/// * `phi`         - Azimuth.
fn half_vector(tan_2_theta: Float, phi: Float) -> Vector3f {
    let cos_theta = 1.0 / (1.0 + tan_2_theta).sqrt();
    let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
    spherical_direction(sin_theta, cos_theta, phi)
}
