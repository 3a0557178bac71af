//! Henyey-Greenstein

use crate::geometry::*;

/// Henyey-Greenstein phase function.
#[derive(Copy, Clone, Debug)]
pub struct HenyeyGreenstein {
    /// The asymmetry parameter in (-1, 1). Isotropic phase functions use
    /// g = 0; positive values favour forward scattering.
    pub g: Float,
}

impl HenyeyGreenstein {
    /// Returns a new `HenyeyGreenstein`.
    ///
    /// * `g` - The asymmetry parameter.
    pub fn new(g: Float) -> Self {
        debug_assert!(g > -1.0 && g < 1.0, "asymmetry parameter {g} out of range");
        Self { g }
    }

    /// Returns the value of the phase function for the given pair of directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn p(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        phase_hg(wo.dot(wi), self.g)
    }

    /// Returns the phase function value and sampled incident direction given the
    /// outgoing direction and a sample value in [0, 1)^2.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - Sample value in [0, 1)^2.
    pub fn sample_p(&self, wo: &Vector3f, u: &Point2f) -> (Float, Vector3f) {
        let g = self.g;

        // Compute cos(θ) for Henyey-Greenstein sample; the closed form
        // degenerates to 0/0 as g approaches 0.
        let cos_theta = if abs(g) < 1e-3 {
            1.0 - 2.0 * u[0]
        } else {
            let sqr_term = (1.0 - g * g) / (1.0 + g - 2.0 * g * u[0]);
            -(1.0 + g * g - sqr_term * sqr_term) / (2.0 * g)
        };
        let cos_theta = clamp(cos_theta, -1.0, 1.0);

        // Compute direction `wi` for Henyey-Greenstein sample.
        let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
        let phi = TWO_PI * u[1];
        let (v1, v2) = coordinate_system(wo);
        let wi = spherical_direction_in_coord_frame(sin_theta, cos_theta, phi, &v1, &v2, wo);

        (phase_hg(cos_theta, g), wi)
    }
}

/// Computes the Henyey-Greenstein phase function.
///
/// * `cos_theta` - Cosine of the angle between `wo` and `wi`.
/// * `g`         - Asymmetry parametery.
#[inline]
pub fn phase_hg(cos_theta: Float, g: Float) -> Float {
    let denom = 1.0 + g * g + 2.0 * g * cos_theta;
    INV_FOUR_PI * (1.0 - g * g) / (denom * denom.sqrt())
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RNG;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    prop_unit_vector3!(unit_vector3);

    proptest! {
        #[test]
        fn isotropic_value(wo in unit_vector3(), wi in unit_vector3()) {
            let hg = HenyeyGreenstein::new(0.0);
            prop_assert!(approx_eq!(f32, hg.p(&wo, &wi), INV_FOUR_PI, epsilon = 1e-6));
        }

        #[test]
        fn sampled_value_matches_evaluation(
            wo in unit_vector3(),
            g in -0.9..0.9f32,
            u0 in 0.0..1.0f32,
            u1 in 0.0..1.0f32,
        ) {
            let hg = HenyeyGreenstein::new(g);
            let (phase, wi) = hg.sample_p(&wo, &Point2f::new(u0, u1));
            prop_assert!((wi.length() - 1.0).abs() < 1e-3);
            let expected = hg.p(&wo, &wi);
            prop_assert!((phase - expected).abs() <= 1e-2 * expected.max(1.0));
        }
    }

    #[test]
    fn isotropic_samples_cover_sphere_uniformly() {
        let hg = HenyeyGreenstein::new(0.0);
        let wo = Vector3f::new(0.0, 0.6, 0.8);
        let mut rng = RNG::new(7);
        let n = 20_000;
        let mut mean = Vector3f::zero();
        let mut mean_z2 = 0.0;
        for _ in 0..n {
            let u = Point2f::new(rng.uniform_float(), rng.uniform_float());
            let (phase, wi) = hg.sample_p(&wo, &u);
            assert!(approx_eq!(f32, phase, INV_FOUR_PI, epsilon = 1e-6));
            mean += wi;
            mean_z2 += wi.z * wi.z;
        }
        mean /= n as Float;
        mean_z2 /= n as Float;
        assert!(mean.length() < 0.02, "mean direction {:?}", mean);
        assert!((mean_z2 - 1.0 / 3.0).abs() < 0.01, "E[z^2] = {mean_z2}");
    }

    #[test]
    fn mean_cosine_matches_asymmetry() {
        // `wo` points away from the scattering point so forward scattering
        // gives wi close to -wo.
        for &g in [-0.7, -0.3, 0.4, 0.8].iter() {
            let hg = HenyeyGreenstein::new(g);
            let wo = Vector3f::new(0.0, 0.0, 1.0);
            let mut rng = RNG::new(11);
            let n = 20_000;
            let mut sum = 0.0;
            for _ in 0..n {
                let u = Point2f::new(rng.uniform_float(), rng.uniform_float());
                let (_, wi) = hg.sample_p(&wo, &u);
                sum += wo.dot(&wi);
            }
            let mean = sum / n as Float;
            assert!((mean + g).abs() < 0.02, "g = {g}, mean cosine = {mean}");
        }
    }
}
