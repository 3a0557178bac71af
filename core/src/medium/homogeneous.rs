//! Homogeneous Medium

use super::*;
use crate::spectrum::SPECTRUM_SAMPLES;

/// A medium with constant absorption and scattering coefficients and a
/// Henyey-Greenstein phase function.
#[derive(Clone)]
pub struct HomogeneousMedium {
    /// Scattering coefficient σs.
    sigma_s: Spectrum,

    /// Attenuation coefficient σt = σa + σs.
    sigma_t: Spectrum,

    /// Henyey-Greenstein asymmetry parameter.
    g: Float,
}

impl HomogeneousMedium {
    /// Creates a new `HomogeneousMedium`.
    ///
    /// * `sigma_a` - Absorption coefficient σa.
    /// * `sigma_s` - Scattering coefficient σs.
    /// * `g`       - Henyey-Greenstein asymmetry parameter.
    pub fn new(sigma_a: Spectrum, sigma_s: Spectrum, g: Float) -> Self {
        Self {
            sigma_s,
            sigma_t: sigma_a + sigma_s,
            g,
        }
    }

    /// Returns the phase function used inside the medium.
    pub fn phase(&self) -> PhaseFunction {
        PhaseFunction::from(HenyeyGreenstein::new(self.g))
    }
}

impl Medium for HomogeneousMedium {
    /// Returns the beam transmittance along a given ray up to `ray.t_max`.
    ///
    /// * `ray`      - The ray.
    /// * `_sampler` - Unused; transmittance has a closed form.
    fn tr(&self, ray: &Ray, _sampler: &mut dyn Sampler) -> Spectrum {
        let d = min(ray.t_max * ray.d.length(), Float::MAX);
        (-self.sigma_t * d).exp()
    }

    /// Samples a scattering event along a ray.
    ///
    /// * `ray`     - The ray.
    /// * `sampler` - Source of uniform random values.
    fn sample(&self, ray: &Ray, sampler: &mut dyn Sampler) -> MediumSample {
        // Sample a channel and distance along the ray.
        let channel = min(
            (sampler.get_1d() * SPECTRUM_SAMPLES as Float) as usize,
            SPECTRUM_SAMPLES - 1,
        );
        let dist = -(1.0 - sampler.get_1d()).ln() / self.sigma_t[channel];
        let ray_length = ray.d.length();
        let t = min(dist / ray_length, ray.t_max);
        let sampled_medium = t < ray.t_max;

        let interaction = sampled_medium.then(|| MediumInteraction {
            hit: Hit::new_minimal(ray.at(t), ray.time, None),
            phase: self.phase(),
        });

        // Compute the transmittance and sampling density.
        let tr = (-self.sigma_t * (min(t, Float::MAX) * ray_length)).exp();
        let density = if sampled_medium { self.sigma_t * tr } else { tr };
        let mut pdf = (0..SPECTRUM_SAMPLES).map(|i| density[i]).sum::<Float>()
            / SPECTRUM_SAMPLES as Float;
        if pdf == 0.0 {
            pdf = 1.0;
        }

        let tr = if sampled_medium {
            tr * self.sigma_s / pdf
        } else {
            tr / pdf
        };
        MediumSample { tr, interaction }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RNG;
    use float_cmp::approx_eq;

    #[test]
    fn transmittance_follows_beer_lambert() {
        let medium = HomogeneousMedium::new(Spectrum::new(0.5), Spectrum::new(0.5), 0.0);
        let ray = Ray::new(
            Point3f::zero(),
            Vector3f::new(0.0, 0.0, 1.0),
            2.0,
            0.0,
            None,
        );
        let mut rng = RNG::default();
        let tr = medium.tr(&ray, &mut rng);
        assert!(approx_eq!(f32, tr[0], (-2.0_f32).exp(), epsilon = 1e-6));
    }

    #[test]
    fn sampled_interactions_lie_on_ray() {
        let medium = HomogeneousMedium::new(Spectrum::new(0.0), Spectrum::new(5.0), 0.3);
        let ray = Ray::new(
            Point3f::zero(),
            Vector3f::new(1.0, 0.0, 0.0),
            10.0,
            0.0,
            None,
        );
        let mut rng = RNG::new(3);
        let mut scattered = 0;
        for _ in 0..100 {
            let sample = medium.sample(&ray, &mut rng);
            if let Some(mi) = sample.interaction {
                scattered += 1;
                assert!(mi.hit.p.x > 0.0 && mi.hit.p.x < 10.0);
                // Non-absorbing medium: the throughput weight is the albedo.
                assert!(approx_eq!(f32, sample.tr[0], 1.0, epsilon = 1e-4));
            }
        }
        assert!(scattered > 90);
    }
}
