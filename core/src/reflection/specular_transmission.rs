//! Specular Transmission

use super::*;
use crate::material::TransportMode;
use bumpalo::Bump;
use std::fmt;

/// BTDF for physically plausible specular transmission through a dielectric
/// interface.
#[derive(Copy, Clone, Debug)]
pub struct SpecularTransmission {
    /// Spectrum used to scale the transmitted colour.
    t: Spectrum,

    /// Index of refraction above the surface (same side as surface normal).
    eta_a: Float,

    /// Index of refraction below the surface (opposite side as surface normal).
    eta_b: Float,

    /// Fresnel term for the interface.
    fresnel: FresnelDielectric,

    /// Indicates whether incident ray started from a light source or from camera.
    mode: TransportMode,
}

impl SpecularTransmission {
    /// Create a new instance of `SpecularTransmission`.
    ///
    /// * `t`     - Spectrum used to scale the transmitted colour.
    /// * `eta_a` - Index of refraction above the surface.
    /// * `eta_b` - Index of refraction below the surface.
    /// * `mode`  - Transport mode.
    pub fn new(t: Spectrum, eta_a: Float, eta_b: Float, mode: TransportMode) -> Self {
        Self {
            t,
            eta_a,
            eta_b,
            fresnel: FresnelDielectric {
                eta_i: eta_a,
                eta_t: eta_b,
            },
            mode,
        }
    }

    /// Allocate a new instance of `SpecularTransmission`.
    ///
    /// * `arena` - The arena for memory allocations.
    /// * `t`     - Spectrum used to scale the transmitted colour.
    /// * `eta_a` - Index of refraction above the surface.
    /// * `eta_b` - Index of refraction below the surface.
    /// * `mode`  - Transport mode.
    pub fn alloc<'arena>(
        arena: &'arena Bump,
        t: Spectrum,
        eta_a: Float,
        eta_b: Float,
        mode: TransportMode,
    ) -> &'arena BxDF<'arena> {
        arena.alloc(BxDF::SpecularTransmission(Self::new(t, eta_a, eta_b, mode)))
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_TRANSMISSION | BxDFType::BSDF_SPECULAR
    }

    /// Returns the refracted direction with a PDF of 1, or a zero sample on
    /// total internal reflection.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, _u: &Point2f) -> BxDFSample {
        // Figure out which η is incident and which is transmitted.
        let entering = cos_theta(wo) > 0.0;
        let (eta_i, eta_t) = if entering {
            (self.eta_a, self.eta_b)
        } else {
            (self.eta_b, self.eta_a)
        };

        let n = Normal3f::new(0.0, 0.0, 1.0).face_forward(wo);
        match refract(wo, &n, eta_i / eta_t) {
            Some(wi) => {
                let mut ft = self.t * (Spectrum::ONE - self.fresnel.evaluate(cos_theta(&wi)));

                // Account for non-symmetry with transmission to different medium.
                if self.mode == TransportMode::Radiance {
                    ft *= (eta_i * eta_i) / (eta_t * eta_t);
                }
                BxDFSample::new(ft / abs_cos_theta(&wi), 1.0, wi, self.get_type())
            }
            None => BxDFSample::from(self.get_type()),
        }
    }
}

impl fmt::Display for SpecularTransmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SpecularTransmission {{ t: {}, eta_a: {}, eta_b: {}, mode: {} }}",
            self.t, self.eta_a, self.eta_b, self.mode
        )
    }
}
