//! Lambertian Transmission

use super::*;
use bumpalo::Bump;
use std::fmt;

/// BTDF for the Lambertian model for perfect transmissive surfaces that
/// scatters incident illumination equally through a surface in all directions.
#[derive(Copy, Clone, Debug)]
pub struct LambertianTransmission {
    /// Transmission spectrum which gives the fraction of incident light that
    /// is scattered through the surface.
    t: Spectrum,
}

impl LambertianTransmission {
    /// Create a new instance of `LambertianTransmission`.
    ///
    /// * `t` - Transmission spectrum.
    pub fn new(t: Spectrum) -> Self {
        Self { t }
    }

    /// Allocate a new instance of `LambertianTransmission`.
    ///
    /// * `arena` - The arena for memory allocations.
    /// * `t`     - Transmission spectrum.
    pub fn alloc<'arena>(arena: &'arena Bump, t: Spectrum) -> &'arena BxDF<'arena> {
        arena.alloc(BxDF::LambertianTransmission(Self::new(t)))
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_TRANSMISSION | BxDFType::BSDF_DIFFUSE
    }

    /// Returns the value of the distribution function for the given pair of
    /// directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, _wo: &Vector3f, _wi: &Vector3f) -> Spectrum {
        self.t * INV_PI
    }

    /// Samples a cosine-weighted direction on the opposite side of `wo`.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> BxDFSample {
        let mut wi = cosine_sample_hemisphere(u);
        if wo.z > 0.0 {
            wi.z *= -1.0;
        }
        BxDFSample::new(self.f(wo, &wi), self.pdf(wo, &wi), wi, self.get_type())
    }

    /// Evaluates the PDF for the sampling method.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        if !same_hemisphere(wo, wi) {
            abs_cos_theta(wi) * INV_PI
        } else {
            0.0
        }
    }

    /// Returns the transmittance which is exact for this model.
    pub fn rho(&self) -> Spectrum {
        self.t
    }
}

impl fmt::Display for LambertianTransmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LambertianTransmission {{ t: {} }}", self.t)
    }
}
