//! Lambertian Reflection

use super::*;
use bumpalo::Bump;
use std::fmt;

/// BRDF for the Lambertian model for perfect diffuse surfaces that scatters
/// incident illumination equally in all directions.
#[derive(Copy, Clone, Debug)]
pub struct LambertianReflection {
    /// Reflectance spectrum which gives the fraction of incident light that
    /// is scattered.
    r: Spectrum,
}

impl LambertianReflection {
    /// Create a new instance of `LambertianReflection`.
    ///
    /// * `r` - Reflectance spectrum which gives the fraction of incident light
    ///         that is scattered.
    pub fn new(r: Spectrum) -> Self {
        Self { r }
    }

    /// Allocate a new instance of `LambertianReflection`.
    ///
    /// * `arena` - The arena for memory allocations.
    /// * `r`     - Reflectance spectrum.
    pub fn alloc<'arena>(arena: &'arena Bump, r: Spectrum) -> &'arena BxDF<'arena> {
        arena.alloc(BxDF::LambertianReflection(Self::new(r)))
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_REFLECTION | BxDFType::BSDF_DIFFUSE
    }

    /// Returns the value of the distribution function for the given pair of
    /// directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, _wo: &Vector3f, _wi: &Vector3f) -> Spectrum {
        self.r * INV_PI
    }

    /// Returns the reflectance which is exact for this model.
    pub fn rho(&self) -> Spectrum {
        self.r
    }
}

impl fmt::Display for LambertianReflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LambertianReflection {{ r: {} }}", self.r)
    }
}
