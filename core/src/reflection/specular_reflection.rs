//! Specular Reflection

use super::*;
use bumpalo::Bump;
use std::fmt;

/// BRDF for physically plausible specular reflection using Fresnel interface.
#[derive(Copy, Clone, Debug)]
pub struct SpecularReflection {
    /// Spectrum used to scale the reflected colour.
    r: Spectrum,

    /// Fresnel interface for dielectrics and conductors.
    fresnel: Fresnel,
}

impl SpecularReflection {
    /// Create a new instance of `SpecularReflection`.
    ///
    /// * `r`       - Spectrum used to scale the reflected colour.
    /// * `fresnel` - Fresnel interface for dielectrics and conductors.
    pub fn new(r: Spectrum, fresnel: Fresnel) -> Self {
        Self { r, fresnel }
    }

    /// Allocate a new instance of `SpecularReflection`.
    ///
    /// * `arena`   - The arena for memory allocations.
    /// * `r`       - Spectrum used to scale the reflected colour.
    /// * `fresnel` - Fresnel interface for dielectrics and conductors.
    pub fn alloc<'arena>(arena: &'arena Bump, r: Spectrum, fresnel: Fresnel) -> &'arena BxDF<'arena> {
        arena.alloc(BxDF::SpecularReflection(Self::new(r, fresnel)))
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_REFLECTION | BxDFType::BSDF_SPECULAR
    }

    /// Returns the mirror direction with a PDF of 1. The returned value is
    /// divided by |cos θi| to cancel the cosine factor of the integrand.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, _u: &Point2f) -> BxDFSample {
        let wi = Vector3f::new(-wo.x, -wo.y, wo.z);
        let f = self.fresnel.evaluate(cos_theta(&wi)) * self.r / abs_cos_theta(&wi);
        BxDFSample::new(f, 1.0, wi, self.get_type())
    }
}

impl fmt::Display for SpecularReflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SpecularReflection {{ r: {}, fresnel: {} }}",
            self.r, self.fresnel
        )
    }
}
