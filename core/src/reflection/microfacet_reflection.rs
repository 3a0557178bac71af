//! Torrance-Sparrow Microfacet Reflection Model

use super::*;
use crate::microfacet::MicrofacetDistribution;
use bumpalo::Bump;
use std::fmt;

/// BRDF for modeling glossy surfaces using a microfacet distribution.
#[derive(Copy, Clone)]
pub struct MicrofacetReflection<'arena> {
    /// Reflectance spectrum which gives the fraction of incident light that
    /// is scattered.
    r: Spectrum,

    /// The microfacet distribution model.
    distribution: &'arena dyn MicrofacetDistribution,

    /// Fresnel interface for dielectrics and conductors.
    fresnel: Fresnel,
}

impl<'arena> MicrofacetReflection<'arena> {
    /// Create a new instance of `MicrofacetReflection`.
    ///
    /// * `r`            - Reflectance spectrum.
    /// * `distribution` - Microfacet distribution.
    /// * `fresnel`      - Fresnel interface for dielectrics and conductors.
    pub fn new(r: Spectrum, distribution: &'arena dyn MicrofacetDistribution, fresnel: Fresnel) -> Self {
        Self {
            r,
            distribution,
            fresnel,
        }
    }

    /// Allocate a new instance of `MicrofacetReflection`.
    ///
    /// * `arena`        - The arena for memory allocations.
    /// * `r`            - Reflectance spectrum.
    /// * `distribution` - Microfacet distribution.
    /// * `fresnel`      - Fresnel interface for dielectrics and conductors.
    pub fn alloc(
        arena: &'arena Bump,
        r: Spectrum,
        distribution: &'arena dyn MicrofacetDistribution,
        fresnel: Fresnel,
    ) -> &'arena BxDF<'arena> {
        arena.alloc(BxDF::MicrofacetReflection(Self::new(r, distribution, fresnel)))
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_REFLECTION | BxDFType::BSDF_GLOSSY
    }

    /// Returns the value of the distribution function for the given pair of
    /// directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        let cos_theta_o = abs_cos_theta(wo);
        let cos_theta_i = abs_cos_theta(wi);
        let wh = *wi + *wo;

        // Handle degenerate cases for microfacet reflection.
        if cos_theta_i == 0.0 || cos_theta_o == 0.0 || wh.length_squared() == 0.0 {
            return Spectrum::ZERO;
        }
        let wh = wh.normalize();

        // Keep `wh` in the hemisphere of the normal so the Fresnel term
        // handles total internal reflection.
        let f = self
            .fresnel
            .evaluate(wi.dot(&wh.face_forward(&Vector3f::new(0.0, 0.0, 1.0))));

        self.r * self.distribution.d(&wh) * self.distribution.g(wo, wi) * f
            / (4.0 * cos_theta_i * cos_theta_o)
    }

    /// Samples a microfacet normal and reflects `wo` about it.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> BxDFSample {
        if wo.z == 0.0 {
            return BxDFSample::from(self.get_type());
        }

        let wh = self.distribution.sample_wh(wo, u);
        if wo.dot(&wh) < 0.0 {
            return BxDFSample::from(self.get_type());
        }

        let wi = reflect(wo, &wh);
        if !same_hemisphere(wo, &wi) {
            return BxDFSample::from(self.get_type());
        }

        // Convert the half vector density to a density over `wi`.
        let pdf = self.distribution.pdf(wo, &wh) / (4.0 * wo.dot(&wh));
        BxDFSample::new(self.f(wo, &wi), pdf, wi, self.get_type())
    }

    /// Evaluates the PDF for the sampling method.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        if !same_hemisphere(wo, wi) {
            return 0.0;
        }
        let wh = (*wo + *wi).normalize();
        self.distribution.pdf(wo, &wh) / (4.0 * wo.dot(&wh))
    }
}

impl<'arena> fmt::Display for MicrofacetReflection<'arena> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MicrofacetReflection {{ r: {}, fresnel: {} }}",
            self.r, self.fresnel
        )
    }
}
