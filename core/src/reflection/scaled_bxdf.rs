//! Scaled BxDF

use super::*;
use bumpalo::Bump;
use std::fmt;

/// BxDF scaling adapter scales a BxDF's contribution with a `Spectrum`. The
/// PDF of the wrapped BxDF is left untouched.
#[derive(Copy, Clone)]
pub struct ScaledBxDF<'arena> {
    /// The BxDF to scale.
    bxdf: &'arena BxDF<'arena>,

    /// Scaling value.
    scale: Spectrum,
}

impl<'arena> ScaledBxDF<'arena> {
    /// Create a new instance of `ScaledBxDF`.
    ///
    /// * `bxdf`  - The BxDF to scale.
    /// * `scale` - Scaling value.
    pub fn new(bxdf: &'arena BxDF<'arena>, scale: Spectrum) -> Self {
        Self { bxdf, scale }
    }

    /// Allocate a new instance of `ScaledBxDF`.
    ///
    /// * `arena` - The arena for memory allocations.
    /// * `bxdf`  - The BxDF to scale.
    /// * `scale` - Scaling value.
    pub fn alloc(
        arena: &'arena Bump,
        bxdf: &'arena BxDF<'arena>,
        scale: Spectrum,
    ) -> &'arena BxDF<'arena> {
        arena.alloc(BxDF::ScaledBxDF(Self::new(bxdf, scale)))
    }

    /// Returns the BxDF type of the wrapped BxDF.
    pub fn get_type(&self) -> BxDFType {
        self.bxdf.get_type()
    }

    /// Returns the scaled value of the wrapped distribution function.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        self.scale * self.bxdf.f(wo, wi)
    }

    /// Samples the wrapped BxDF and scales the returned value.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> BxDFSample {
        let mut sample = self.bxdf.sample_f(wo, u);
        sample.f = self.scale * sample.f;
        sample
    }

    /// Evaluates the PDF of the wrapped BxDF.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        self.bxdf.pdf(wo, wi)
    }

    /// Computes the scaled hemispherical-directional reflectance.
    ///
    /// * `wo`      - Outgoing direction.
    /// * `samples` - Samples used by Monte Carlo algorithm.
    pub fn rho_hd(&self, wo: &Vector3f, samples: &[Point2f]) -> Spectrum {
        self.scale * self.bxdf.rho_hd(wo, samples)
    }

    /// Computes the scaled hemispherical-hemispherical reflectance.
    ///
    /// * `samples1` - Samples used by Monte Carlo algorithm.
    /// * `samples2` - Samples used by Monte Carlo algorithm.
    pub fn rho_hh(&self, samples1: &[Point2f], samples2: &[Point2f]) -> Spectrum {
        self.scale * self.bxdf.rho_hh(samples1, samples2)
    }
}

impl<'arena> fmt::Display for ScaledBxDF<'arena> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScaledBxDF {{ bxdf: {}, scale: {} }}", self.bxdf, self.scale)
    }
}
