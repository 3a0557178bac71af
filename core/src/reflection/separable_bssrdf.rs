//! Separable BSSRDF

use super::*;
use crate::material::TransportMode;
use bumpalo::Bump;
use std::fmt;

/// Directional term of a separable BSSRDF. The spatial profile is left to the
/// material that owns the model.
#[derive(Copy, Clone, Debug)]
pub struct SeparableBSSRDF {
    /// Index of refraction of the scattering medium.
    pub eta: Float,

    /// Light transport mode.
    pub mode: TransportMode,
}

impl SeparableBSSRDF {
    /// Create a new instance of `SeparableBSSRDF`.
    ///
    /// * `eta`  - Index of refraction of the scattering medium.
    /// * `mode` - Light transport mode.
    pub fn new(eta: Float, mode: TransportMode) -> Self {
        Self { eta, mode }
    }

    /// Evaluates the directional term Sw. It is a diffuse-like profile scaled
    /// by the Fresnel transmittance and normalized to integrate to 1 over the
    /// cosine-weighted hemisphere.
    ///
    /// * `w` - Direction in the local shading frame.
    pub fn sw(&self, w: &Vector3f) -> Spectrum {
        let c = 1.0 - 2.0 * fresnel_moment_1(1.0 / self.eta);
        Spectrum::new((1.0 - fr_dielectric(cos_theta(w), 1.0, self.eta)) / (c * PI))
    }
}

/// Adapts the directional term of a `SeparableBSSRDF` to the BxDF interface
/// so it can be used when light re-enters the surface.
#[derive(Copy, Clone, Debug)]
pub struct SeparableBSSRDFAdapter {
    bssrdf: SeparableBSSRDF,
}

impl SeparableBSSRDFAdapter {
    /// Create a new instance of `SeparableBSSRDFAdapter`.
    ///
    /// * `bssrdf` - The BSSRDF.
    pub fn new(bssrdf: SeparableBSSRDF) -> Self {
        Self { bssrdf }
    }

    /// Allocate a new instance of `SeparableBSSRDFAdapter`.
    ///
    /// * `arena`  - The arena for memory allocations.
    /// * `bssrdf` - The BSSRDF.
    pub fn alloc<'arena>(arena: &'arena Bump, bssrdf: SeparableBSSRDF) -> &'arena BxDF<'arena> {
        arena.alloc(BxDF::SeparableBSSRDFAdapter(Self::new(bssrdf)))
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        BxDFType::BSDF_REFLECTION | BxDFType::BSDF_DIFFUSE
    }

    /// Returns Sw(wi). In importance transport the value carries an extra
    /// η² factor since radiance is not symmetric across the boundary.
    /// Note this is the reverse of pbrt-v3, which scales in `Radiance` mode;
    /// radiance transport here returns Sw(wi) unscaled.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, _wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        let f = self.bssrdf.sw(wi);
        if self.bssrdf.mode == TransportMode::Importance {
            f * (self.bssrdf.eta * self.bssrdf.eta)
        } else {
            f
        }
    }
}

impl fmt::Display for SeparableBSSRDFAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SeparableBSSRDFAdapter {{ eta: {}, mode: {} }}",
            self.bssrdf.eta, self.bssrdf.mode
        )
    }
}

/// Evaluate first moment of the Fresnel reflectance function.
///
/// * `eta` - Relative index of refraction.
pub fn fresnel_moment_1(eta: Float) -> Float {
    let eta2 = eta * eta;
    let eta3 = eta2 * eta;
    let eta4 = eta3 * eta;
    let eta5 = eta4 * eta;
    if eta < 1.0 {
        0.45966 - 1.73965 * eta + 3.37668 * eta2 - 3.904945 * eta3 + 2.49277 * eta4
            - 0.68441 * eta5
    } else {
        -4.61686 + 11.1136 * eta - 10.4646 * eta2 + 5.11455 * eta3 - 1.27198 * eta4
            + 0.12746 * eta5
    }
}

/// Evaluate second moment of the Fresnel reflectance function.
///
/// * `eta` - Relative index of refraction.
pub fn fresnel_moment_2(eta: Float) -> Float {
    let eta2 = eta * eta;
    let eta3 = eta2 * eta;
    let eta4 = eta3 * eta;
    let eta5 = eta4 * eta;
    if eta < 1.0 {
        0.27614 - 0.87350 * eta + 1.12077 * eta2 - 0.65095 * eta3 + 0.07883 * eta4
            + 0.04860 * eta5
    } else {
        let r_eta = 1.0 / eta;
        let r_eta2 = r_eta * r_eta;
        let r_eta3 = r_eta2 * r_eta;
        -547.033 + 45.3087 * r_eta3 - 218.725 * r_eta2 + 458.843 * r_eta + 404.557 * eta
            - 189.519 * eta2
            + 54.9327 * eta3
            - 9.00603 * eta4
            + 0.63942 * eta5
    }
}
