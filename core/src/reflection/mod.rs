//! Reflection and surface scattering models

use crate::geometry::*;
use crate::pbrt::*;
use crate::sampling::*;
use crate::spectrum::*;
use std::fmt;

mod bsdf;
mod bsdf_reader;
mod bxdf_sample;
mod bxdf_type;
mod common;
mod fourier_bsdf;
mod fourier_bsdf_table;
mod fresnel;
mod lambertian_reflection;
mod lambertian_transmission;
mod microfacet_reflection;
mod scaled_bxdf;
mod separable_bssrdf;
mod specular_reflection;
mod specular_transmission;

// Re-export
pub use bsdf::*;
pub use bsdf_reader::*;
pub use bxdf_sample::*;
pub use bxdf_type::*;
pub use common::*;
pub use fourier_bsdf::*;
pub use fourier_bsdf_table::*;
pub use fresnel::*;
pub use lambertian_reflection::*;
pub use lambertian_transmission::*;
pub use microfacet_reflection::*;
pub use scaled_bxdf::*;
pub use separable_bssrdf::*;
pub use specular_reflection::*;
pub use specular_transmission::*;

/// BxDF for BRDFs and BTDFs.
///
/// Lobes are stored by value and allocated in a per-shading-point arena.
/// Wrapping lobes refer to their inner lobe through an arena reference.
#[derive(Copy, Clone)]
pub enum BxDF<'arena> {
    FourierBSDF(FourierBSDF<'arena>),
    LambertianReflection(LambertianReflection),
    LambertianTransmission(LambertianTransmission),
    MicrofacetReflection(MicrofacetReflection<'arena>),
    ScaledBxDF(ScaledBxDF<'arena>),
    SeparableBSSRDFAdapter(SeparableBSSRDFAdapter),
    SpecularReflection(SpecularReflection),
    SpecularTransmission(SpecularTransmission),
}

impl<'arena> BxDF<'arena> {
    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        match self {
            BxDF::FourierBSDF(bxdf) => bxdf.get_type(),
            BxDF::LambertianReflection(bxdf) => bxdf.get_type(),
            BxDF::LambertianTransmission(bxdf) => bxdf.get_type(),
            BxDF::MicrofacetReflection(bxdf) => bxdf.get_type(),
            BxDF::ScaledBxDF(bxdf) => bxdf.get_type(),
            BxDF::SeparableBSSRDFAdapter(bxdf) => bxdf.get_type(),
            BxDF::SpecularReflection(bxdf) => bxdf.get_type(),
            BxDF::SpecularTransmission(bxdf) => bxdf.get_type(),
        }
    }

    /// Returns true if all of this lobe's flags are in `t`.
    ///
    /// * `t` - The flags to match against.
    pub fn matches_flags(&self, t: BxDFType) -> bool {
        t.contains(self.get_type())
    }

    /// Returns the value of the distribution function for the given pair of
    /// directions. Specular lobes always return zero.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        match self {
            BxDF::FourierBSDF(bxdf) => bxdf.f(wo, wi),
            BxDF::LambertianReflection(bxdf) => bxdf.f(wo, wi),
            BxDF::LambertianTransmission(bxdf) => bxdf.f(wo, wi),
            BxDF::MicrofacetReflection(bxdf) => bxdf.f(wo, wi),
            BxDF::ScaledBxDF(bxdf) => bxdf.f(wo, wi),
            BxDF::SeparableBSSRDFAdapter(bxdf) => bxdf.f(wo, wi),
            BxDF::SpecularReflection(_) | BxDF::SpecularTransmission(_) => Spectrum::ZERO,
        }
    }

    /// Samples an incident direction for the outgoing direction `wo`.
    /// Lobes without a dedicated strategy draw a cosine-weighted direction in
    /// the hemisphere of `wo`.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> BxDFSample {
        let sample = match self {
            BxDF::FourierBSDF(bxdf) => bxdf.sample_f(wo, u),
            BxDF::LambertianTransmission(bxdf) => bxdf.sample_f(wo, u),
            BxDF::MicrofacetReflection(bxdf) => bxdf.sample_f(wo, u),
            BxDF::ScaledBxDF(bxdf) => bxdf.sample_f(wo, u),
            BxDF::SpecularReflection(bxdf) => bxdf.sample_f(wo, u),
            BxDF::SpecularTransmission(bxdf) => bxdf.sample_f(wo, u),
            BxDF::LambertianReflection(_) | BxDF::SeparableBSSRDFAdapter(_) => {
                // Cosine-sample the hemisphere, flipping the direction if necessary.
                let mut wi = cosine_sample_hemisphere(u);
                if wo.z < 0.0 {
                    wi.z *= -1.0;
                }
                BxDFSample::new(self.f(wo, &wi), self.pdf(wo, &wi), wi, self.get_type())
            }
        };

        debug_assert!(
            sample.pdf == 0.0
                || (same_hemisphere(wo, &sample.wi)
                    && sample.sampled_type.contains(BxDFType::BSDF_REFLECTION))
                || (!same_hemisphere(wo, &sample.wi)
                    && sample.sampled_type.contains(BxDFType::BSDF_TRANSMISSION)),
            "{} sampled a direction outside its declared hemisphere",
            self
        );
        sample
    }

    /// Evaluates the PDF of `sample_f()`. Specular lobes return zero since
    /// their distribution is a Dirac delta.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        match self {
            BxDF::FourierBSDF(bxdf) => bxdf.pdf(wo, wi),
            BxDF::LambertianTransmission(bxdf) => bxdf.pdf(wo, wi),
            BxDF::MicrofacetReflection(bxdf) => bxdf.pdf(wo, wi),
            BxDF::ScaledBxDF(bxdf) => bxdf.pdf(wo, wi),
            BxDF::SpecularReflection(_) | BxDF::SpecularTransmission(_) => 0.0,
            BxDF::LambertianReflection(_) | BxDF::SeparableBSSRDFAdapter(_) => {
                if same_hemisphere(wo, wi) {
                    abs_cos_theta(wi) * INV_PI
                } else {
                    0.0
                }
            }
        }
    }

    /// Computes the hemispherical-directional reflectance ρhd(wo). Lambertian
    /// lobes return the exact value; all others use a Monte Carlo estimate
    /// over the given samples.
    ///
    /// * `wo`      - Outgoing direction.
    /// * `samples` - Samples used by Monte Carlo algorithm.
    pub fn rho_hd(&self, wo: &Vector3f, samples: &[Point2f]) -> Spectrum {
        match self {
            BxDF::LambertianReflection(bxdf) => bxdf.rho(),
            BxDF::LambertianTransmission(bxdf) => bxdf.rho(),
            BxDF::ScaledBxDF(bxdf) => bxdf.rho_hd(wo, samples),
            _ => {
                let mut r = Spectrum::ZERO;
                for u in samples {
                    // Estimate one term of `rho_hd`.
                    let sample = self.sample_f(wo, u);
                    if sample.pdf > 0.0 {
                        r += sample.f * abs_cos_theta(&sample.wi) / sample.pdf;
                    }
                }
                r / samples.len() as Float
            }
        }
    }

    /// Computes the hemispherical-hemispherical reflectance ρhh.
    ///
    /// * `samples1` - Samples used to choose `wo`.
    /// * `samples2` - Samples used to choose `wi`.
    pub fn rho_hh(&self, samples1: &[Point2f], samples2: &[Point2f]) -> Spectrum {
        match self {
            BxDF::LambertianReflection(bxdf) => bxdf.rho(),
            BxDF::LambertianTransmission(bxdf) => bxdf.rho(),
            BxDF::ScaledBxDF(bxdf) => bxdf.rho_hh(samples1, samples2),
            _ => {
                assert!(samples1.len() == samples2.len());

                let mut r = Spectrum::ZERO;
                for (u1, u2) in samples1.iter().zip(samples2.iter()) {
                    // Estimate one term of `rho_hh`.
                    let wo = uniform_sample_hemisphere(u1);
                    let pdf_o = uniform_hemisphere_pdf();
                    let sample = self.sample_f(&wo, u2);
                    if sample.pdf > 0.0 {
                        r += sample.f * abs_cos_theta(&sample.wi) * abs_cos_theta(&wo)
                            / (pdf_o * sample.pdf);
                    }
                }
                r / (PI * samples1.len() as Float)
            }
        }
    }
}

impl<'arena> fmt::Display for BxDF<'arena> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BxDF::FourierBSDF(bxdf) => write!(f, "BxDF {{ {} }}", bxdf),
            BxDF::LambertianReflection(bxdf) => write!(f, "BxDF {{ {} }}", bxdf),
            BxDF::LambertianTransmission(bxdf) => write!(f, "BxDF {{ {} }}", bxdf),
            BxDF::MicrofacetReflection(bxdf) => write!(f, "BxDF {{ {} }}", bxdf),
            BxDF::ScaledBxDF(bxdf) => write!(f, "BxDF {{ {} }}", bxdf),
            BxDF::SeparableBSSRDFAdapter(bxdf) => write!(f, "BxDF {{ {} }}", bxdf),
            BxDF::SpecularReflection(bxdf) => write!(f, "BxDF {{ {} }}", bxdf),
            BxDF::SpecularTransmission(bxdf) => write!(f, "BxDF {{ {} }}", bxdf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::TransportMode;
    use crate::microfacet::*;
    use crate::rng::RNG;
    use bumpalo::Bump;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    fn samples(n: usize) -> Vec<Point2f> {
        let mut rng = RNG::default();
        stratified_sample_2d(&mut rng, n, n, true)
    }

    fn non_specular_lobes<'a>(
        arena: &'a Bump,
        distribution: &'a TrowbridgeReitzDistribution,
        table: &'a FourierBSDFTable,
    ) -> Vec<&'a BxDF<'a>> {
        let diffuse = LambertianReflection::alloc(arena, Spectrum::new(0.5));
        vec![
            diffuse,
            LambertianTransmission::alloc(arena, Spectrum::rgb(0.2, 0.4, 0.6)),
            MicrofacetReflection::alloc(
                arena,
                Spectrum::ONE,
                distribution,
                FresnelDielectric::new(1.0, 1.5),
            ),
            ScaledBxDF::alloc(arena, diffuse, Spectrum::new(0.25)),
            SeparableBSSRDFAdapter::alloc(
                arena,
                SeparableBSSRDF::new(1.33, TransportMode::Radiance),
            ),
            FourierBSDF::alloc(arena, table, TransportMode::Importance),
        ]
    }

    #[test]
    fn lambertian_pdf_integrates_to_one() {
        let bxdf = LambertianReflection::new(Spectrum::new(0.8));
        let bxdf = BxDF::LambertianReflection(bxdf);
        let wo = Vector3f::new(0.3, 0.1, 0.9).normalize();

        // 2025 stratified samples over the hemisphere.
        let samples = samples(45);
        let integral: Float = samples
            .iter()
            .map(|u| {
                let wi = uniform_sample_hemisphere(u);
                bxdf.pdf(&wo, &wi) / uniform_hemisphere_pdf()
            })
            .sum::<Float>()
            / samples.len() as Float;
        assert!(abs(integral - 1.0) < 1e-2, "integral = {}", integral);
    }

    #[test]
    fn lambertian_value_is_constant_in_hemisphere() {
        let bxdf = BxDF::LambertianReflection(LambertianReflection::new(Spectrum::new(0.8)));
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let expected = Spectrum::new(0.8 * INV_PI);
        for u in samples(8).iter() {
            let wi = cosine_sample_hemisphere(u);
            assert_eq!(bxdf.f(&wo, &wi), expected);
        }
    }

    #[test]
    fn sampled_pdf_matches_evaluated_pdf() {
        let arena = Bump::new();
        let distribution = TrowbridgeReitzDistribution::new(0.3, 0.3, true);
        let table = crate::reflection::fourier_bsdf_table::tests::constant_table(0.5, 1.2);
        let lobes = non_specular_lobes(&arena, &distribution, &table);

        let wo = Vector3f::new(0.4, -0.3, 0.7).normalize();
        for bxdf in lobes {
            for u in samples(6).iter() {
                let sample = bxdf.sample_f(&wo, u);
                if sample.pdf == 0.0 {
                    continue;
                }
                let pdf = bxdf.pdf(&wo, &sample.wi);
                assert!(
                    approx_eq!(Float, pdf, sample.pdf, epsilon = 1e-3 * max(1.0, pdf)),
                    "{}: sampled {} evaluated {}",
                    bxdf,
                    sample.pdf,
                    pdf
                );
            }
        }
    }

    #[test]
    fn specular_lobes_are_delta_distributions() {
        let arena = Bump::new();
        let mirror = SpecularReflection::alloc(&arena, Spectrum::ONE, FresnelNoOp::new());
        let glass = SpecularTransmission::alloc(&arena, Spectrum::ONE, 1.0, 1.5, TransportMode::Radiance);
        let wo = Vector3f::new(0.0, 0.6, 0.8);
        let wi = Vector3f::new(0.0, -0.6, 0.8);
        for bxdf in [mirror, glass] {
            assert!(bxdf.get_type().is_specular());
            assert!(bxdf.f(&wo, &wi).is_black());
            assert_eq!(bxdf.pdf(&wo, &wi), 0.0);
            assert_eq!(bxdf.sample_f(&wo, &Point2f::new(0.5, 0.5)).pdf, 1.0);
        }
    }

    #[test]
    fn scaled_lobe_keeps_inner_pdf() {
        let arena = Bump::new();
        let inner = LambertianTransmission::alloc(&arena, Spectrum::new(0.6));
        let scaled = ScaledBxDF::alloc(&arena, inner, Spectrum::new(0.5));
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let u = Point2f::new(0.2, 0.9);
        let a = inner.sample_f(&wo, &u);
        let b = scaled.sample_f(&wo, &u);
        assert_eq!(a.wi, b.wi);
        assert_eq!(a.pdf, b.pdf);
        assert_eq!(b.f, a.f * 0.5);
        assert_eq!(scaled.get_type(), inner.get_type());
    }

    #[test]
    fn lambertian_rho_is_exact() {
        let arena = Bump::new();
        let diffuse = LambertianReflection::alloc(&arena, Spectrum::new(0.5));
        let scaled = ScaledBxDF::alloc(&arena, diffuse, Spectrum::new(0.5));
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        assert_eq!(diffuse.rho_hd(&wo, &[]), Spectrum::new(0.5));
        assert_eq!(scaled.rho_hh(&[], &[]), Spectrum::new(0.25));
    }

    #[test]
    fn microfacet_rho_is_below_one() {
        let distribution = BeckmannDistribution::new(0.2, 0.2, true);
        let bxdf = BxDF::MicrofacetReflection(MicrofacetReflection::new(
            Spectrum::ONE,
            &distribution,
            FresnelNoOp::new(),
        ));
        let wo = Vector3f::new(0.3, 0.0, 0.95).normalize();
        let rho = bxdf.rho_hd(&wo, &samples(32));
        assert!(rho[0] > 0.7 && rho[0] <= 1.02, "rho = {}", rho);

        let mut rng = RNG::default();
        let s1 = stratified_sample_2d(&mut rng, 32, 32, true);
        let s2 = stratified_sample_2d(&mut rng, 32, 32, true);
        let rho = bxdf.rho_hh(&s1, &s2);
        assert!(rho[0] > 0.5 && rho[0] <= 1.02, "rho = {}", rho);
    }

    #[test]
    fn bssrdf_adapter_samples_cosine_hemisphere() {
        let bxdf = BxDF::SeparableBSSRDFAdapter(SeparableBSSRDFAdapter::new(
            SeparableBSSRDF::new(1.33, TransportMode::Radiance),
        ));
        let wo = Vector3f::new(0.0, 0.0, -1.0);
        let sample = bxdf.sample_f(&wo, &Point2f::new(0.3, 0.3));
        assert!(sample.wi.z < 0.0);
        assert!(approx_eq!(Float, sample.pdf, abs_cos_theta(&sample.wi) * INV_PI, ulps = 4));
    }

    prop_unit_vector3!(unit_vector3);
    prop_hemisphere_vector3!(hemisphere_vector3);

    proptest! {
        #[test]
        fn microfacet_reflection_is_reciprocal(
            wo in hemisphere_vector3(),
            wi in hemisphere_vector3(),
        ) {
            let distribution = TrowbridgeReitzDistribution::new(0.4, 0.2, false);
            let bxdf = MicrofacetReflection::new(
                Spectrum::new(0.9),
                &distribution,
                FresnelConductor::new(Spectrum::ONE, Spectrum::new(0.2), Spectrum::new(3.9)),
            );
            let a = bxdf.f(&wo, &wi);
            let b = bxdf.f(&wi, &wo);
            for c in 0..3 {
                prop_assert!((a[c] - b[c]).abs() <= 1e-3 * max(1.0, a[c]));
            }
        }

        #[test]
        fn lambertian_is_reciprocal(wo in unit_vector3(), wi in unit_vector3()) {
            let bxdf = BxDF::LambertianReflection(LambertianReflection::new(Spectrum::new(0.3)));
            prop_assert_eq!(bxdf.f(&wo, &wi), bxdf.f(&wi, &wo));
            prop_assert_eq!(bxdf.pdf(&wo, &wi) == 0.0, bxdf.pdf(&wi, &wo) == 0.0);
        }
    }
}
