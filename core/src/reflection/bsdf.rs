//! BSDF

use super::*;
use crate::interaction::SurfaceInteraction;
use crate::rng::ONE_MINUS_EPSILON;

/// Maximum number of BxDFs that can be stored in `BSDF`.
pub const MAX_BXDFS: usize = 8;

/// BSDF interface represents a collection of BRDFs and BTDFs.
#[derive(Clone)]
pub struct BSDF<'arena> {
    /// The shading normal. First axis of the local shading frame.
    pub ns: Normal3f,

    /// The geometric normal defined by surface geometry.
    pub ng: Normal3f,

    /// Second axis for the orthonormal coordinate system.
    pub ss: Vector3f,

    /// Third axis for the orthonormal coordinate system.
    pub ts: Vector3f,

    /// The `BxDFs`.
    pub bxdfs: Vec<&'arena BxDF<'arena>>,

    /// Relative index of refraction over the surface boundary.
    pub eta: Float,
}

impl<'arena> BSDF<'arena> {
    /// Creates a new `BSDF`.
    ///
    /// * `si`  - The differential geometry at the point on a surface.
    /// * `eta` - Optional relative index of refraction over the surface
    ///           boundary. Defaults to 1.0 for opaque surfaces.
    pub fn new(si: &SurfaceInteraction, eta: Option<Float>) -> Self {
        let ns = si.shading.n;
        let ss = si.shading.dpdu.normalize();
        Self {
            eta: eta.unwrap_or(1.0),
            ns,
            ng: si.hit.n,
            ss,
            ts: Vector3f::from(ns).cross(&ss),
            bxdfs: Vec::with_capacity(MAX_BXDFS),
        }
    }

    /// Add a `BxDF`.
    ///
    /// * `bxdf` - The `BxDF`.
    pub fn add(&mut self, bxdf: &'arena BxDF<'arena>) {
        assert!(
            self.bxdfs.len() < MAX_BXDFS,
            "Cannot add BxDFs. BSDF maximum limit {} reached.",
            MAX_BXDFS
        );
        self.bxdfs.push(bxdf);
    }

    /// Returns the number of `BxDF`s that match the given type.
    ///
    /// * `bxdf_type` - The `BxDFType` to match.
    pub fn num_components(&self, bxdf_type: BxDFType) -> usize {
        self.bxdfs
            .iter()
            .filter(|b| b.matches_flags(bxdf_type))
            .count()
    }

    /// Transforms a vector from world space to local space.
    ///
    /// * `v` - The vector to transform.
    pub fn world_to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.ss), v.dot(&self.ts), v.dot(&self.ns))
    }

    /// Transforms a vector from local space to world space.
    ///
    /// * `v` - The vector to transform.
    pub fn local_to_world(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(
            self.ss.x * v.x + self.ts.x * v.y + self.ns.x * v.z,
            self.ss.y * v.x + self.ts.y * v.y + self.ns.y * v.z,
            self.ss.z * v.x + self.ts.z * v.y + self.ns.z * v.z,
        )
    }

    /// Returns the sum of matching lobe values whose reflection/transmission
    /// flag agrees with the geometric configuration of the directions.
    fn sum_f(
        &self,
        wo_w: &Vector3f,
        wi_w: &Vector3f,
        wo: &Vector3f,
        wi: &Vector3f,
        bxdf_type: BxDFType,
    ) -> Spectrum {
        let reflect = wi_w.dot(&self.ng) * wo_w.dot(&self.ng) > 0.0;
        let side = if reflect {
            BxDFType::BSDF_REFLECTION
        } else {
            BxDFType::BSDF_TRANSMISSION
        };
        self.bxdfs
            .iter()
            .filter(|b| b.matches_flags(bxdf_type) && b.get_type().intersects(side))
            .fold(Spectrum::ZERO, |l, b| l + b.f(wo, wi))
    }

    /// Returns the BSDF evaluated for a pair of directions.
    ///
    /// * `wo_w`      - Outgoing direction in world-space.
    /// * `wi_w`      - Incident direction in world-space.
    /// * `bxdf_type` - The `BxDFType` to evaluate.
    pub fn f(&self, wo_w: &Vector3f, wi_w: &Vector3f, bxdf_type: BxDFType) -> Spectrum {
        let wi = self.world_to_local(wi_w);
        let wo = self.world_to_local(wo_w);
        if wo.z == 0.0 {
            Spectrum::ZERO
        } else {
            self.sum_f(wo_w, wi_w, &wo, &wi, bxdf_type)
        }
    }

    /// Samples one matching component chosen uniformly with `u[0]` and
    /// returns the combined value and pdf of all matching components for the
    /// sampled direction. Specular samples are returned as is, scaled by the
    /// component selection probability.
    ///
    /// * `wo_w`      - Outgoing direction in world-space.
    /// * `u`         - The 2D uniform random values.
    /// * `bxdf_type` - The `BxDFType` to sample.
    pub fn sample_f(&self, wo_w: &Vector3f, u: &Point2f, bxdf_type: BxDFType) -> BxDFSample {
        // Choose which `BxDF` to sample.
        let matching_comps = self.num_components(bxdf_type);
        if matching_comps == 0 {
            return BxDFSample::default();
        }
        let comp = min(
            (u[0] * matching_comps as Float).floor() as usize,
            matching_comps - 1,
        );
        let (chosen, bxdf) = match self
            .bxdfs
            .iter()
            .enumerate()
            .filter(|(_, b)| b.matches_flags(bxdf_type))
            .nth(comp)
        {
            Some(found) => found,
            None => return BxDFSample::default(),
        };

        // Remap BxDF sample `u` to `[0,1)^2`.
        let u_remapped = Point2f::new(
            min(u[0] * matching_comps as Float - comp as Float, ONE_MINUS_EPSILON),
            u[1],
        );

        // Sample chosen `BxDF`.
        let wo = self.world_to_local(wo_w);
        if wo.z == 0.0 {
            return BxDFSample::default();
        }
        let sample = bxdf.sample_f(&wo, &u_remapped);
        if sample.pdf == 0.0 {
            return BxDFSample::from(sample.sampled_type);
        }
        let wi_w = self.local_to_world(&sample.wi);

        // Compute overall PDF with all matching BxDFs.
        let specular = bxdf.get_type().is_specular();
        let mut pdf = sample.pdf;
        if !specular && matching_comps > 1 {
            pdf += self
                .bxdfs
                .iter()
                .enumerate()
                .filter(|(i, b)| *i != chosen && b.matches_flags(bxdf_type))
                .map(|(_, b)| b.pdf(&wo, &sample.wi))
                .sum::<Float>();
        }
        pdf /= matching_comps as Float;

        // Compute value of BSDF for sampled direction.
        let f = if specular {
            sample.f
        } else {
            self.sum_f(wo_w, &wi_w, &wo, &sample.wi, bxdf_type)
        };

        BxDFSample::new(f, pdf, wi_w, sample.sampled_type)
    }

    /// Computes the hemispherical-directional reflectance function ρ.
    ///
    /// * `wo_w`      - Outgoing direction in world-space.
    /// * `samples`   - Samples used by Monte Carlo algorithm.
    /// * `bxdf_type` - The `BxDFType` to evaluate.
    pub fn rho_hd(&self, wo_w: &Vector3f, samples: &[Point2f], bxdf_type: BxDFType) -> Spectrum {
        let wo = self.world_to_local(wo_w);
        self.bxdfs
            .iter()
            .filter(|b| b.matches_flags(bxdf_type))
            .fold(Spectrum::ZERO, |l, b| l + b.rho_hd(&wo, samples))
    }

    /// Computes the hemispherical-hemispherical reflectance function ρ.
    ///
    /// * `samples1`  - Samples used by Monte Carlo algorithm.
    /// * `samples2`  - Samples used by Monte Carlo algorithm.
    /// * `bxdf_type` - The `BxDFType` to evaluate.
    pub fn rho_hh(
        &self,
        samples1: &[Point2f],
        samples2: &[Point2f],
        bxdf_type: BxDFType,
    ) -> Spectrum {
        self.bxdfs
            .iter()
            .filter(|b| b.matches_flags(bxdf_type))
            .fold(Spectrum::ZERO, |l, b| l + b.rho_hh(samples1, samples2))
    }

    /// Evaluates the average PDF of matching components for a pair of
    /// directions.
    ///
    /// * `wo_w`      - Outgoing direction in world-space.
    /// * `wi_w`      - Incident direction in world-space.
    /// * `bxdf_type` - The `BxDFType` to evaluate.
    pub fn pdf(&self, wo_w: &Vector3f, wi_w: &Vector3f, bxdf_type: BxDFType) -> Float {
        let wo = self.world_to_local(wo_w);
        let wi = self.world_to_local(wi_w);
        if wo.z == 0.0 {
            return 0.0;
        }

        let (matching_comps, pdf) = self
            .bxdfs
            .iter()
            .filter(|b| b.matches_flags(bxdf_type))
            .fold((0, 0.0), |(n, pdf), b| (n + 1, pdf + b.pdf(&wo, &wi)));
        if matching_comps > 0 {
            pdf / matching_comps as Float
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use float_cmp::approx_eq;

    fn tilted_interaction() -> SurfaceInteraction {
        // Surface normal along (0, -0.6, 0.8).
        SurfaceInteraction::new(
            Point3f::new(0.0, 0.0, 0.0),
            Point2f::new(0.5, 0.5),
            Vector3f::new(0.0, 0.0, 1.0),
            Vector3f::new(1.0, 0.0, 0.0),
            Vector3f::new(0.0, 0.8, 0.6),
            0.0,
        )
    }

    #[test]
    fn shading_frame_round_trip() {
        let si = tilted_interaction();
        let bsdf = BSDF::new(&si, None);
        assert_eq!(bsdf.eta, 1.0);

        let n = bsdf.world_to_local(&Vector3f::from(si.hit.n));
        assert!(approx_eq!(Float, n.z, 1.0, epsilon = 1e-6));

        let v = Vector3f::new(0.3, -0.5, 0.7);
        let back = bsdf.local_to_world(&bsdf.world_to_local(&v));
        for i in 0..3 {
            assert!(approx_eq!(Float, back[i], v[i], epsilon = 1e-5));
        }
    }

    #[test]
    fn num_components_matches_subsets() {
        let arena = Bump::new();
        let mut bsdf = BSDF::new(&tilted_interaction(), None);
        bsdf.add(LambertianReflection::alloc(&arena, Spectrum::new(0.5)));
        bsdf.add(SpecularReflection::alloc(&arena, Spectrum::ONE, FresnelNoOp::new()));
        bsdf.add(LambertianTransmission::alloc(&arena, Spectrum::new(0.5)));

        assert_eq!(bsdf.num_components(BxDFType::BSDF_ALL), 3);
        assert_eq!(
            bsdf.num_components(BxDFType::BSDF_ALL & !BxDFType::BSDF_SPECULAR),
            2
        );
        assert_eq!(
            bsdf.num_components(BxDFType::BSDF_REFLECTION | BxDFType::BSDF_DIFFUSE),
            1
        );
    }

    #[test]
    #[should_panic]
    fn add_beyond_capacity_panics() {
        let arena = Bump::new();
        let mut bsdf = BSDF::new(&tilted_interaction(), None);
        for _ in 0..=MAX_BXDFS {
            bsdf.add(LambertianReflection::alloc(&arena, Spectrum::new(0.1)));
        }
    }

    #[test]
    fn empty_bsdf_returns_zero_sample() {
        let bsdf = BSDF::new(&tilted_interaction(), Some(1.5));
        let w = Vector3f::new(0.0, 0.0, 1.0);
        let sample = bsdf.sample_f(&w, &Point2f::new(0.5, 0.5), BxDFType::BSDF_ALL);
        assert_eq!(sample.pdf, 0.0);
        assert!(sample.f.is_black());
        assert_eq!(bsdf.pdf(&w, &w, BxDFType::BSDF_ALL), 0.0);
    }

    #[test]
    fn sampled_pdf_combines_matching_components() {
        let arena = Bump::new();
        let si = tilted_interaction();
        let mut bsdf = BSDF::new(&si, None);
        bsdf.add(LambertianReflection::alloc(&arena, Spectrum::new(0.5)));
        bsdf.add(LambertianTransmission::alloc(&arena, Spectrum::new(0.25)));

        let wo_w = Vector3f::from(si.hit.n);
        for &u0 in [0.1, 0.4, 0.6, 0.9].iter() {
            let sample = bsdf.sample_f(&wo_w, &Point2f::new(u0, 0.3), BxDFType::BSDF_ALL);
            assert!(sample.pdf > 0.0);
            let pdf = bsdf.pdf(&wo_w, &sample.wi, BxDFType::BSDF_ALL);
            assert!(approx_eq!(Float, pdf, sample.pdf, epsilon = 1e-5));
            let f = bsdf.f(&wo_w, &sample.wi, BxDFType::BSDF_ALL);
            assert_eq!(f, sample.f);

            // The first half of `u[0]` picks the reflection lobe.
            let reflected = sample.wi.dot(&si.hit.n) > 0.0;
            assert_eq!(reflected, u0 < 0.5);
        }
    }

    #[test]
    fn specular_component_short_circuits() {
        let arena = Bump::new();
        let si = tilted_interaction();
        let mut bsdf = BSDF::new(&si, None);
        bsdf.add(LambertianReflection::alloc(&arena, Spectrum::new(0.5)));
        bsdf.add(SpecularReflection::alloc(&arena, Spectrum::new(0.8), FresnelNoOp::new()));

        let wo_w = bsdf.local_to_world(&Vector3f::new(0.0, 0.6, 0.8));
        let sample = bsdf.sample_f(&wo_w, &Point2f::new(0.75, 0.5), BxDFType::BSDF_ALL);
        assert!(sample.sampled_type.is_specular());
        assert!(approx_eq!(Float, sample.pdf, 0.5, ulps = 2));

        // Mirror direction and value 0.8 / cos θ.
        let wi = bsdf.world_to_local(&sample.wi);
        assert!(approx_eq!(Float, wi.y, -0.6, epsilon = 1e-5));
        assert!(approx_eq!(Float, sample.f[0], 0.8 / 0.8, epsilon = 1e-4));

        // Excluding specular lobes only samples the diffuse one.
        let sample = bsdf.sample_f(
            &wo_w,
            &Point2f::new(0.75, 0.5),
            BxDFType::BSDF_ALL & !BxDFType::BSDF_SPECULAR,
        );
        assert!(!sample.sampled_type.is_specular());
        assert!(approx_eq!(
            Float,
            sample.pdf,
            abs_cos_theta(&bsdf.world_to_local(&sample.wi)) * INV_PI,
            epsilon = 1e-5
        ));
    }

    #[test]
    fn rho_sums_matching_lobes() {
        let arena = Bump::new();
        let mut bsdf = BSDF::new(&tilted_interaction(), None);
        bsdf.add(LambertianReflection::alloc(&arena, Spectrum::new(0.5)));
        bsdf.add(LambertianTransmission::alloc(&arena, Spectrum::new(0.25)));
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        assert_eq!(bsdf.rho_hd(&wo, &[], BxDFType::BSDF_ALL), Spectrum::new(0.75));
        assert_eq!(
            bsdf.rho_hh(&[], &[], BxDFType::BSDF_REFLECTION | BxDFType::BSDF_DIFFUSE),
            Spectrum::new(0.5)
        );
    }
}
