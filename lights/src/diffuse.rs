//! Diffuse Area Light Source

use scatter_core::geometry::*;
use scatter_core::interaction::*;
use scatter_core::light::*;
use scatter_core::medium::*;
use scatter_core::pbrt::*;
use scatter_core::spectrum::*;
use scatter_core::stats::*;

/// Statistics counter for the number of area lights created.
pub const AREA_LIGHTS_STAT: &str = "Scene/Area lights";

/// Implements a basic area light source with uniform spatial and directional
/// radiance distribution.
#[derive(Clone)]
pub struct DiffuseAreaLight {
    /// Used to trace multiple shadow rays to the light to compute soft shadows.
    pub n_samples: usize,

    /// Participating medium.
    pub medium_interface: MediumInterface,

    /// Emitted radiance.
    pub l_emit: Spectrum,

    /// Shape describing surface of the light source.
    pub shape: ArcShape,

    /// Surface area of the shape.
    pub area: Float,

    /// Indicates whether light source 2-sided.
    pub two_sided: bool,
}

impl DiffuseAreaLight {
    /// Returns a new `DiffuseAreaLight`.
    ///
    /// * `medium_interface` - Participating medium.
    /// * `l_emit`           - Emitted radiance.
    /// * `n_samples`        - Used to trace multiple shadow rays to the light
    ///                        to compute soft shadows. Default to 1.
    /// * `shape`            - Shape describing surface of the light source.
    /// * `two_sided`        - Indicates whether light source 2-sided.
    /// * `stats`            - Statistics registry counting area lights.
    pub fn new(
        medium_interface: MediumInterface,
        l_emit: Spectrum,
        n_samples: usize,
        shape: ArcShape,
        two_sided: bool,
        stats: &StatsRegistry,
    ) -> Self {
        stats.counter(AREA_LIGHTS_STAT).increment();

        let area = shape.area();
        debug!(
            "DiffuseAreaLight on {} with area {}, two_sided = {}",
            shape.get_type(),
            area,
            two_sided
        );

        Self {
            n_samples: max(1, n_samples),
            medium_interface,
            l_emit,
            shape,
            area,
            two_sided,
        }
    }
}

impl Light for DiffuseAreaLight {
    fn get_type(&self) -> LightType {
        LightType::AREA_LIGHT
    }

    /// Return the radiance arriving at an interaction point.
    ///
    /// * `hit` - The interaction hit point.
    /// * `u`   - Sample value for Monte Carlo integration.
    fn sample_li(&self, hit: &Hit, u: &Point2f) -> Li {
        let (mut p_shape_hit, pdf) = self.shape.sample_solid_angle(hit, u);
        p_shape_hit.medium_interface = Some(self.medium_interface.clone());

        let wi = p_shape_hit.p - hit.p;
        if pdf == 0.0 || wi.length_squared() == 0.0 {
            return Li::default();
        }

        let wi = wi.normalize();
        let value = self.l(&p_shape_hit, &(-wi));
        let visibility = Some(VisibilityTester::new(hit.clone(), p_shape_hit));
        Li::new(wi, pdf, visibility, value)
    }

    /// Return the total emitted power.
    fn power(&self) -> Spectrum {
        let sides = if self.two_sided { 2.0 } else { 1.0 };
        sides * self.l_emit * self.area * PI
    }

    /// Returns the probability density with respect to solid angle for the
    /// light's `sample_li()`.
    ///
    /// * `hit` - The interaction hit point.
    /// * `wi`  - The incident direction.
    fn pdf_li(&self, hit: &Hit, wi: &Vector3f) -> Float {
        self.shape.pdf_solid_angle(hit, wi)
    }

    fn get_num_samples(&self) -> usize {
        self.n_samples
    }
}

impl AreaLight for DiffuseAreaLight {
    /// Returns `l_emit` on the side the surface normal faces, or on both sides
    /// for two-sided lights.
    ///
    /// * `hit` - Point on the surface to evaluate emitted radiance.
    /// * `w`   - Outgoing direction.
    fn l(&self, hit: &Hit, w: &Vector3f) -> Spectrum {
        if self.two_sided || hit.n.dot(w) > 0.0 {
            self.l_emit
        } else {
            Spectrum::ZERO
        }
    }
}
