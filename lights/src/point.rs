//! Point Light Source

use scatter_core::geometry::*;
use scatter_core::interaction::*;
use scatter_core::light::*;
use scatter_core::medium::*;
use scatter_core::pbrt::*;
use scatter_core::spectrum::*;

/// Implements an isotropic point light source that emits the same amount of
/// light in all directions.
#[derive(Clone)]
pub struct PointLight {
    /// Participating medium.
    pub medium_interface: MediumInterface,

    /// Position.
    pub p_light: Point3f,

    /// Intensity.
    pub intensity: Spectrum,
}

impl PointLight {
    /// Returns a new `PointLight`.
    ///
    /// * `p_light`          - Position.
    /// * `medium_interface` - Participating medium.
    /// * `intensity`        - Intensity.
    pub fn new(p_light: Point3f, medium_interface: MediumInterface, intensity: Spectrum) -> Self {
        Self {
            medium_interface,
            p_light,
            intensity,
        }
    }
}

impl Light for PointLight {
    fn get_type(&self) -> LightType {
        LightType::DELTA_POSITION_LIGHT
    }

    /// Return the radiance arriving at an interaction point. The direction is
    /// fully determined by the light position, so the pdf is 1.
    ///
    /// * `hit` - The interaction hit point.
    /// * `u`   - Sample value for Monte Carlo integration.
    fn sample_li(&self, hit: &Hit, _u: &Point2f) -> Li {
        let d2 = self.p_light.distance_squared(hit.p);
        if d2 == 0.0 {
            return Li::default();
        }

        let wi = (self.p_light - hit.p).normalize();
        let p1 = Hit::new_minimal(self.p_light, hit.time, Some(self.medium_interface.clone()));
        let vis = VisibilityTester::new(hit.clone(), p1);
        Li::new(wi, 1.0, Some(vis), self.intensity / d2)
    }

    fn power(&self) -> Spectrum {
        FOUR_PI * self.intensity
    }

    /// Delta lights can't be hit by chance.
    fn pdf_li(&self, _hit: &Hit, _wi: &Vector3f) -> Float {
        0.0
    }
}
