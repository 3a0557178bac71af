//! Light

use crate::geometry::*;
use crate::interaction::*;
use crate::pbrt::*;
use crate::sampling::*;
use crate::scene::*;
use crate::spectrum::*;
use std::sync::Arc;

mod light_type;
mod visibility_tester;

// Re-export
pub use light_type::*;
pub use visibility_tester::*;

/// Return value for `Light::sample_li()`.
#[derive(Clone)]
pub struct Li {
    /// Incident direction.
    pub wi: Vector3f,

    /// PDF.
    pub pdf: Float,

    /// Visibility tester.
    pub visibility: Option<VisibilityTester>,

    /// Radiance arriving at intersection point.
    pub value: Spectrum,
}

impl Li {
    /// Return a new `Li`.
    ///
    /// * `wi`         - Incident direction.
    /// * `pdf`        - PDF.
    /// * `visibility` - Visibility tester.
    /// * `value`      - Radiance arriving at intersection point.
    pub fn new(
        wi: Vector3f,
        pdf: Float,
        visibility: Option<VisibilityTester>,
        value: Spectrum,
    ) -> Self {
        Self {
            wi,
            pdf,
            visibility,
            value,
        }
    }
}

impl Default for Li {
    /// Returns a sample that carries no radiance.
    fn default() -> Self {
        Self::new(Vector3f::zero(), 0.0, None, Spectrum::ZERO)
    }
}

/// Light trait provides common behavior.
pub trait Light {
    /// Initialize the light source before rendering begins.
    ///
    /// * `scene` - The scene.
    fn preprocess(&self, _scene: &Scene) {}

    /// Returns the type of light.
    fn get_type(&self) -> LightType;

    /// Samples an incident direction at a reference point and returns the
    /// radiance arriving from that direction.
    ///
    /// * `hit` - The interaction hit point.
    /// * `u`   - Sample value for Monte Carlo integration.
    fn sample_li(&self, hit: &Hit, u: &Point2f) -> Li;

    /// Return the total emitted power.
    fn power(&self) -> Spectrum;

    /// Returns emitted radiance due to that light along a ray that escapes the
    /// scene bounds.
    ///
    /// * `ray` - The ray.
    fn le(&self, _ray: &Ray) -> Spectrum {
        Spectrum::ZERO
    }

    /// Returns the probability density with respect to solid angle for the
    /// light's `sample_li()`.
    ///
    /// * `hit` - The interaction hit point.
    /// * `wi`  - The incident direction.
    fn pdf_li(&self, hit: &Hit, wi: &Vector3f) -> Float;

    /// Returns whether light source is a delta light.
    fn is_delta_light(&self) -> bool {
        self.get_type().is_delta_light()
    }

    /// Returns the number of samples to use for the light source.
    fn get_num_samples(&self) -> usize {
        1
    }
}

/// Atomic reference counted `Light`.
pub type ArcLight = Arc<dyn Light + Send + Sync>;

/// AreaLight trait provides common behavior for area lights.
pub trait AreaLight: Light {
    /// Returns the area light's emitted radiance in a given outgoing direction.
    ///
    /// * `hit` - Point on the surface to evaluate emitted radiance.
    /// * `w`   - Outgoing direction.
    fn l(&self, hit: &Hit, w: &Vector3f) -> Spectrum;
}

/// Atomic reference counted `AreaLight`.
pub type ArcAreaLight = Arc<dyn AreaLight + Send + Sync>;

/// Returns a distribution with probabilities proportional to the luminance of
/// each light's power, or `None` if there are no lights.
///
/// * `lights` - The lights.
pub fn compute_light_power_distribution(lights: &[ArcLight]) -> Option<Distribution1D> {
    if lights.is_empty() {
        None
    } else {
        let light_power: Vec<Float> = lights.iter().map(|light| light.power().y()).collect();
        Some(Distribution1D::new(light_power))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Isotropic point emitter used by unit tests.
    pub(crate) struct TestPointLight {
        pub p: Point3f,
        pub i: Spectrum,
    }

    impl Light for TestPointLight {
        fn get_type(&self) -> LightType {
            LightType::DELTA_POSITION_LIGHT
        }

        fn sample_li(&self, hit: &Hit, _u: &Point2f) -> Li {
            let wi = (self.p - hit.p).normalize();
            let to = Hit::new_minimal(self.p, hit.time, None);
            Li::new(
                wi,
                1.0,
                Some(VisibilityTester::new(hit.clone(), to)),
                self.i / self.p.distance_squared(hit.p),
            )
        }

        fn power(&self) -> Spectrum {
            FOUR_PI * self.i
        }

        fn pdf_li(&self, _hit: &Hit, _wi: &Vector3f) -> Float {
            0.0
        }
    }

    pub(crate) fn point_light(x: Float, y: Float, z: Float, i: Float) -> ArcLight {
        Arc::new(TestPointLight {
            p: Point3f::new(x, y, z),
            i: Spectrum::new(i),
        })
    }

    #[test]
    fn power_distribution_follows_luminance() {
        let lights = vec![point_light(0.0, 0.0, 0.0, 1.0), point_light(1.0, 0.0, 0.0, 3.0)];
        let distrib = compute_light_power_distribution(&lights).unwrap();
        assert!((distrib.discrete_pdf(0) - 0.25).abs() < 1e-6);
        assert!((distrib.discrete_pdf(1) - 0.75).abs() < 1e-6);
        assert!(compute_light_power_distribution(&[]).is_none());
    }

    #[test]
    fn delta_light_defaults() {
        let light = point_light(0.0, 0.0, 0.0, 1.0);
        assert!(light.is_delta_light());
        assert_eq!(light.get_num_samples(), 1);
        assert!(light.le(&Ray::unbounded(Point3f::default(), Vector3f::new(0.0, 0.0, 1.0))).is_black());
    }
}
