//! Light Distribution.

mod power;
mod spatial;
mod uniform;

pub use power::*;
pub use spatial::*;
pub use uniform::*;

use crate::geometry::*;
use crate::sampling::*;
use crate::scene::*;
use std::fmt;
use std::sync::Arc;

/// Default number of voxels along the widest scene dimension.
pub const DEFAULT_MAX_VOXELS: usize = 64;

/// Light sampling strategy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LightSampleStrategy {
    /// Sample all light sources uniformly.
    Uniform,

    /// Samples light sources according to their emitted power.
    Power,

    /// Compute light contributions in regions of the scene and samples from a
    /// related distribution.
    Spatial,
}

impl From<&str> for LightSampleStrategy {
    /// Returns a `LightSampleStrategy` given a string name. Unknown names
    /// fall back to `Spatial`.
    fn from(name: &str) -> Self {
        match name {
            "uniform" => Self::Uniform,
            "power" => Self::Power,
            "spatial" => Self::Spatial,
            _ => {
                warn!(
                    "Light sample distribution type '{}' unknown. Using 'spatial'.",
                    name
                );
                Self::Spatial
            }
        }
    }
}

impl fmt::Display for LightSampleStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform => write!(f, "uniform"),
            Self::Power => write!(f, "power"),
            Self::Spatial => write!(f, "spatial"),
        }
    }
}

/// Interface of light distribution implementations that provide probability
/// distributions for sampling light sources at a given point in space.
pub trait LightDistribution {
    /// Given a point `p` in space, returns a sampling distribution for light
    /// sources at that point, or `None` if the scene has no lights.
    ///
    /// * `p` - The point.
    fn lookup(&self, p: &Point3f) -> Option<Arc<Distribution1D>>;
}

/// Atomic reference counted `LightDistribution`.
pub type ArcLightDistribution = Arc<dyn LightDistribution + Send + Sync>;

/// Returns a new `LightDistribution` implementation. A scene with a single
/// light always gets the uniform distribution.
///
/// * `strategy` - The strategy to use for light sampling.
/// * `scene`    - The scene.
pub fn create_light_sample_distribution(
    strategy: LightSampleStrategy,
    scene: &Scene,
) -> ArcLightDistribution {
    let strategy = if scene.lights.len() == 1 {
        LightSampleStrategy::Uniform
    } else {
        strategy
    };
    match strategy {
        LightSampleStrategy::Uniform => Arc::new(UniformLightDistribution::new(scene)),
        LightSampleStrategy::Power => Arc::new(PowerLightDistribution::new(scene)),
        LightSampleStrategy::Spatial => {
            Arc::new(SpatialLightDistribution::new(scene, DEFAULT_MAX_VOXELS))
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::light::tests::point_light;
    use crate::light::ArcLight;
    use crate::medium::MediumInterface;
    use crate::primitives::*;
    use crate::shapes::Disk;

    /// A scene spanning [-4, 4] x [-4, 4] x {0} with the given lights.
    pub(crate) fn scene_with(lights: Vec<ArcLight>) -> Scene {
        let floor: ArcPrimitive = Arc::new(GeometricPrimitive::new(
            Arc::new(Disk::new(Point3f::new(0.0, 0.0, 0.0), 4.0, false)),
            None,
            None,
            MediumInterface::vacuum(),
        ));
        Scene::new(Arc::new(PrimitiveList::new(vec![floor])), lights)
    }

    #[test]
    fn strategy_from_name() {
        assert_eq!(LightSampleStrategy::from("uniform"), LightSampleStrategy::Uniform);
        assert_eq!(LightSampleStrategy::from("power"), LightSampleStrategy::Power);
        assert_eq!(LightSampleStrategy::from("spatial"), LightSampleStrategy::Spatial);
        assert_eq!(LightSampleStrategy::from("bogus"), LightSampleStrategy::Spatial);
        assert_eq!(LightSampleStrategy::Power.to_string(), "power");
    }

    #[test]
    fn single_light_is_always_certain() {
        let scene = scene_with(vec![point_light(1.0, 1.0, 1.0, 5.0)]);
        for name in ["uniform", "power", "spatial", "unknown"] {
            let distrib = create_light_sample_distribution(name.into(), &scene);
            for p in [
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(-3.0, 2.0, 0.0),
                Point3f::new(100.0, -100.0, 7.0),
            ] {
                let d = distrib.lookup(&p).unwrap();
                assert_eq!(d.count(), 1);
                assert_eq!(d.discrete_pdf(0), 1.0);
            }
        }
    }

    #[test]
    fn no_lights_no_distribution() {
        let scene = scene_with(vec![]);
        for strategy in [
            LightSampleStrategy::Uniform,
            LightSampleStrategy::Power,
            LightSampleStrategy::Spatial,
        ] {
            let distrib = create_light_sample_distribution(strategy, &scene);
            assert!(distrib.lookup(&Point3f::new(0.0, 0.0, 0.0)).is_none());
        }
    }
}
