//! Scene

use crate::geometry::*;
use crate::light::*;
use crate::primitives::*;
use std::sync::Arc;

/// Scene.
#[derive(Clone)]
pub struct Scene {
    /// An aggregate of all primitives in the scene.
    pub aggregate: ArcPrimitive,

    /// All light sources in the scene.
    pub lights: Vec<ArcLight>,

    /// Infinite light sources in the scene.
    pub infinite_lights: Vec<ArcLight>,

    /// The bounding box of the scene geometry.
    pub world_bound: Bounds3f,
}

impl Scene {
    /// Creates a new `Scene` and lets every light preprocess it.
    ///
    /// * `aggregate` - An aggregate of all primitives in the scene.
    /// * `lights`    - All light sources in the scene.
    pub fn new(aggregate: ArcPrimitive, lights: Vec<ArcLight>) -> Self {
        let infinite_lights = lights
            .iter()
            .filter(|l| l.get_type().matches(LightType::INFINITE_LIGHT))
            .map(Arc::clone)
            .collect();

        let scene = Self {
            world_bound: aggregate.world_bound(),
            aggregate,
            lights,
            infinite_lights,
        };

        for light in scene.lights.iter() {
            light.preprocess(&scene);
        }

        debug!(
            "Scene with {} lights ({} infinite), bounds {:?}",
            scene.lights.len(),
            scene.infinite_lights.len(),
            scene.world_bound
        );

        scene
    }

    /// Traces the ray into the scene and returns the closest intersection.
    /// The ray's `t_max` is shortened to the hit distance.
    ///
    /// * `ray` - The ray to trace.
    pub fn intersect(&self, ray: &mut Ray) -> Option<PrimitiveIntersection<'_>> {
        self.aggregate.intersect(ray)
    }

    /// Traces the ray into the scene and returns whether or not an intersection
    /// occurred.
    ///
    /// * `ray` - The ray to trace.
    pub fn intersect_p(&self, ray: &Ray) -> bool {
        self.aggregate.intersect_p(ray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::tests::point_light;
    use crate::medium::MediumInterface;
    use crate::shapes::Disk;

    fn scene() -> Scene {
        let disk: ArcPrimitive = Arc::new(GeometricPrimitive::new(
            Arc::new(Disk::new(Point3f::new(0.0, 0.0, 0.0), 2.0, false)),
            None,
            None,
            MediumInterface::vacuum(),
        ));
        Scene::new(
            Arc::new(PrimitiveList::new(vec![disk])),
            vec![point_light(0.0, 0.0, 1.0, 1.0)],
        )
    }

    #[test]
    fn world_bound_from_aggregate() {
        let s = scene();
        assert_eq!(s.world_bound.p_min, Point3f::new(-2.0, -2.0, 0.0));
        assert_eq!(s.world_bound.p_max, Point3f::new(2.0, 2.0, 0.0));
        assert_eq!(s.lights.len(), 1);
        assert!(s.infinite_lights.is_empty());
    }

    #[test]
    fn intersect_through_aggregate() {
        let s = scene();
        let mut ray = Ray::unbounded(Point3f::new(0.5, 0.5, 3.0), Vector3f::new(0.0, 0.0, -1.0));
        assert!(s.intersect_p(&ray));
        let it = s.intersect(&mut ray).unwrap();
        assert!((ray.t_max - 3.0).abs() < 1e-5);
        assert!(it.isect.hit.p.z.abs() < 1e-5);
    }
}
