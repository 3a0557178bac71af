//! Primitive List

use super::*;

/// An aggregate that tests every primitive in turn. Intended for scenes with
/// a handful of primitives.
#[derive(Clone, Default)]
pub struct PrimitiveList {
    /// The primitives.
    pub primitives: Vec<ArcPrimitive>,

    /// Bounds of all primitives.
    bounds: Bounds3f,
}

impl PrimitiveList {
    /// Create a new aggregate.
    ///
    /// * `primitives` - The primitives.
    pub fn new(primitives: Vec<ArcPrimitive>) -> Self {
        let bounds = primitives
            .iter()
            .fold(Bounds3f::empty(), |b, p| b.union(&p.world_bound()));
        Self { primitives, bounds }
    }
}

impl Primitive for PrimitiveList {
    fn world_bound(&self) -> Bounds3f {
        self.bounds
    }

    fn intersect(&self, r: &mut Ray) -> Option<PrimitiveIntersection<'_>> {
        // Each hit shortens `r.t_max`, so the last hit is the closest.
        let mut closest = None;
        for primitive in self.primitives.iter() {
            if let Some(it) = primitive.intersect(r) {
                closest = Some(it);
            }
        }
        closest
    }

    fn intersect_p(&self, r: &Ray) -> bool {
        self.primitives.iter().any(|p| p.intersect_p(r))
    }

    /// Aggregates never carry area lights; callers must query the primitive
    /// returned by `intersect()`.
    fn get_area_light(&self) -> Option<ArcAreaLight> {
        panic!(
            "PrimitiveList::get_area_light() shouldn't be called; \
            should've gone to GeometricPrimitive."
        );
    }

    /// Aggregates never carry materials; callers must query the primitive
    /// returned by `intersect()`.
    fn get_material(&self) -> Option<ArcMaterial> {
        panic!(
            "PrimitiveList::get_material() shouldn't be called; \
            should've gone to GeometricPrimitive."
        );
    }

    fn compute_scattering_functions<'a>(
        &'a self,
        _arena: &'a Bump,
        _si: &SurfaceInteraction,
        _mode: TransportMode,
    ) -> Option<BSDF<'a>> {
        panic!(
            "PrimitiveList::compute_scattering_functions() shouldn't be \
            called; should've gone to GeometricPrimitive."
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::medium::MediumInterface;
    use crate::shapes::Disk;

    fn disk(z: Float) -> ArcPrimitive {
        Arc::new(GeometricPrimitive::new(
            Arc::new(Disk::new(Point3f::new(0.0, 0.0, z), 1.0, false)),
            None,
            None,
            MediumInterface::vacuum(),
        ))
    }

    fn list() -> PrimitiveList {
        PrimitiveList::new(vec![disk(3.0), disk(1.0), disk(2.0)])
    }

    #[test]
    fn closest_hit_wins() {
        let aggregate = list();
        let mut ray = Ray::unbounded(Point3f::new(0.0, 0.0, 0.0), Vector3f::new(0.0, 0.0, 1.0));
        let it = aggregate.intersect(&mut ray).unwrap();
        assert!((it.isect.hit.p.z - 1.0).abs() < 1e-6);
        assert!((ray.t_max - 1.0).abs() < 1e-6);
    }

    #[test]
    fn bounds_cover_all_primitives() {
        let b = list().world_bound();
        assert_eq!(b.p_min, Point3f::new(-1.0, -1.0, 1.0));
        assert_eq!(b.p_max, Point3f::new(1.0, 1.0, 3.0));
    }

    #[test]
    fn misses_outside_radius() {
        let ray = Ray::unbounded(Point3f::new(2.0, 0.0, 0.0), Vector3f::new(0.0, 0.0, 1.0));
        assert!(!list().intersect_p(&ray));
    }

    #[test]
    #[should_panic]
    fn get_material_panics() {
        list().get_material();
    }

    #[test]
    #[should_panic]
    fn get_area_light_panics() {
        list().get_area_light();
    }

    #[test]
    #[should_panic]
    fn compute_scattering_functions_panics() {
        let arena = Bump::new();
        list().compute_scattering_functions(&arena, &SurfaceInteraction::default(), TransportMode::Radiance);
    }
}
