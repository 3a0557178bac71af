//! Geometric Primitives

use super::*;
use crate::medium::*;

/// GeometricPrimitive represents a single shape in a scene.
#[derive(Clone)]
pub struct GeometricPrimitive {
    /// The shape.
    pub shape: ArcShape,

    /// The material.
    pub material: Option<ArcMaterial>,

    /// Optional area light that describes emission characteristics if it
    /// emits light.
    pub area_light: Option<ArcAreaLight>,

    /// Information about the participating media on the inside and outside
    /// the primitive.
    pub medium_interface: MediumInterface,
}

impl GeometricPrimitive {
    /// Create a new geometric primitive.
    ///
    /// * `shape`            - The shape.
    /// * `material`         - The material.
    /// * `area_light`       - Optional area light.
    /// * `medium_interface` - Participating media on either side.
    pub fn new(
        shape: ArcShape,
        material: Option<ArcMaterial>,
        area_light: Option<ArcAreaLight>,
        medium_interface: MediumInterface,
    ) -> Self {
        Self {
            shape,
            material,
            area_light,
            medium_interface,
        }
    }
}

impl Primitive for GeometricPrimitive {
    fn world_bound(&self) -> Bounds3f {
        self.shape.world_bound()
    }

    fn intersect(&self, r: &mut Ray) -> Option<PrimitiveIntersection<'_>> {
        let Intersection { t, mut isect } = self.shape.intersect(r)?;
        r.t_max = t;

        // Surfaces that do not separate two media inherit the ray's medium.
        isect.hit.medium_interface = if self.medium_interface.is_medium_transition() {
            Some(self.medium_interface.clone())
        } else {
            r.medium.as_ref().map(|m| MediumInterface::from(Arc::clone(m)))
        };

        Some(PrimitiveIntersection {
            isect,
            primitive: self,
        })
    }

    fn intersect_p(&self, r: &Ray) -> bool {
        self.shape.intersect_p(r)
    }

    fn get_area_light(&self) -> Option<ArcAreaLight> {
        self.area_light.clone()
    }

    fn get_material(&self) -> Option<ArcMaterial> {
        self.material.clone()
    }

    fn compute_scattering_functions<'a>(
        &'a self,
        arena: &'a Bump,
        si: &SurfaceInteraction,
        mode: TransportMode,
    ) -> Option<BSDF<'a>> {
        self.material
            .as_ref()
            .map(|material| material.compute_scattering_functions(arena, si, mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Disk;
    use crate::spectrum::*;

    struct Matte;

    impl Material for Matte {
        fn compute_scattering_functions<'arena>(
            &'arena self,
            arena: &'arena Bump,
            si: &SurfaceInteraction,
            _mode: TransportMode,
        ) -> BSDF<'arena> {
            let mut bsdf = BSDF::new(si, None);
            bsdf.add(LambertianReflection::alloc(arena, Spectrum::new(0.5)));
            bsdf
        }
    }

    fn disk_primitive(material: Option<ArcMaterial>) -> GeometricPrimitive {
        GeometricPrimitive::new(
            Arc::new(Disk::new(Point3f::new(0.0, 0.0, 1.0), 1.0, false)),
            material,
            None,
            MediumInterface::vacuum(),
        )
    }

    #[test]
    fn intersect_updates_ray_extent() {
        let primitive = disk_primitive(None);
        let mut ray = Ray::unbounded(Point3f::new(0.0, 0.0, 0.0), Vector3f::new(0.0, 0.0, 1.0));
        let it = primitive.intersect(&mut ray).unwrap();
        assert!((ray.t_max - 1.0).abs() < 1e-6);
        assert!((it.isect.hit.p.z - 1.0).abs() < 1e-6);
        assert!(it.isect.hit.medium_interface.is_none());
        assert!(it.primitive.get_area_light().is_none());

        // A second ray limited before the disk misses.
        let short = Ray::new(ray.o, ray.d, 0.5, 0.0, None);
        assert!(!primitive.intersect_p(&short));
    }

    #[test]
    fn scattering_functions_come_from_material() {
        let arena = Bump::new();
        let primitive = disk_primitive(Some(Arc::new(Matte)));
        let mut ray = Ray::unbounded(Point3f::new(0.2, 0.0, 0.0), Vector3f::new(0.0, 0.0, 1.0));
        let it = primitive.intersect(&mut ray).unwrap();
        let bsdf = it
            .primitive
            .compute_scattering_functions(&arena, &it.isect, TransportMode::Radiance)
            .unwrap();
        assert_eq!(bsdf.num_components(BxDFType::BSDF_ALL), 1);

        let no_material = disk_primitive(None);
        assert!(no_material
            .compute_scattering_functions(&arena, &it.isect, TransportMode::Radiance)
            .is_none());
    }
}
