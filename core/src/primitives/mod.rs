//! Primitives

use crate::geometry::*;
use crate::interaction::*;
use crate::light::*;
use crate::material::*;
use crate::reflection::*;
use bumpalo::Bump;
use std::sync::Arc;

mod geometric_primitive;
mod primitive_list;

// Re-export
pub use geometric_primitive::*;
pub use primitive_list::*;

/// Result of a ray-primitive intersection.
pub struct PrimitiveIntersection<'a> {
    /// Geometry at the intersection point.
    pub isect: SurfaceInteraction,

    /// The geometric primitive that was hit. Material and area light queries
    /// go through this reference rather than the aggregate.
    pub primitive: &'a dyn Primitive,
}

/// Primitive trait ties shapes to their appearance.
pub trait Primitive {
    /// Returns a bounding box in the world space.
    fn world_bound(&self) -> Bounds3f;

    /// Returns geometric details if a ray intersects the primitive and updates
    /// the `t_max` parameter of the ray. If there is no intersection, `None`
    /// is returned.
    ///
    /// * `r` - The ray.
    fn intersect(&self, r: &mut Ray) -> Option<PrimitiveIntersection<'_>>;

    /// Returns `true` if a ray-primitive intersection succeeds; otherwise
    /// `false`.
    ///
    /// * `r` - The ray.
    fn intersect_p(&self, r: &Ray) -> bool;

    /// Returns the area light describing the primitive's emission, if the
    /// primitive is itself a light source.
    fn get_area_light(&self) -> Option<ArcAreaLight>;

    /// Returns the material assigned to the primitive. If `None` is returned,
    /// ray intersections with the primitive should be ignored; the primitive
    /// only delineates a volume of space for participating media.
    fn get_material(&self) -> Option<ArcMaterial>;

    /// Returns the BSDF at the intersection point on the surface, or `None`
    /// if the primitive has no material.
    ///
    /// * `arena` - The arena for memory allocations.
    /// * `si`    - The surface interaction at the intersection.
    /// * `mode`  - Transport mode.
    fn compute_scattering_functions<'a>(
        &'a self,
        arena: &'a Bump,
        si: &SurfaceInteraction,
        mode: TransportMode,
    ) -> Option<BSDF<'a>>;
}

/// Atomic reference counted `Primitive`.
pub type ArcPrimitive = Arc<dyn Primitive + Send + Sync>;
