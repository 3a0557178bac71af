//! Shapes

use super::*;
use crate::interaction::*;
use std::sync::Arc;

/// Result of a successful ray-shape intersection.
#[derive(Clone)]
pub struct Intersection {
    /// Parametric distance along the ray.
    pub t: Float,

    /// Geometry at the intersection point.
    pub isect: SurfaceInteraction,
}

impl Intersection {
    /// Create a new intersection.
    ///
    /// * `t`     - Parametric distance along the ray.
    /// * `isect` - Geometry at the intersection point.
    pub fn new(t: Float, isect: SurfaceInteraction) -> Self {
        Self { t, isect }
    }
}

/// Shape common functions
pub trait Shape {
    /// Returns the shape type. Usually these are behind ArcShape and harder to
    /// debug. So this will be helpful.
    fn get_type(&self) -> &'static str;

    /// Returns a bounding box in world space.
    fn world_bound(&self) -> Bounds3f;

    /// Returns geometric details if a ray intersects the shape intersection.
    /// If there is no intersection, `None` is returned.
    ///
    /// * `r` - The ray.
    fn intersect(&self, r: &Ray) -> Option<Intersection>;

    /// Returns `true` if a ray-shape intersection succeeds; otherwise `false`.
    ///
    /// * `r` - The ray.
    fn intersect_p(&self, r: &Ray) -> bool {
        self.intersect(r).is_some()
    }

    /// Returns the surface area of the shape.
    fn area(&self) -> Float;

    /// Sample a point on the surface and return the PDF with respect to area on
    /// the surface.
    ///
    /// NOTE: The returned `Hit` value will have `wo` = Vector3f::ZERO.
    ///
    /// * `u` - Sample value to use.
    fn sample_area(&self, u: &Point2f) -> (Hit, Float);

    /// Sample a point on the shape given a reference point and return the PDF
    /// with respect to the solid angle from ref.
    ///
    /// * `hit` - Reference point.
    /// * `u`   - Sample value to use.
    fn sample_solid_angle(&self, hit: &Hit, u: &Point2f) -> (Hit, Float) {
        let (intr, mut pdf) = self.sample_area(u);
        let wi = intr.p - hit.p;

        if wi.length_squared() == 0.0 {
            pdf = 0.0;
        } else {
            // Convert from area measure, as returned by the sample_area() call
            // above, to solid angle measure.
            let wi = wi.normalize();
            pdf *= hit.p.distance_squared(intr.p) / intr.n.abs_dot(&(-wi));
            if pdf.is_infinite() {
                pdf = 0.0;
            }
        }

        (intr, pdf)
    }

    /// Returns the PDF with respect to solid angle.
    ///
    /// * `hit` - The reference point.
    /// * `wi`  - The incident direction.
    fn pdf_solid_angle(&self, hit: &Hit, wi: &Vector3f) -> Float {
        // Intersect sample ray with area light geometry.
        let ray = hit.spawn_ray(wi);
        match self.intersect(&ray) {
            Some(Intersection { isect, .. }) => {
                // Convert light sample weight to solid angle measure.
                let pdf = hit.p.distance_squared(isect.hit.p)
                    / (isect.hit.n.abs_dot(&(-*wi)) * self.area());
                if pdf.is_infinite() {
                    0.0
                } else {
                    pdf
                }
            }
            None => 0.0,
        }
    }
}

/// Atomic reference counted `Shape`.
pub type ArcShape = Arc<dyn Shape + Send + Sync>;
