//! Disks

use crate::geometry::*;
use crate::interaction::*;
use crate::sampling::concentric_sample_disk;

/// A disk lying in a plane of constant z, centered on `center`.
#[derive(Clone)]
pub struct Disk {
    /// Center of the disk.
    pub center: Point3f,

    /// Radius of disk.
    pub radius: Float,

    /// Indicates the surface normal points along -z instead of +z.
    pub reverse_orientation: bool,
}

impl Disk {
    /// Create a new disk.
    ///
    /// * `center`              - Center of the disk.
    /// * `radius`              - Radius of disk.
    /// * `reverse_orientation` - Indicates whether the surface normal should
    ///                           point along -z instead of +z.
    pub fn new(center: Point3f, radius: Float, reverse_orientation: bool) -> Self {
        debug_assert!(radius > 0.0);
        Self {
            center,
            radius,
            reverse_orientation,
        }
    }

    /// Returns the surface normal.
    fn normal(&self) -> Normal3f {
        if self.reverse_orientation {
            Normal3f::new(0.0, 0.0, -1.0)
        } else {
            Normal3f::new(0.0, 0.0, 1.0)
        }
    }

    /// Returns the parametric distance to the disk plane and the local hit
    /// offset from the center, if the ray hits the disk.
    ///
    /// * `r` - The ray.
    fn hit_distance(&self, r: &Ray) -> Option<(Float, Vector3f)> {
        // Reject disk intersections for rays parallel to the disk's plane.
        if r.d.z == 0.0 {
            return None;
        }
        let t_shape_hit = (self.center.z - r.o.z) / r.d.z;
        if t_shape_hit <= 0.0 || t_shape_hit >= r.t_max {
            return None;
        }

        // See if hit point is inside disk radius.
        let d = r.at(t_shape_hit) - self.center;
        let dist2 = d.x * d.x + d.y * d.y;
        if dist2 > self.radius * self.radius {
            return None;
        }
        Some((t_shape_hit, Vector3f::new(d.x, d.y, 0.0)))
    }
}

impl Shape for Disk {
    fn get_type(&self) -> &'static str {
        "disk"
    }

    fn world_bound(&self) -> Bounds3f {
        let r = Vector3f::new(self.radius, self.radius, 0.0);
        Bounds3f::new(self.center - r, self.center + r)
    }

    fn intersect(&self, r: &Ray) -> Option<Intersection> {
        let (t, d) = self.hit_distance(r)?;

        // Find parametric representation of disk hit.
        let mut phi = d.y.atan2(d.x);
        if phi < 0.0 {
            phi += TWO_PI;
        }
        let r_hit = d.length();
        let u = phi * INV_TWO_PI;
        let v = 1.0 - r_hit / self.radius;

        // Keep the partial derivatives valid at the center where the polar
        // parametrization degenerates.
        let (mut dpdu, dpdv) = if r_hit > 0.0 {
            (
                Vector3f::new(-TWO_PI * d.y, TWO_PI * d.x, 0.0),
                Vector3f::new(d.x, d.y, 0.0) * (-self.radius / r_hit),
            )
        } else {
            (Vector3f::new(1.0, 0.0, 0.0), Vector3f::new(0.0, 1.0, 0.0))
        };
        if self.reverse_orientation {
            dpdu = -dpdu;
        }

        let mut p = self.center + d;
        p.z = self.center.z;
        let mut si = SurfaceInteraction::new(p, Point2f::new(u, v), -r.d, dpdu, dpdv, r.time);
        si.hit.n = self.normal();
        si.shading.n = si.hit.n;
        Some(Intersection::new(t, si))
    }

    fn intersect_p(&self, r: &Ray) -> bool {
        self.hit_distance(r).is_some()
    }

    fn area(&self) -> Float {
        PI * self.radius * self.radius
    }

    fn sample_area(&self, u: &Point2f) -> (Hit, Float) {
        let pd = concentric_sample_disk(u);
        let p = self.center + Vector3f::new(pd.x * self.radius, pd.y * self.radius, 0.0);
        let it = Hit::new(p, 0.0, Vector3f::zero(), self.normal(), None);
        (it, 1.0 / self.area())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn reference() -> Hit {
        Hit::new_minimal(Point3f::new(0.0, 0.0, 0.0), 0.0, None)
    }

    #[test]
    fn intersect_from_below() {
        let disk = Disk::new(Point3f::new(0.0, 0.0, 2.0), 1.0, true);
        let r = Ray::unbounded(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0));
        let Intersection { t, isect } = disk.intersect(&r).unwrap();
        assert!(approx_eq!(f32, t, 2.0, ulps = 4));
        assert_eq!(isect.hit.n, Normal3f::new(0.0, 0.0, -1.0));
        assert!(approx_eq!(f32, isect.hit.p.z, 2.0, ulps = 4));
    }

    #[test]
    fn misses_outside_radius_and_beyond_t_max() {
        let disk = Disk::new(Point3f::new(0.0, 0.0, 2.0), 1.0, false);
        let r = Ray::unbounded(Point3f::new(1.5, 0.0, 0.0), Vector3f::new(0.0, 0.0, 1.0));
        assert!(!disk.intersect_p(&r));
        let r = Ray::new(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0), 1.0, 0.0, None);
        assert!(!disk.intersect_p(&r));
        let r = Ray::unbounded(Point3f::zero(), Vector3f::new(1.0, 0.0, 0.0));
        assert!(disk.intersect(&r).is_none());
    }

    #[test]
    fn world_bound_is_flat() {
        let disk = Disk::new(Point3f::new(1.0, 2.0, 3.0), 0.5, false);
        let b = disk.world_bound();
        assert_eq!(b.p_min, Point3f::new(0.5, 1.5, 3.0));
        assert_eq!(b.p_max, Point3f::new(1.5, 2.5, 3.0));
    }

    #[test]
    fn sample_area_pdf() {
        let disk = Disk::new(Point3f::new(0.0, 0.0, 1.0), 2.0, false);
        let (it, pdf) = disk.sample_area(&Point2f::new(0.3, 0.8));
        assert!(approx_eq!(f32, pdf, 1.0 / (4.0 * PI), ulps = 4));
        assert!(approx_eq!(f32, it.p.z, 1.0, ulps = 4));
        let d = it.p - disk.center;
        assert!(d.length() <= 2.0 + 1e-5);
    }

    #[test]
    fn solid_angle_pdf_matches_sampled_pdf() {
        let disk = Disk::new(Point3f::new(0.0, 0.0, 2.0), 1.0, true);
        let hit = reference();
        let (it, pdf) = disk.sample_solid_angle(&hit, &Point2f::new(0.4, 0.7));
        let wi = (it.p - hit.p).normalize();
        let pdf_wi = disk.pdf_solid_angle(&hit, &wi);
        assert!(approx_eq!(f32, pdf, pdf_wi, epsilon = 1e-3 * pdf));
    }

    #[test]
    fn solid_angle_pdf_zero_on_miss() {
        let disk = Disk::new(Point3f::new(0.0, 0.0, 2.0), 1.0, true);
        let pdf = disk.pdf_solid_angle(&reference(), &Vector3f::new(0.0, 1.0, 0.0));
        assert_eq!(pdf, 0.0);
    }
}
