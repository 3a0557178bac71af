//! Visibility Tester

use crate::interaction::*;
use crate::sampler::*;
use crate::scene::*;
use crate::spectrum::*;

/// VisibilityTester allows lights to return a radiance value under the
/// assumption that the reference point and light source are mutually
/// visible. The shadow ray is only traced if the sample is used.
#[derive(Clone)]
pub struct VisibilityTester {
    /// One endpoint of shadow ray.
    pub p0: Hit,

    /// Second endpoint of shadow ray.
    pub p1: Hit,
}

impl VisibilityTester {
    /// Create a new `VisibilityTester` for given endpoints of a shadow ray.
    ///
    /// * `p0` - One endpoint of shadow ray.
    /// * `p1` - Second endpoint of shadow ray.
    pub fn new(p0: Hit, p1: Hit) -> Self {
        Self { p0, p1 }
    }

    /// Traces a shadow ray between `p0` and `p1` through the scene and returns
    /// true if the points are visible to each other.
    ///
    /// * `scene` - The scene.
    pub fn unoccluded(&self, scene: &Scene) -> bool {
        !scene.intersect_p(&self.p0.spawn_ray_to_hit(&self.p1))
    }

    /// Returns the beam transmittance between the two points: zero if a
    /// surface blocks the segment, otherwise the transmittance of the medium
    /// the shadow ray starts in.
    ///
    /// * `scene`   - The scene.
    /// * `sampler` - The sampler.
    pub fn tr(&self, scene: &Scene, sampler: &mut dyn Sampler) -> Spectrum {
        let ray = self.p0.spawn_ray_to_hit(&self.p1);
        if scene.intersect_p(&ray) {
            return Spectrum::ZERO;
        }
        match ray.medium.as_ref() {
            Some(medium) => medium.tr(&ray, sampler),
            None => Spectrum::ONE,
        }
    }
}
