//! Spatial Light Distribution.

use super::LightDistribution;
use crate::geometry::*;
use crate::interaction::Hit;
use crate::light::*;
use crate::pbrt::*;
use crate::sampling::*;
use crate::scene::*;
use crate::spectrum::*;
use std::sync::Arc;

/// Number of Halton points used to estimate light contributions in a voxel.
const N_SAMPLES: usize = 128;

/// A spatially-varying light distribution that adjusts the probability of
/// sampling a light source based on an estimate of its contribution to a
/// region of space. A fixed voxel grid is imposed over the scene bounds and a
/// sampling distribution is computed for every voxel up front, so lookups
/// are plain reads.
pub struct SpatialLightDistribution {
    world_bound: Bounds3f,
    n_voxels: [usize; 3],
    distributions: Vec<Arc<Distribution1D>>,
}

impl SpatialLightDistribution {
    /// Create a new instance of `SpatialLightDistribution`.
    ///
    /// * `scene`      - The scene.
    /// * `max_voxels` - Number of voxels along the widest scene dimension.
    pub fn new(scene: &Scene, max_voxels: usize) -> Self {
        // The widest bounding box dimension gets `max_voxels` voxels and the
        // others are sized so voxels are roughly cube shaped.
        let b = scene.world_bound;
        let diag = b.diagonal();
        let bmax = diag[diag.max_dimension()];
        let mut n_voxels = [1_usize; 3];
        if bmax > 0.0 && bmax.is_finite() {
            for (i, n) in n_voxels.iter_mut().enumerate() {
                *n = max(1, (diag[i] / bmax * max_voxels as Float).round() as usize);
            }
        }

        info!(
            "SpatialLightDistribution: scene bounds {:?}, voxel res ({}, {}, {})",
            b, n_voxels[0], n_voxels[1], n_voxels[2]
        );

        let mut distrib = Self {
            world_bound: b,
            n_voxels,
            distributions: vec![],
        };

        if !scene.lights.is_empty() {
            let n = n_voxels[0] * n_voxels[1] * n_voxels[2];
            let mut distributions = Vec::with_capacity(n);
            for z in 0..n_voxels[2] {
                for y in 0..n_voxels[1] {
                    for x in 0..n_voxels[0] {
                        let d = distrib.compute_distribution(&scene.lights, [x, y, z]);
                        distributions.push(Arc::new(d));
                    }
                }
            }
            distrib.distributions = distributions;
        }

        distrib
    }

    /// Returns the world-space bounds of the voxel at integer coordinates `pi`.
    fn voxel_bounds(&self, pi: [usize; 3]) -> Bounds3f {
        let corner = |offset: usize| {
            Point3f::new(
                (pi[0] + offset) as Float / self.n_voxels[0] as Float,
                (pi[1] + offset) as Float / self.n_voxels[1] as Float,
                (pi[2] + offset) as Float / self.n_voxels[2] as Float,
            )
        };
        Bounds3f::new(
            self.world_bound.lerp(&corner(0)),
            self.world_bound.lerp(&corner(1)),
        )
    }

    /// Computes the sampling distribution for the voxel at integer
    /// coordinates `pi`.
    ///
    /// Points inside the voxel come from a 3D Halton sequence; at each one
    /// every light is sampled and weighted by `Li / pdf`, ignoring visibility,
    /// as an estimate of how much it illuminates the voxel.
    fn compute_distribution(&self, lights: &[ArcLight], pi: [usize; 3]) -> Distribution1D {
        let bounds = self.voxel_bounds(pi);
        let mut light_contrib = vec![0.0; lights.len()];
        for i in 0..N_SAMPLES {
            let a = i as u64;
            let po = bounds.lerp(&Point3f::new(
                radical_inverse(0, a),
                radical_inverse(1, a),
                radical_inverse(2, a),
            ));
            let hit = Hit::new_minimal(po, 0.0, None);

            // The next two Halton dimensions pick a point on the light.
            let u = Point2f::new(radical_inverse(3, a), radical_inverse(4, a));
            for (contrib, light) in light_contrib.iter_mut().zip(lights.iter()) {
                let li = light.sample_li(&hit, &u);
                if li.pdf > 0.0 {
                    *contrib += li.value.y() / li.pdf;
                }
            }
        }

        // No light gets zero probability: sampling may have missed points it
        // reaches.
        let sum_contrib: Float = light_contrib.iter().sum();
        let avg_contrib = sum_contrib / (N_SAMPLES * light_contrib.len()) as Float;
        let min_contrib = if avg_contrib > 0.0 {
            0.001 * avg_contrib
        } else {
            1.0
        };
        for contrib in light_contrib.iter_mut() {
            *contrib = max(*contrib, min_contrib);
        }
        debug!(
            "Initialized light distribution in voxel {:?}, avgContrib = {}",
            pi, avg_contrib
        );

        Distribution1D::new(light_contrib)
    }
}

impl LightDistribution for SpatialLightDistribution {
    /// Points outside the scene bounds use the nearest voxel.
    fn lookup(&self, p: &Point3f) -> Option<Arc<Distribution1D>> {
        if self.distributions.is_empty() {
            return None;
        }

        let offset = self.world_bound.offset(p);
        let mut pi = [0_usize; 3];
        for (i, v) in pi.iter_mut().enumerate() {
            let n = self.n_voxels[i] as Int;
            *v = clamp((offset[i] * n as Float) as Int, 0, n - 1) as usize;
        }

        let index = (pi[2] * self.n_voxels[1] + pi[1]) * self.n_voxels[0] + pi[0];
        self.distributions.get(index).map(Arc::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::scene_with;
    use super::*;
    use crate::light::tests::point_light;

    #[test]
    fn voxel_resolution_follows_widest_axis() {
        let scene = scene_with(vec![
            point_light(-3.0, 0.0, 1.0, 1.0),
            point_light(3.0, 0.0, 1.0, 1.0),
        ]);
        let distrib = SpatialLightDistribution::new(&scene, 8);
        assert_eq!(distrib.n_voxels, [8, 8, 1]);
        assert_eq!(distrib.distributions.len(), 64);
    }

    #[test]
    fn nearby_light_is_favoured() {
        let scene = scene_with(vec![
            point_light(-3.5, 0.0, 0.5, 1.0),
            point_light(3.5, 0.0, 0.5, 1.0),
        ]);
        let distrib = SpatialLightDistribution::new(&scene, 8);

        let left = distrib.lookup(&Point3f::new(-3.5, 0.0, 0.0)).unwrap();
        assert!(left.discrete_pdf(0) > 0.9);

        let right = distrib.lookup(&Point3f::new(3.5, 0.0, 0.0)).unwrap();
        assert!(right.discrete_pdf(1) > 0.9);
    }

    #[test]
    fn every_light_keeps_some_probability() {
        let scene = scene_with(vec![
            point_light(-3.5, -3.5, 0.5, 1.0),
            point_light(3.5, 3.5, 0.5, 1.0e-6),
        ]);
        let distrib = SpatialLightDistribution::new(&scene, 4);
        let d = distrib.lookup(&Point3f::new(-3.5, -3.5, 0.0)).unwrap();
        assert!(d.discrete_pdf(1) > 0.0);
    }

    #[test]
    fn outside_points_clamp_to_edge_voxels() {
        let scene = scene_with(vec![
            point_light(-3.5, 0.0, 0.5, 1.0),
            point_light(3.5, 0.0, 0.5, 1.0),
        ]);
        let distrib = SpatialLightDistribution::new(&scene, 4);
        let inside = distrib.lookup(&Point3f::new(3.9, 0.1, 0.0)).unwrap();
        let outside = distrib.lookup(&Point3f::new(100.0, 0.1, 50.0)).unwrap();
        assert!(Arc::ptr_eq(&inside, &outside));
    }
}
