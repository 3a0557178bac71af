//! Common sampling functions.

use crate::geometry::*;
use crate::rng::*;

/// Generate jittered 2D samples stratified over an `nx` by `ny` grid.
///
/// * `rng`    - Random number generator.
/// * `nx`     - Number of samples in x-direction.
/// * `ny`     - Number of samples in y-direction.
/// * `jitter` - Jitter the samples.
pub fn stratified_sample_2d(rng: &mut RNG, nx: usize, ny: usize, jitter: bool) -> Vec<Point2f> {
    let dx = 1.0 / nx as Float;
    let dy = 1.0 / ny as Float;
    let mut samples = Vec::with_capacity(nx * ny);
    for y in 0..ny {
        for x in 0..nx {
            let jx = if jitter { rng.uniform_float() } else { 0.5 };
            let jy = if jitter { rng.uniform_float() } else { 0.5 };
            samples.push(Point2f::new(
                min((x as Float + jx) * dx, ONE_MINUS_EPSILON),
                min((y as Float + jy) * dy, ONE_MINUS_EPSILON),
            ));
        }
    }
    samples
}

/// Uniformly sample a direction on a hemisphere.
///
/// * `u` - The random sample point.
pub fn uniform_sample_hemisphere(u: &Point2f) -> Vector3f {
    let z = u[0];
    let r = max(0.0, 1.0 - z * z).sqrt();
    let phi = TWO_PI * u[1];
    Vector3f::new(r * cos(phi), r * sin(phi), z)
}

/// Returns the PDF for uniformly sampling a direction from a hemisphere.
#[inline]
pub fn uniform_hemisphere_pdf() -> Float {
    INV_TWO_PI
}

/// Uniformly sample a direction from a sphere.
///
/// * `u` - The random sample point.
pub fn uniform_sample_sphere(u: &Point2f) -> Vector3f {
    let z = 1.0 - 2.0 * u[0];
    let r = max(0.0, 1.0 - z * z).sqrt();
    let phi = TWO_PI * u[1];
    Vector3f::new(r * cos(phi), r * sin(phi), z)
}

/// Returns the PDF for uniformly sampling a direction from a sphere.
#[inline]
pub fn uniform_sphere_pdf() -> Float {
    INV_FOUR_PI
}

/// Sample a point on a unit disk by mapping from a unit square to the unit
/// circle. The concentric mapping takes points in [-1, 1]^2 to unit disk by
/// uniformly mapping concentric squares to concentric circles.
///
/// * `u` - The random sample point.
pub fn concentric_sample_disk(u: &Point2f) -> Point2f {
    // Map uniform random numbers to [-1,1]^2.
    let ux = 2.0 * u.x - 1.0;
    let uy = 2.0 * u.y - 1.0;

    // Handle degeneracy at the origin.
    if ux == 0.0 && uy == 0.0 {
        return Point2f::new(0.0, 0.0);
    }

    // Apply concentric mapping to point
    let (r, theta) = if abs(ux) > abs(uy) {
        (ux, PI_OVER_FOUR * (uy / ux))
    } else {
        (uy, PI_OVER_TWO - PI_OVER_FOUR * (ux / uy))
    };
    Point2f::new(r * cos(theta), r * sin(theta))
}

/// Sample a direction on a hemisphere using cosine-weighted sampling.
///
/// * `u` - The random sample point.
#[inline]
pub fn cosine_sample_hemisphere(u: &Point2f) -> Vector3f {
    let d = concentric_sample_disk(u);
    let z = max(0.0, 1.0 - d.x * d.x - d.y * d.y).sqrt();
    Vector3f::new(d.x, d.y, z)
}

/// Returns the PDF for cosine-weighted sampling a direction from a hemisphere.
///
/// * `cos_theta` - Cosine term of incident radiance.
#[inline]
pub fn cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    cos_theta * INV_PI
}

/// Weight samples using the power heuristic.
///
/// * `nf`    - Number of samples taken from `f_pdf`.
/// * `f_pdf` - First sampling distribution.
/// * `ng`    - Number of samples taken from `g_pdf`.
/// * `g_pdf` - Second sampling distribution.
#[inline]
pub fn power_heuristic(nf: Int, f_pdf: Float, ng: Int, g_pdf: Float) -> Float {
    let f = nf as Float * f_pdf;
    let g = ng as Float * g_pdf;
    (f * f) / (f * f + g * g)
}
