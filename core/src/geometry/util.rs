//! Utility functions.

use super::*;

/// Returns a direction (x, y, z) for spherical coordinates (θ, Ø).
///
/// * `sin_theta` - sin(θ).
/// * `cos_theta` - cos(θ).
/// * `phi`       - Ø.
#[inline]
pub fn spherical_direction(sin_theta: Float, cos_theta: Float, phi: Float) -> Vector3f {
    Vector3f::new(sin_theta * cos(phi), sin_theta * sin(phi), cos_theta)
}

/// Returns a direction (x, y, z) for spherical coordinates (θ, Ø) with respect
/// to a coordinate frame.
///
/// * `sin_theta` - sin(θ).
/// * `cos_theta` - cos(θ).
/// * `phi`       - Ø.
/// * `x`         - Basis vector representing x-axis.
/// * `y`         - Basis vector representing y-axis.
/// * `z`         - Basis vector representing z-axis.
#[inline]
pub fn spherical_direction_in_coord_frame(
    sin_theta: Float,
    cos_theta: Float,
    phi: Float,
    x: &Vector3f,
    y: &Vector3f,
    z: &Vector3f,
) -> Vector3f {
    sin_theta * cos(phi) * *x + sin_theta * sin(phi) * *y + cos_theta * *z
}

/// Create a coordinate system from a single unit vector and return the two
/// remaining orthonormal vectors.
///
/// The second vector is built by zeroing one coordinate of `v1`, swapping
/// the remaining two and negating one of them. The third is the cross product
/// of the first two.
///
/// * `v1` - A unit vector.
pub fn coordinate_system(v1: &Vector3f) -> (Vector3f, Vector3f) {
    let v2 = if abs(v1.x) > abs(v1.y) {
        Vector3f::new(-v1.z, 0.0, v1.x) / (v1.x * v1.x + v1.z * v1.z).sqrt()
    } else {
        Vector3f::new(0.0, v1.z, -v1.y) / (v1.y * v1.y + v1.z * v1.z).sqrt()
    };
    let v3 = v1.cross(&v2);
    (v2, v3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    prop_unit_vector3!(unit_vector3);

    proptest! {
        #[test]
        fn coordinate_system_is_orthonormal(v1 in unit_vector3()) {
            let (v2, v3) = coordinate_system(&v1);
            prop_assert!(v1.dot(&v2).abs() < 1e-5);
            prop_assert!(v1.dot(&v3).abs() < 1e-5);
            prop_assert!(v2.dot(&v3).abs() < 1e-5);
            prop_assert!((v2.length() - 1.0).abs() < 1e-5);
            prop_assert!((v3.length() - 1.0).abs() < 1e-5);
        }

        #[test]
        fn coord_frame_z_axis(v1 in unit_vector3(), phi in 0.0..TWO_PI) {
            let (v2, v3) = coordinate_system(&v1);
            let w = spherical_direction_in_coord_frame(0.0, 1.0, phi, &v2, &v3, &v1);
            prop_assert!((w - v1).length() < 1e-5);
        }
    }
}
