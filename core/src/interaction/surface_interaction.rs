//! Surface Interactions

use super::Hit;
use crate::geometry::*;

/// Shading geometry used for perturbed values.
#[derive(Copy, Clone, Default)]
pub struct Shading {
    /// Shading normal.
    pub n: Normal3f,

    /// Parametric partial derivative of the point ∂p/∂u used for shading.
    pub dpdu: Vector3f,
}

/// SurfaceInteraction represents geometry of a particular point on a surface.
#[derive(Clone, Default)]
pub struct SurfaceInteraction {
    /// The common interaction data.
    pub hit: Hit,

    /// The uv coordinates from surface parametrization.
    pub uv: Point2f,

    /// Parametric partial derivative of the point ∂p/∂u.
    pub dpdu: Vector3f,

    /// Parametric partial derivative of the point ∂p/∂v.
    pub dpdv: Vector3f,

    /// Shading geometry; starts out equal to the true geometry.
    pub shading: Shading,
}

impl SurfaceInteraction {
    /// Create a new surface interaction. The geometric normal is derived from
    /// the partial derivatives.
    ///
    /// * `p`    - Point of interaction.
    /// * `uv`   - The uv coordinates from surface parametrization.
    /// * `wo`   - The negative ray direction.
    /// * `dpdu` - Parametric partial derivative of the point ∂p/∂u.
    /// * `dpdv` - Parametric partial derivative of the point ∂p/∂v.
    /// * `time` - Time when interaction occurred.
    pub fn new(
        p: Point3f,
        uv: Point2f,
        wo: Vector3f,
        dpdu: Vector3f,
        dpdv: Vector3f,
        time: Float,
    ) -> Self {
        let n = Normal3f::from(dpdu.cross(&dpdv).normalize());
        Self {
            hit: Hit::new(p, time, wo, n, None),
            uv,
            dpdu,
            dpdv,
            shading: Shading { n, dpdu },
        }
    }

    /// Replace the shading geometry. The shading normal is flipped if needed
    /// to lie in the hemisphere of the geometric normal.
    ///
    /// * `dpdus` - Shading ∂p/∂u.
    /// * `dpdvs` - Shading ∂p/∂v.
    pub fn set_shading_geometry(&mut self, dpdus: Vector3f, dpdvs: Vector3f) {
        let n = Normal3f::from(dpdus.cross(&dpdvs).normalize());
        let n = if n.dot(&self.hit.n) < 0.0 { -n } else { n };
        self.shading = Shading { n, dpdu: dpdus };
    }
}
