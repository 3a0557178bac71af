//! Interactions

use crate::geometry::*;
use crate::medium::*;

mod surface_interaction;

pub use surface_interaction::*;

/// Hit provides common data shared by surface and medium interactions.
#[derive(Clone, Default)]
pub struct Hit {
    /// Point of interaction.
    pub p: Point3f,

    /// Time when interaction occurred.
    pub time: Float,

    /// The negative ray direction (outgoing direction used when computing
    /// lighting at points).
    pub wo: Vector3f,

    /// Surface normal at the point `p`. Zero for points inside a medium.
    pub n: Normal3f,

    /// The medium interface used for scattering media.
    pub medium_interface: Option<MediumInterface>,
}

impl Hit {
    /// Create a new hit.
    ///
    /// `p`                - Point of interaction.
    /// `time`             - Time when interaction occurred.
    /// `wo`               - The negative ray direction. May be zero.
    /// `n`                - Surface normal at the point `p`.
    /// `medium_interface` - The medium interface used for scattering media.
    pub fn new(
        p: Point3f,
        time: Float,
        wo: Vector3f,
        n: Normal3f,
        medium_interface: Option<MediumInterface>,
    ) -> Self {
        let wo = if wo.length_squared() > 0.0 {
            wo.normalize()
        } else {
            wo
        };
        Self {
            p,
            time,
            wo,
            n,
            medium_interface,
        }
    }

    /// Create a new hit for a point that is not on a surface.
    ///
    /// `p`                - Point of interaction.
    /// `time`             - Time when interaction occurred.
    /// `medium_interface` - The medium interface used for scattering media.
    pub fn new_minimal(p: Point3f, time: Float, medium_interface: Option<MediumInterface>) -> Self {
        Self {
            p,
            time,
            wo: Vector3f::zero(),
            n: Normal3f::ZERO,
            medium_interface,
        }
    }

    /// Returns `true` if this is a surface interaction.
    pub fn is_surface_interaction(&self) -> bool {
        self.n != Normal3f::ZERO
    }

    /// Returns the ray origin nudged off the surface towards `w`.
    ///
    /// * `w` - Direction the spawned ray will travel.
    fn offset_origin(&self, w: &Vector3f) -> Point3f {
        if !self.is_surface_interaction() {
            return self.p;
        }
        let offset = Vector3f::from(self.n.face_forward(w)) * SHADOW_EPSILON;
        self.p + offset
    }

    /// Spawn's a new ray in the given direction.
    ///
    /// * `d` - The new direction.
    pub fn spawn_ray(&self, d: &Vector3f) -> Ray {
        Ray::new(
            self.offset_origin(d),
            *d,
            INFINITY,
            self.time,
            self.get_medium_in_direction(d),
        )
    }

    /// Spawn's a new ray towards another interaction. The ray stops just short
    /// of the target so the target surface itself is not reported as an
    /// occluder.
    ///
    /// * `hit` - The interaction.
    pub fn spawn_ray_to_hit(&self, hit: &Hit) -> Ray {
        let origin = self.offset_origin(&(hit.p - self.p));
        let target = hit.offset_origin(&(origin - hit.p));
        let d = target - origin;
        Ray::new(
            origin,
            d,
            1.0 - SHADOW_EPSILON,
            self.time,
            self.get_medium_in_direction(&d),
        )
    }

    /// Returns the medium towards a direction.
    ///
    /// * `w` - The direction.
    pub fn get_medium_in_direction(&self, w: &Vector3f) -> Option<ArcMedium> {
        let mi = self.medium_interface.as_ref()?;
        if w.dot(&self.n) > 0.0 {
            mi.outside.clone()
        } else {
            mi.inside.clone()
        }
    }

    /// Returns the medium at a point that does not lie on a medium boundary.
    pub fn get_medium(&self) -> Option<ArcMedium> {
        let mi = self.medium_interface.as_ref()?;
        debug_assert!(!mi.is_medium_transition());
        mi.inside.clone()
    }
}
