//! Material

use crate::interaction::*;
use crate::reflection::*;
use bumpalo::Bump;
use std::fmt;
use std::sync::Arc;

/// Light transport mode enumeration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransportMode {
    /// Indicates incident ray that intersected a point started at the camera.
    Radiance,

    /// Indicates incident ray that intersected a point started at the light
    /// source.
    Importance,
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Radiance => write!(f, "Radiance"),
            Self::Importance => write!(f, "Importance"),
        }
    }
}

/// Material trait provides common behavior.
pub trait Material {
    /// Returns the BSDF describing light scattering at a surface point. All
    /// lobes are allocated in `arena`, which is expected to be reset after the
    /// shading point is done.
    ///
    /// * `arena` - The arena for memory allocations.
    /// * `si`    - The surface interaction at the intersection.
    /// * `mode`  - Transport mode.
    fn compute_scattering_functions<'arena>(
        &'arena self,
        arena: &'arena Bump,
        si: &SurfaceInteraction,
        mode: TransportMode,
    ) -> BSDF<'arena>;
}

/// Atomic reference counted `Material`.
pub type ArcMaterial = Arc<dyn Material + Send + Sync>;
