//! Medium

use crate::geometry::*;
use crate::interaction::Hit;
use crate::sampler::*;
use crate::spectrum::*;
use std::sync::Arc;

mod henyey_greenstein;
mod homogeneous;
mod phase_function;

// Re-exports
pub use henyey_greenstein::*;
pub use homogeneous::*;
pub use phase_function::*;

/// A scattering event inside a participating medium.
#[derive(Clone)]
pub struct MediumInteraction {
    /// The common interaction data.
    pub hit: Hit,

    /// The phase function at the scattering point.
    pub phase: PhaseFunction,
}

/// Return value for `Medium::sample()`.
#[derive(Clone)]
pub struct MediumSample {
    /// Transmittance divided by the sampling density; includes the scattering
    /// albedo when a medium interaction was sampled.
    pub tr: Spectrum,

    /// The sampled scattering event. `None` if the ray left the medium first.
    pub interaction: Option<MediumInteraction>,
}

/// Medium trait to handle volumetric scattering properties.
pub trait Medium {
    /// Returns the beam transmittance along a given ray up to `ray.t_max`.
    ///
    /// * `ray`     - The ray.
    /// * `sampler` - Source of uniform random values.
    fn tr(&self, ray: &Ray, sampler: &mut dyn Sampler) -> Spectrum;

    /// Samples a scattering event along a ray.
    ///
    /// * `ray`     - The ray.
    /// * `sampler` - Source of uniform random values.
    fn sample(&self, ray: &Ray, sampler: &mut dyn Sampler) -> MediumSample;
}

/// Atomic reference counted `Medium`.
pub type ArcMedium = Arc<dyn Medium + Send + Sync>;

/// MediumInterface represents the boundary interface between two media.
/// `None` on either side denotes vacuum.
#[derive(Clone, Default)]
pub struct MediumInterface {
    /// Represent the interior of a geometric primitive.
    pub inside: Option<ArcMedium>,

    /// Represent the exterior of a geometric primitive.
    pub outside: Option<ArcMedium>,
}

impl MediumInterface {
    /// Create a medium interface between two media.
    ///
    /// * `inside`  - The interior medium.
    /// * `outside` - The exterior medium.
    pub fn new(inside: Option<ArcMedium>, outside: Option<ArcMedium>) -> Self {
        Self { inside, outside }
    }

    /// Create a medium interface that represents a vacuum.
    pub fn vacuum() -> Self {
        Self::default()
    }

    /// Returns `true` if the interface separates two distinct media. Media
    /// are compared by identity, not by value.
    pub fn is_medium_transition(&self) -> bool {
        match (self.inside.as_ref(), self.outside.as_ref()) {
            (Some(inside), Some(outside)) => !same_medium(inside, outside),
            (None, None) => false,
            _ => true,
        }
    }
}

impl From<ArcMedium> for MediumInterface {
    /// Create a medium interface with the same medium on both sides.
    ///
    /// * `medium` - The medium on either side of the interface.
    fn from(medium: ArcMedium) -> Self {
        Self {
            inside: Some(Arc::clone(&medium)),
            outside: Some(medium),
        }
    }
}

/// Returns `true` if both references point at the same medium instance.
fn same_medium(a: &ArcMedium, b: &ArcMedium) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const u8,
        Arc::as_ptr(b) as *const u8,
    )
}
