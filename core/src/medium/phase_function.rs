//! Phase Function

use super::HenyeyGreenstein;
use crate::geometry::*;
use std::fmt;

/// Models scattering properties in volumetric media.
#[derive(Copy, Clone, Debug)]
pub enum PhaseFunction {
    HenyeyGreenstein(HenyeyGreenstein),
}

impl PhaseFunction {
    /// Returns the value of the phase function for the given pair of directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn p(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        match self {
            PhaseFunction::HenyeyGreenstein(f) => f.p(wo, wi),
        }
    }

    /// Returns the phase function value and sampled incident direction given
    /// the outgoing direction and a sample value in [0, 1)^2. The returned
    /// value doubles as the sampling density.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - Sample value in [0, 1)^2.
    pub fn sample_p(&self, wo: &Vector3f, u: &Point2f) -> (Float, Vector3f) {
        match self {
            PhaseFunction::HenyeyGreenstein(f) => f.sample_p(wo, u),
        }
    }
}

impl From<HenyeyGreenstein> for PhaseFunction {
    fn from(hg: HenyeyGreenstein) -> Self {
        Self::HenyeyGreenstein(hg)
    }
}

impl fmt::Display for PhaseFunction {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HenyeyGreenstein(h) => write!(f, "[HenyeyGreenstein g: {}]", h.g),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RNG;
    use crate::sampler::*;

    #[test]
    fn dispatch_matches_variant() {
        let hg = HenyeyGreenstein::new(0.4);
        let phase = PhaseFunction::from(hg);
        let wo = Vector3f::new(0.0, 0.6, 0.8);
        let mut rng = RNG::default();
        for _ in 0..32 {
            let u = rng.get_2d();
            let (p, wi) = phase.sample_p(&wo, &u);
            assert_eq!((p, wi), hg.sample_p(&wo, &u));
            assert!((phase.p(&wo, &wi) - p).abs() <= 1e-4 * p);
        }
        assert_eq!(phase.to_string(), "[HenyeyGreenstein g: 0.4]");
    }
}
