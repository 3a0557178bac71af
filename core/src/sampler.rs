//! Sampler

use crate::geometry::*;
use crate::rng::RNG;

/// Source of uniform sample values in [0, 1) consumed by the scattering and
/// light sampling routines.
pub trait Sampler {
    /// Returns the sample value for the next dimension.
    fn get_1d(&mut self) -> Float;

    /// Returns the sample values for the next two dimensions.
    fn get_2d(&mut self) -> Point2f {
        let x = self.get_1d();
        let y = self.get_1d();
        Point2f::new(x, y)
    }
}

impl Sampler for RNG {
    fn get_1d(&mut self) -> Float {
        self.uniform_float()
    }
}
