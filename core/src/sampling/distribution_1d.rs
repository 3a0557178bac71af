//! 1D Distribution.

use crate::pbrt::*;

/// Represents a piecewise-constant 1D function’s PDF and CDF and provides
/// methods to perform this sampling efficiently.
#[derive(Clone, Debug)]
pub struct Distribution1D {
    /// Piecewise-constant function.
    pub func: Vec<Float>,

    /// CDF for `func`.
    pub cdf: Vec<Float>,

    /// Integral of `func`.
    pub func_int: Float,
}

impl Distribution1D {
    /// Returns a new `Distribution1D` for given piecewise-constant function.
    /// If the function integrates to zero the CDF is linear, so sampling
    /// stays well defined.
    ///
    /// - `f` - Piecewise-constant 1D function. Must not be empty.
    pub fn new(f: Vec<Float>) -> Self {
        let n = f.len();
        assert!(n > 0, "Distribution1D needs at least one value");

        // Compute integral of step function at `x_i`
        let mut cdf: Vec<Float> = Vec::with_capacity(n + 1);
        cdf.push(0.0);
        for i in 1..n + 1 {
            cdf.push(cdf[i - 1] + f[i - 1] / n as Float);
        }

        // Transform step function integral into CDF.
        let func_int = cdf[n];
        if func_int == 0.0 {
            for (i, v) in cdf.iter_mut().enumerate().skip(1).take(n) {
                *v = i as Float / n as Float;
            }
        } else {
            for v in cdf.iter_mut().skip(1).take(n) {
                *v /= func_int;
            }
        }

        Self {
            func: f,
            cdf,
            func_int,
        }
    }

    /// Returns the number of sample points for the piecewise-constant function.
    pub fn count(&self) -> usize {
        self.func.len()
    }

    /// Return a sample from the discrete distribution given a random sample.
    /// Returns the sampled index, its probability and `u` remapped to [0, 1)
    /// within the selected segment.
    ///
    /// - `u` - The random sample.
    pub fn sample_discrete(&self, u: Float) -> (usize, Float, Float) {
        // Find surrounding CDF segments and `offset`.
        let offset = find_interval(self.cdf.len(), |index| self.cdf[index] <= u);
        let pdf = self.discrete_pdf(offset);
        let width = self.cdf[offset + 1] - self.cdf[offset];
        let u_remapped = if width > 0.0 {
            (u - self.cdf[offset]) / width
        } else {
            0.0
        };
        debug_assert!((0.0..=1.0).contains(&u_remapped));

        (offset, pdf, u_remapped)
    }

    /// Return the PDF for sampling a given value from the discrete PDF.
    ///
    /// * `index` - Sample index.
    pub fn discrete_pdf(&self, index: usize) -> Float {
        assert!(index < self.count());
        if self.func_int > 0.0 {
            self.func[index] / (self.func_int * self.count() as Float)
        } else {
            // All-zero weights fall back to a linear CDF.
            1.0 / self.count() as Float
        }
    }
}
