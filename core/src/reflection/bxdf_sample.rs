//! BxDF Sample

use super::*;

/// Stores evaluation of BxDF samples.
#[derive(Copy, Clone, Debug, Default)]
pub struct BxDFSample {
    /// The sample value.
    pub f: Spectrum,

    /// The value of the PDF.
    pub pdf: Float,

    /// The sampled inbound direction.
    pub wi: Vector3f,

    /// The type of BxDF that produced the sample.
    pub sampled_type: BxDFType,
}

impl BxDFSample {
    /// Create a new `BxDFSample`.
    ///
    /// * `f`            - The sample value.
    /// * `pdf`          - The value of the PDF.
    /// * `wi`           - The sampled inbound direction.
    /// * `sampled_type` - The type of BxDF.
    pub fn new(f: Spectrum, pdf: Float, wi: Vector3f, sampled_type: BxDFType) -> Self {
        Self {
            f,
            pdf,
            wi,
            sampled_type,
        }
    }
}

impl From<BxDFType> for BxDFSample {
    /// Create a failed `BxDFSample` that only records the BxDF type; the value
    /// and PDF are zero.
    ///
    /// * `sampled_type` - The type of BxDF.
    fn from(sampled_type: BxDFType) -> Self {
        Self::new(Spectrum::ZERO, 0.0, Vector3f::zero(), sampled_type)
    }
}
