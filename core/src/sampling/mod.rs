//! Sampling

mod common;
mod distribution_1d;
mod low_discrepancy;

// Re-export
pub use common::*;
pub use distribution_1d::*;
pub use low_discrepancy::*;
