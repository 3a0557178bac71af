//! Core

extern crate bitflags;
#[macro_use]
extern crate hexf;
#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
mod test_macros;

// Re-export.
pub mod geometry;
pub mod interaction;
pub mod interpolation;
pub mod light;
pub mod light_distrib;
pub mod material;
pub mod medium;
pub mod microfacet;
pub mod pbrt;
pub mod primitives;
pub mod reflection;
pub mod rng;
pub mod sampler;
pub mod sampling;
pub mod scene;
pub mod shapes;
pub mod spectrum;
pub mod stats;
