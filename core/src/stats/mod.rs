//! Statistics

mod counter;
mod registry;

pub use counter::*;
pub use registry::*;
