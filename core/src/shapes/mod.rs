//! Shapes

mod disk;

// Re-export
pub use disk::*;
