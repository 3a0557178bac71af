//! Statistics Counter

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// A named counter that can be incremented concurrently.
#[derive(Debug, Default)]
pub struct StatCounter {
    value: AtomicI64,
}

impl StatCounter {
    /// Increment the counter by 1.
    pub fn increment(&self) {
        self.add(1);
    }

    /// Add a value to the counter.
    ///
    /// * `v` - The value to add.
    pub fn add(&self, v: i64) {
        self.value.fetch_add(v, Ordering::Relaxed);
    }

    /// Returns the current value.
    pub fn value(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }

    /// Reset the counter to 0.
    pub fn reset(&self) {
        self.value.store(0, Ordering::Relaxed);
    }
}

/// Atomic reference counted `StatCounter`.
pub type ArcStatCounter = Arc<StatCounter>;
