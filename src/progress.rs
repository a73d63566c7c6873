//! Run-scoped progress counting.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Count of rows delivered to the handler during one run.
///
/// Cloning shares the underlying counter, so workers can each hold a handle.
#[derive(Debug, Clone, Default)]
pub struct ProgressCounter {
    delivered: Arc<AtomicU64>,
}

impl ProgressCounter {
    /// Create a counter starting at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one delivered row
    pub fn increment(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    /// Rows delivered so far
    pub fn get(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }
}
