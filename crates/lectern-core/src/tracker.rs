// ── Outbound call tracker ──
//
// Counts CMS requests for display. One tracker is created per process with
// the application state and handed to every component that fetches.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared handle to a monotonic request counter.
///
/// Clones observe and bump the same count. There is no reset or decrement;
/// the count lives as long as the last handle.
#[derive(Debug, Clone, Default)]
pub struct CallTracker {
    calls: Arc<AtomicU64>,
}

impl CallTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one outbound call.
    pub fn increment(&self) {
        self.calls.fetch_add(1, Ordering::Relaxed);
    }

    /// Current number of recorded calls.
    pub fn count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}
