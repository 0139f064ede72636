use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts producer invocations, for at-most-once assertions.
///
/// Clones share the same counter, so a probe can be captured by a
/// registered producer and inspected from the test afterwards.
#[derive(Clone, Debug, Default)]
pub struct BuildProbe {
    invocations: Arc<AtomicUsize>,
}

impl BuildProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one invocation and returns its 1-based sequence number.
    pub fn record(&self) -> usize {
        self.invocations.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn count(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}
