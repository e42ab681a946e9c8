//! Synchronization primitives for engine requests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A thread-safe flag for cancelling an outstanding engine request.
///
/// Clones share the same flag: the game owner keeps one, hands a clone to
/// whoever may need to abandon the request (a new game, shutdown), and the
/// waiting side polls it.
#[derive(Clone, Debug)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    /// Create a new stop flag (initially not stopped).
    #[must_use]
    pub fn new() -> Self {
        StopFlag(Arc::new(AtomicBool::new(false)))
    }

    /// Create a stop flag that is already set.
    #[must_use]
    pub fn stopped() -> Self {
        StopFlag(Arc::new(AtomicBool::new(true)))
    }

    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Request cancellation.
    #[inline]
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Clear the flag before the next request.
    #[inline]
    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for StopFlag {
    fn default() -> Self {
        Self::new()
    }
}
