//! Debounced scheduling for free-text input
//!
//! Every keystroke re-arms a single pending timer; the scheduled work
//! runs once the input has been quiet for the whole window. Select
//! controls skip this path entirely and re-filter immediately.

use std::time::Duration;
use tokio::task::JoinHandle;

/// One pending-timer coordinator. Each filterable view owns its own
/// instance so side-by-side listings cannot cancel each other.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Create a coordinator with the given quiet window
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The configured quiet window
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `f` to run after the quiet window. Any previously
    /// scheduled run that has not fired yet is cancelled.
    pub fn schedule<F>(&mut self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            f();
        }));
    }

    /// Drop any pending run without replacing it
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a run is currently armed and has not fired
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().map_or(false, |h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

// ==================== Tests ====================
