//! Pacer that advances a virtual clock instead of sleeping.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tactus::Pacer;

/// Records each pause so tests can check timing without waiting.
#[derive(Debug, Clone, Default)]
pub struct VirtualPacer {
    pauses: Arc<Mutex<Vec<Duration>>>,
}

impl VirtualPacer {
    /// Create a pacer at virtual time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every pause requested, including zero-length ones.
    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().clone()
    }

    /// Virtual time elapsed.
    pub fn elapsed(&self) -> Duration {
        self.pauses.lock().iter().sum()
    }

    /// Reset the clock.
    pub fn reset(&self) {
        self.pauses.lock().clear();
    }
}

impl Pacer for VirtualPacer {
    fn pause(&mut self, duration: Duration) {
        self.pauses.lock().push(duration);
    }
}
