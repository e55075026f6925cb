//! Time sources
//!
//! Counters and the scheduler read "now" through a [`Clock`] so tests can
//! drive both from the same manually advanced time base.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A monotonic time source
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Shared, thread-safe clock
pub type SharedClock = Arc<dyn Clock>;

/// Wall clock backed by [`Instant::now`]
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn shared() -> SharedClock {
        Arc::new(SystemClock)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to
///
/// Clones share the same time.
#[derive(Clone, Debug)]
pub struct ManualClock {
    origin: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Move time forward by `delta`
    pub fn advance(&self, delta: Duration) {
        *self.offset.lock().unwrap() += delta;
    }

    /// Time elapsed since the clock was created
    pub fn elapsed(&self) -> Duration {
        *self.offset.lock().unwrap()
    }

    pub fn shared(&self) -> SharedClock {
        Arc::new(self.clone())
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }
}
