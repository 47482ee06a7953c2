//! Monotonic tick sources.
//!
//! The manager reads a tick counter once per pump iteration. One tick is one
//! millisecond for [`SteadyClock`]; [`ManualClock`] ticks only when told to,
//! from any thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// A monotonic tick counter.
pub trait Clock {
    /// Current tick count. Never decreases.
    fn ticks(&self) -> u64;
}

/// Milliseconds elapsed since the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SteadyClock {
    start: Instant,
}

impl SteadyClock {
    /// Create a clock starting at tick 0.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SteadyClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SteadyClock {
    fn ticks(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// A clock advanced explicitly, shareable across threads.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    ticks: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `ticks`.
    pub fn advance(&self, ticks: u64) {
        self.ticks.fetch_add(ticks, Ordering::AcqRel);
    }

    /// Move the clock to an absolute tick. Earlier values are ignored.
    pub fn set(&self, ticks: u64) {
        self.ticks.fetch_max(ticks, Ordering::AcqRel);
    }
}

impl Clock for ManualClock {
    fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Acquire)
    }
}

static_assertions::assert_impl_all!(ManualClock: Send, Sync);
