//! Millisecond clocks for live sessions.
//!
//! The pipeline itself only ever sees caller-supplied timestamps, so tests
//! drive it with synthetic time. Live capture loops read one of these clocks
//! and pass the value through.
//!
//! Requires the `std` feature.

use std::time::Instant;

/// Source of monotonic millisecond timestamps.
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed origin.
    fn now_ms(&self) -> u64;
}

/// Wall-clock time since construction, from [`Instant`].
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Start counting from now.
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// A clock that returns whatever it was last set to. For replays and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManualClock {
    now: u64,
}

impl ManualClock {
    /// Start at `start_ms`.
    pub fn starting_at(start_ms: u64) -> Self {
        Self { now: start_ms }
    }

    /// Move forward by `ms`.
    pub fn advance(&mut self, ms: u64) {
        self.now = self.now.saturating_add(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now
    }
}
