use std::time::{Duration, Instant};

/// Fixed-interval gravity clock.
#[derive(Clone, Debug)]
pub struct FallTimer {
    interval: Duration,
    last: Instant,
}

impl FallTimer {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self { interval, last: now }
    }

    /// True once per elapsed interval; the next interval starts at `now`.
    pub fn due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }

    /// Restart the interval, e.g. after a pause.
    pub fn reset(&mut self, now: Instant) {
        self.last = now;
    }
}
