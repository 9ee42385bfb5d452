use std::time::{Duration, Instant};

use crate::foundation::error::{FaceError, FaceResult};

/// Fixed-rate gate for a render loop.
///
/// Polling returns the elapsed milliseconds since the previous accepted tick once strictly
/// more than one interval has passed, and `None` otherwise.
#[derive(Clone, Copy, Debug)]
pub struct Ticker {
    interval: Duration,
    last: Instant,
}

impl Ticker {
    /// Default display rate.
    pub const DEFAULT_HZ: f64 = 60.0;

    /// Gate running at `hz` ticks per second, starting at `start`.
    pub fn new(hz: f64, start: Instant) -> FaceResult<Self> {
        if !(hz.is_finite() && hz > 0.0) {
            return Err(FaceError::config(format!(
                "tick rate must be positive and finite, got {hz}"
            )));
        }
        Ok(Self {
            interval: Duration::from_secs_f64(1.0 / hz),
            last: start,
        })
    }

    /// Interval between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Accept a tick at `now` if an interval has passed.
    pub fn poll(&mut self, now: Instant) -> Option<f64> {
        let since = now.saturating_duration_since(self.last);
        if since <= self.interval {
            return None;
        }
        self.last = now;
        Some(since.as_secs_f64() * 1000.0)
    }

    /// Time left until the next tick can be accepted.
    pub fn remaining(&self, now: Instant) -> Duration {
        (self.last + self.interval).saturating_duration_since(now)
    }
}
