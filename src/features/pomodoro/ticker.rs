//! Fixed-period tick source.
//!
//! The ticker doesn't own a thread or a callback; the event loop asks it how
//! many periods have elapsed and calls `tick()` that many times.

use std::time::{Duration, Instant};

/// A resumable fixed-period ticker.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    last_fire: Option<Instant>,
}

impl Ticker {
    /// Create a halted ticker.
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            last_fire: None,
        }
    }

    /// Create a halted one-second ticker.
    #[must_use]
    pub const fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    /// Start counting periods from `now`. No-op if already active.
    pub fn resume(&mut self, now: Instant) {
        if self.last_fire.is_none() {
            self.last_fire = Some(now);
        }
    }

    /// Stop counting. Any partial period is discarded.
    pub fn halt(&mut self) {
        self.last_fire = None;
    }

    /// Whether the ticker is counting.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.last_fire.is_some()
    }

    /// Number of whole periods elapsed since the last fire.
    ///
    /// Consumes them: the next call counts from the end of the last whole
    /// period, so late polls catch up without drifting.
    pub fn due(&mut self, now: Instant) -> u32 {
        let Some(last) = self.last_fire else {
            return 0;
        };
        if self.period.is_zero() {
            return 0;
        }

        let elapsed = now.saturating_duration_since(last);
        let periods = u32::try_from(elapsed.as_nanos() / self.period.as_nanos()).unwrap_or(u32::MAX);
        if periods > 0 {
            self.last_fire = Some(last + self.period * periods);
        }
        periods
    }

    /// Time until the next period completes, `None` while halted.
    #[must_use]
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        let last = self.last_fire?;
        let next = last + self.period;
        Some(next.saturating_duration_since(now))
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::every_second()
    }
}
