//! Count-up stopwatch for free-form timing.

use serde::Serialize;

use super::timer::format_clock;

/// A stopwatch counting whole seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stopwatch {
    elapsed_seconds: u32,
    running: bool,
}

impl Stopwatch {
    /// Create a stopped stopwatch at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elapsed_seconds: 0,
            running: false,
        }
    }

    /// Start if stopped, stop if running. Returns the new running flag.
    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Start counting.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop counting. Elapsed time is kept.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stop and clear.
    pub fn reset(&mut self) {
        self.running = false;
        self.elapsed_seconds = 0;
    }

    /// Count one second while running.
    pub fn tick(&mut self) {
        if self.running {
            self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        }
    }

    /// Elapsed seconds.
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// Check if running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Nothing to reset at zero.
    #[must_use]
    pub const fn can_reset(&self) -> bool {
        self.elapsed_seconds > 0
    }

    /// Elapsed time as MM:SS, or HH:MM:SS past an hour.
    #[must_use]
    pub fn format_elapsed(&self) -> String {
        format_clock(self.elapsed_seconds)
    }
}
