//! Standalone countdown timer.
//!
//! Provides a countdown built from hours/minutes/seconds plus the duration
//! parsing and formatting helpers shared with the Pomodoro screen.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::FocusdeckError;

/// Largest accepted hours value.
pub const MAX_HOURS: u32 = 99;

/// Countdown state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownState {
    /// Counting down
    Running,
    /// Paused (or not yet started)
    Paused,
    /// Reached zero
    Completed,
}

/// A countdown timer.
#[derive(Debug, Clone)]
pub struct Countdown {
    total_seconds: u32,
    remaining_seconds: u32,
    state: CountdownState,
}

impl Countdown {
    /// Create a paused countdown.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a zero duration.
    pub fn new(total_seconds: u32) -> Result<Self, FocusdeckError> {
        if total_seconds == 0 {
            return Err(FocusdeckError::InvalidInput(
                "Please enter a time greater than zero".to_string(),
            ));
        }
        Ok(Self {
            total_seconds,
            remaining_seconds: total_seconds,
            state: CountdownState::Paused,
        })
    }

    /// Create a countdown from clock fields.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if hours exceed 99, minutes or seconds exceed
    /// 59, or the total is zero.
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Result<Self, FocusdeckError> {
        if hours > MAX_HOURS || minutes >= 60 || seconds >= 60 {
            return Err(FocusdeckError::InvalidInput(
                "Invalid time format: Hours (0-99), Minutes & Seconds (0-59)".to_string(),
            ));
        }
        Self::new(hours * 3600 + minutes * 60 + seconds)
    }

    /// Create a countdown from a duration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the duration is not positive or too long.
    pub fn from_duration(duration: Duration) -> Result<Self, FocusdeckError> {
        let seconds = u32::try_from(duration.num_seconds())
            .map_err(|_| FocusdeckError::InvalidInput("Duration out of range".to_string()))?;
        let hours = seconds / 3600;
        if hours > MAX_HOURS {
            return Err(FocusdeckError::InvalidInput(format!(
                "Duration must be under {} hours",
                MAX_HOURS + 1
            )));
        }
        Self::new(seconds)
    }

    /// Start or resume. Has no effect once completed.
    pub fn start(&mut self) {
        if self.state == CountdownState::Paused {
            self.state = CountdownState::Running;
        }
    }

    /// Pause.
    pub fn pause(&mut self) {
        if self.state == CountdownState::Running {
            self.state = CountdownState::Paused;
        }
    }

    /// Tick by one second.
    ///
    /// Returns true if the countdown just completed.
    pub fn tick(&mut self) -> bool {
        if self.state != CountdownState::Running {
            return false;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);

        if self.remaining_seconds == 0 {
            self.state = CountdownState::Completed;
            true
        } else {
            false
        }
    }

    /// Back to the full duration, paused.
    pub fn reset(&mut self) {
        self.remaining_seconds = self.total_seconds;
        self.state = CountdownState::Paused;
    }

    /// Remaining seconds.
    #[must_use]
    pub const fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Total seconds.
    #[must_use]
    pub const fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> CountdownState {
        self.state
    }

    /// Check if running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == CountdownState::Running
    }

    /// Check if completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.state == CountdownState::Completed
    }

    /// Progress as a fraction (0.0 - 1.0).
    #[must_use]
    pub fn progress(&self) -> f64 {
        1.0 - f64::from(self.remaining_seconds) / f64::from(self.total_seconds)
    }

    /// Remaining time as HH:MM:SS, or MM:SS under an hour.
    #[must_use]
    pub fn format_remaining(&self) -> String {
        format_clock(self.remaining_seconds)
    }
}

/// Format seconds as MM:SS. Minutes may exceed 59.
#[must_use]
pub fn format_seconds_mmss(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format a duration as MM:SS.
#[must_use]
pub fn format_duration_mmss(d: Duration) -> String {
    let total = u32::try_from(d.num_seconds().unsigned_abs()).unwrap_or(u32::MAX);
    format_seconds_mmss(total)
}

/// Format seconds as HH:MM:SS, dropping the hours field when zero.
#[must_use]
pub fn format_clock(total_seconds: u32) -> String {
    let hours = total_seconds / 3600;
    if hours == 0 {
        return format_seconds_mmss(total_seconds);
    }
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Format a duration as a human-readable string.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let total_minutes = d.num_minutes();

    if total_minutes < 1 {
        let seconds = d.num_seconds();
        return format!("{} second{}", seconds, if seconds == 1 { "" } else { "s" });
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    let plural = |n: i64| if n == 1 { "" } else { "s" };

    match (hours, minutes) {
        (0, m) => format!("{m} minute{}", plural(m)),
        (h, 0) => format!("{h} hour{}", plural(h)),
        (h, m) => format!("{h} hour{}, {m} minute{}", plural(h), plural(m)),
    }
}

/// Parse a duration string like "25", "25m", "1h30m", "90s".
///
/// A bare number means minutes.
#[must_use]
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim().to_lowercase();

    if let Ok(minutes) = s.parse::<i64>() {
        return (minutes > 0).then(|| Duration::minutes(minutes));
    }

    let mut total_seconds: i64 = 0;
    let mut current_num = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
        } else if !current_num.is_empty() {
            let num: i64 = current_num.parse().ok()?;
            current_num.clear();

            match c {
                'h' => total_seconds += num * 3600,
                'm' => total_seconds += num * 60,
                's' => total_seconds += num,
                _ => return None,
            }
        } else if !c.is_whitespace() {
            return None;
        }
    }

    // Trailing number without unit is minutes
    if !current_num.is_empty() {
        let num: i64 = current_num.parse().ok()?;
        total_seconds += num * 60;
    }

    (total_seconds > 0).then(|| Duration::seconds(total_seconds))
}

/// Render a progress bar.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0)) * width as f64) as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
