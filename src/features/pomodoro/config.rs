//! Validated timer configuration.

use serde::{Deserialize, Serialize};

use super::phase::Phase;
use crate::error::FocusdeckError;

/// Smallest allowed `long_break_interval`.
pub const MIN_LONG_BREAK_INTERVAL: u32 = 2;

/// Phase durations and long-break cadence.
///
/// Fields are private so every instance has passed [`TimerConfig::new`]:
/// durations are positive and the interval is at least 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTimerConfig", into = "RawTimerConfig")]
pub struct TimerConfig {
    work_seconds: u32,
    short_break_seconds: u32,
    long_break_seconds: u32,
    long_break_interval: u32,
}

/// Unvalidated wire form of [`TimerConfig`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawTimerConfig {
    work_seconds: u32,
    short_break_seconds: u32,
    long_break_seconds: u32,
    long_break_interval: u32,
}

impl TryFrom<RawTimerConfig> for TimerConfig {
    type Error = FocusdeckError;

    fn try_from(raw: RawTimerConfig) -> Result<Self, Self::Error> {
        Self::new(
            raw.work_seconds,
            raw.short_break_seconds,
            raw.long_break_seconds,
            raw.long_break_interval,
        )
    }
}

impl From<TimerConfig> for RawTimerConfig {
    fn from(config: TimerConfig) -> Self {
        Self {
            work_seconds: config.work_seconds,
            short_break_seconds: config.short_break_seconds,
            long_break_seconds: config.long_break_seconds,
            long_break_interval: config.long_break_interval,
        }
    }
}

/// A partial edit of the timer configuration.
///
/// `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    /// New work duration in seconds.
    pub work_seconds: Option<u32>,
    /// New short break duration in seconds.
    pub short_break_seconds: Option<u32>,
    /// New long break duration in seconds.
    pub long_break_seconds: Option<u32>,
    /// New long break interval.
    pub long_break_interval: Option<u32>,
}

impl SettingsUpdate {
    /// Whether the update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.work_seconds.is_none()
            && self.short_break_seconds.is_none()
            && self.long_break_seconds.is_none()
            && self.long_break_interval.is_none()
    }
}

impl TimerConfig {
    /// Build a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSettings` if any duration is zero or the interval is below 2.
    pub fn new(
        work_seconds: u32,
        short_break_seconds: u32,
        long_break_seconds: u32,
        long_break_interval: u32,
    ) -> Result<Self, FocusdeckError> {
        for (name, value) in [
            ("work", work_seconds),
            ("short break", short_break_seconds),
            ("long break", long_break_seconds),
        ] {
            if value == 0 {
                return Err(FocusdeckError::InvalidSettings(format!(
                    "{name} duration must be greater than zero"
                )));
            }
        }

        if long_break_interval < MIN_LONG_BREAK_INTERVAL {
            return Err(FocusdeckError::InvalidSettings(format!(
                "long break interval must be at least {MIN_LONG_BREAK_INTERVAL}, got {long_break_interval}"
            )));
        }

        Ok(Self {
            work_seconds,
            short_break_seconds,
            long_break_seconds,
            long_break_interval,
        })
    }

    /// Apply a partial edit, validating the result.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSettings` if the merged configuration is invalid.
    pub fn with_update(&self, update: SettingsUpdate) -> Result<Self, FocusdeckError> {
        Self::new(
            update.work_seconds.unwrap_or(self.work_seconds),
            update.short_break_seconds.unwrap_or(self.short_break_seconds),
            update.long_break_seconds.unwrap_or(self.long_break_seconds),
            update.long_break_interval.unwrap_or(self.long_break_interval),
        )
    }

    /// Work duration in seconds.
    #[must_use]
    pub const fn work_seconds(&self) -> u32 {
        self.work_seconds
    }

    /// Short break duration in seconds.
    #[must_use]
    pub const fn short_break_seconds(&self) -> u32 {
        self.short_break_seconds
    }

    /// Long break duration in seconds.
    #[must_use]
    pub const fn long_break_seconds(&self) -> u32 {
        self.long_break_seconds
    }

    /// Work phases per long break.
    #[must_use]
    pub const fn long_break_interval(&self) -> u32 {
        self.long_break_interval
    }

    /// Configured duration of a phase.
    #[must_use]
    pub const fn duration_of(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Work => self.work_seconds,
            Phase::ShortBreak => self.short_break_seconds,
            Phase::LongBreak => self.long_break_seconds,
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_seconds: 25 * 60,
            short_break_seconds: 5 * 60,
            long_break_seconds: 15 * 60,
            long_break_interval: 4,
        }
    }
}
