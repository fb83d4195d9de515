//! Session log entries.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use super::phase::SessionKind;

/// An immutable record of a completed phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Database ID (None until appended)
    pub id: Option<i64>,
    /// What kind of phase completed
    pub kind: SessionKind,
    /// Configured phase length in seconds
    pub duration_seconds: u32,
    /// When the phase completed
    pub completed_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Create a record that hasn't been stored yet.
    #[must_use]
    pub const fn new(kind: SessionKind, duration_seconds: u32, completed_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            kind,
            duration_seconds,
            completed_at,
        }
    }

    /// Duration in whole minutes, rounded down.
    #[must_use]
    pub const fn minutes(&self) -> u32 {
        self.duration_seconds / 60
    }

    /// Completion time in local timezone.
    #[must_use]
    pub fn completed_at_local(&self) -> DateTime<Local> {
        self.completed_at.with_timezone(&Local)
    }
}
