//! Goal types and progress rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FocusdeckError;

/// A checkpoint on the way to a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

/// A goal with a target date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub created: DateTime<Utc>,
    pub target_date: DateTime<Utc>,
    pub completed: bool,
    /// Percent complete, 0 to 100
    pub progress: u8,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

/// How close a goal is to its target date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Done,
    Due,
    Soon,
    OnTrack,
}

impl Goal {
    /// Whole days until the target date, never negative.
    #[must_use]
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        (self.target_date - now).num_days().max(0)
    }

    /// Classify by days remaining.
    #[must_use]
    pub fn urgency(&self, now: DateTime<Utc>) -> Urgency {
        if self.completed {
            return Urgency::Done;
        }
        match self.days_remaining(now) {
            0 => Urgency::Due,
            1..=3 => Urgency::Soon,
            _ => Urgency::OnTrack,
        }
    }

    /// Milestone-derived progress, `None` when there are no milestones.
    #[must_use]
    pub fn milestone_progress(&self) -> Option<u8> {
        if self.milestones.is_empty() {
            return None;
        }
        let done = self.milestones.iter().filter(|m| m.completed).count();
        Some(percent(done, self.milestones.len()))
    }

    /// Set progress directly. Reaching 100 completes the goal, anything
    /// lower reopens it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for values over 100.
    pub fn set_progress(&mut self, progress: u8) -> Result<(), FocusdeckError> {
        if progress > 100 {
            return Err(FocusdeckError::InvalidInput(format!(
                "Progress must be between 0 and 100, got {progress}"
            )));
        }
        self.progress = progress;
        self.completed = progress == 100;
        Ok(())
    }

    /// Flip completion. Completing jumps progress to 100; reopening keeps it.
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
        if self.completed {
            self.progress = 100;
        }
    }

    /// Flip a milestone and recompute progress from all milestones.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the milestone isn't part of this goal.
    pub fn toggle_milestone(&mut self, milestone_id: i64) -> Result<(), FocusdeckError> {
        let milestone = self
            .milestones
            .iter_mut()
            .find(|m| m.id == milestone_id)
            .ok_or_else(|| {
                FocusdeckError::NotFound(format!("milestone {milestone_id} on goal {}", self.id))
            })?;
        milestone.completed = !milestone.completed;

        if let Some(progress) = self.milestone_progress() {
            self.progress = progress;
            self.completed = progress == 100;
        }
        Ok(())
    }
}

/// `round(done / total * 100)`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((done as f64 / total as f64) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Which goals to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl GoalFilter {
    /// Check whether a goal passes the filter.
    #[must_use]
    pub const fn matches(self, goal: &Goal) -> bool {
        match self {
            Self::All => true,
            Self::Active => !goal.completed,
            Self::Completed => goal.completed,
        }
    }
}

/// Fields for a new goal.
#[derive(Debug, Clone, Default)]
pub struct NewGoal {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Days from now until the target date
    pub duration_days: u32,
    pub milestones: Vec<String>,
}
