//! Output formatting for focusdeck.
//!
//! This module provides formatters for displaying tasks, goals, notes and
//! timer data in various formats.

mod json;
mod pretty;

use chrono::{DateTime, Local, Utc};

use crate::cli::args::OutputFormat;
use crate::error::FocusdeckError;
use crate::features::goals::Goal;
use crate::features::notes::Note;
use crate::features::pomodoro::{AlertPreferences, SessionRecord, TimerConfig};
use crate::features::tasks::Task;

pub use json::*;
pub use pretty::*;

/// Format tasks based on output format
///
/// # Errors
///
/// Returns `FocusdeckError::Parse` if JSON serialization fails.
pub fn format_tasks(
    tasks: &[Task],
    title: &str,
    format: OutputFormat,
) -> Result<String, FocusdeckError> {
    match format {
        OutputFormat::Pretty => Ok(format_tasks_pretty(tasks, title, Local::now().date_naive())),
        OutputFormat::Json => format_tasks_json(tasks, title),
    }
}

/// Format a single task based on output format
///
/// # Errors
///
/// Returns `FocusdeckError::Parse` if JSON serialization fails.
pub fn format_task(task: &Task, format: OutputFormat) -> Result<String, FocusdeckError> {
    match format {
        OutputFormat::Pretty => Ok(format_task_pretty(task)),
        OutputFormat::Json => to_json(task),
    }
}

/// Format goals based on output format
///
/// # Errors
///
/// Returns `FocusdeckError::Parse` if JSON serialization fails.
pub fn format_goals(
    goals: &[Goal],
    now: DateTime<Utc>,
    format: OutputFormat,
) -> Result<String, FocusdeckError> {
    match format {
        OutputFormat::Pretty => Ok(format_goals_pretty(goals, now)),
        OutputFormat::Json => format_goals_json(goals),
    }
}

/// Format a single goal based on output format
///
/// # Errors
///
/// Returns `FocusdeckError::Parse` if JSON serialization fails.
pub fn format_goal(
    goal: &Goal,
    now: DateTime<Utc>,
    format: OutputFormat,
) -> Result<String, FocusdeckError> {
    match format {
        OutputFormat::Pretty => Ok(format_goal_pretty(goal, now)),
        OutputFormat::Json => to_json(goal),
    }
}

/// Format notes based on output format
///
/// # Errors
///
/// Returns `FocusdeckError::Parse` if JSON serialization fails.
pub fn format_notes(
    notes: &[Note],
    title: &str,
    format: OutputFormat,
) -> Result<String, FocusdeckError> {
    match format {
        OutputFormat::Pretty => Ok(format_notes_pretty(notes, title)),
        OutputFormat::Json => format_notes_json(notes, title),
    }
}

/// Format a single note based on output format
///
/// # Errors
///
/// Returns `FocusdeckError::Parse` if JSON serialization fails.
pub fn format_note(note: &Note, format: OutputFormat) -> Result<String, FocusdeckError> {
    match format {
        OutputFormat::Pretty => Ok(format_note_pretty(note)),
        OutputFormat::Json => to_json(note),
    }
}

/// Format logged sessions based on output format
///
/// # Errors
///
/// Returns `FocusdeckError::Parse` if JSON serialization fails.
pub fn format_sessions(
    sessions: &[SessionRecord],
    format: OutputFormat,
) -> Result<String, FocusdeckError> {
    match format {
        OutputFormat::Pretty => Ok(format_sessions_pretty(sessions)),
        OutputFormat::Json => format_sessions_json(sessions),
    }
}

/// Format timer settings based on output format
///
/// # Errors
///
/// Returns `FocusdeckError::Parse` if JSON serialization fails.
pub fn format_timer_settings(
    config: &TimerConfig,
    alerts: &AlertPreferences,
    completed_work_sessions: u32,
    format: OutputFormat,
) -> Result<String, FocusdeckError> {
    match format {
        OutputFormat::Pretty => Ok(format_timer_settings_pretty(
            config,
            alerts,
            completed_work_sessions,
        )),
        OutputFormat::Json => format_timer_settings_json(config, alerts, completed_work_sessions),
    }
}
