//! JSON output formatting for focusdeck.

use serde::Serialize;
use serde_json::json;

use crate::error::FocusdeckError;
use crate::features::goals::Goal;
use crate::features::notes::Note;
use crate::features::pomodoro::{AlertPreferences, SessionRecord, TimerConfig};
use crate::features::tasks::Task;

/// Format tasks as JSON
///
/// # Errors
///
/// Returns `FocusdeckError::Parse` if JSON serialization fails.
pub fn format_tasks_json(tasks: &[Task], list_name: &str) -> Result<String, FocusdeckError> {
    let output = json!({
        "list": list_name,
        "count": tasks.len(),
        "items": tasks
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format goals as JSON
///
/// # Errors
///
/// Returns `FocusdeckError::Parse` if JSON serialization fails.
pub fn format_goals_json(goals: &[Goal]) -> Result<String, FocusdeckError> {
    let output = json!({
        "count": goals.len(),
        "items": goals
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format notes as JSON
///
/// # Errors
///
/// Returns `FocusdeckError::Parse` if JSON serialization fails.
pub fn format_notes_json(notes: &[Note], list_name: &str) -> Result<String, FocusdeckError> {
    let output = json!({
        "list": list_name,
        "count": notes.len(),
        "items": notes
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format logged sessions as JSON
///
/// # Errors
///
/// Returns `FocusdeckError::Parse` if JSON serialization fails.
pub fn format_sessions_json(sessions: &[SessionRecord]) -> Result<String, FocusdeckError> {
    let output = json!({
        "count": sessions.len(),
        "items": sessions
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format timer settings as JSON
///
/// # Errors
///
/// Returns `FocusdeckError::Parse` if JSON serialization fails.
pub fn format_timer_settings_json(
    config: &TimerConfig,
    alerts: &AlertPreferences,
    completed_work_sessions: u32,
) -> Result<String, FocusdeckError> {
    let output = json!({
        "timer": config,
        "alerts": alerts,
        "completed_work_sessions": completed_work_sessions
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `FocusdeckError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, FocusdeckError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::pomodoro::SessionKind;
    use chrono::Utc;

    #[test]
    fn test_format_sessions_json_shape() {
        let record = SessionRecord::new(SessionKind::Work, 1500, Utc::now());
        let out = format_sessions_json(&[record]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["items"][0]["kind"], "work");
        assert_eq!(value["items"][0]["duration_seconds"], 1500);
    }

    #[test]
    fn test_format_timer_settings_json() {
        let out = format_timer_settings_json(&TimerConfig::default(), &AlertPreferences::default(), 3)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["timer"]["work_seconds"], 1500);
        assert_eq!(value["timer"]["long_break_interval"], 4);
        assert_eq!(value["alerts"]["sound_enabled"], true);
        assert_eq!(value["completed_work_sessions"], 3);
    }

    #[test]
    fn test_format_tasks_json_empty() {
        let out = format_tasks_json(&[], "Tasks").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["list"], "Tasks");
        assert_eq!(value["count"], 0);
        assert!(value["items"].as_array().unwrap().is_empty());
    }
}
