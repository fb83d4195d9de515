//! Collaborators the controller talks to.
//!
//! Each is a narrow trait so tests can substitute mocks and the terminal
//! front ends can plug in real storage, notifications and audio.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::phase::SoundCue;
use super::record::SessionRecord;
use crate::error::FocusdeckError;

/// Key/value settings persistence.
#[cfg_attr(test, mockall::automock)]
pub trait SettingsStore {
    /// Read a value, `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<Value>, FocusdeckError>;
    /// Write a value.
    fn set(&self, key: &str, value: &Value) -> Result<(), FocusdeckError>;
}

/// Append-only log of completed sessions.
#[cfg_attr(test, mockall::automock)]
pub trait SessionLog {
    /// Append a record.
    fn append(&self, record: &SessionRecord) -> Result<(), FocusdeckError>;
}

/// Per-task session counters.
#[cfg_attr(test, mockall::automock)]
pub trait TaskRegistry {
    /// Increment a task's session counter. Unknown IDs are ignored.
    fn increment_session_count(&self, task_id: i64) -> Result<(), FocusdeckError>;
}

/// User-visible notifications.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    /// Show a notification.
    fn notify(&self, title: &str, body: &str) -> Result<(), FocusdeckError>;
}

/// Audio cue playback.
#[cfg_attr(test, mockall::automock)]
pub trait AudioSink {
    /// Start playing a cue. Must not block until playback finishes.
    fn play(&self, cue: &SoundCue) -> Result<(), FocusdeckError>;
}

/// Read a typed setting, falling back to `default` when it is missing or unreadable.
pub fn read_setting<T: DeserializeOwned>(store: &dyn SettingsStore, key: &str, default: T) -> T {
    match store.get(key) {
        Ok(Some(value)) => match serde_json::from_value(value) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring malformed setting");
                default
            }
        },
        Ok(None) => default,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read setting");
            default
        }
    }
}

/// Write a typed setting. Failures are logged, never returned.
pub fn write_setting<T: Serialize>(store: &dyn SettingsStore, key: &str, value: &T) {
    let result = serde_json::to_value(value)
        .map_err(FocusdeckError::from)
        .and_then(|json| store.set(key, &json));

    if let Err(e) = result {
        tracing::warn!(key, error = %e, "failed to persist setting");
    }
}
