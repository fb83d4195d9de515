//! Timer phases, session kinds and alert preferences.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The countdown's current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Focused work
    Work,
    /// Short break between work phases
    ShortBreak,
    /// Long break after every `long_break_interval` work phases
    LongBreak,
}

impl Phase {
    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }

    /// Check if this is a break phase.
    #[must_use]
    pub const fn is_break(&self) -> bool {
        matches!(self, Self::ShortBreak | Self::LongBreak)
    }

    /// Session kind logged when this phase completes.
    #[must_use]
    pub const fn session_kind(&self) -> SessionKind {
        match self {
            Self::Work => SessionKind::Work,
            Self::ShortBreak | Self::LongBreak => SessionKind::Break,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Kind of a session log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    /// Completed work phase
    Work,
    /// Completed break
    Break,
}

impl SessionKind {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Break => "break",
        }
    }

    /// Parse the storage representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "work" => Some(Self::Work),
            "break" => Some(Self::Break),
            _ => None,
        }
    }
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Work => write!(f, "Work"),
            Self::Break => write!(f, "Break"),
        }
    }
}

/// Audio cue played at the end of a phase.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundCue {
    /// Alarm clock
    #[default]
    Alarm,
    /// Digital chime
    Chime,
    /// Bell
    Bell,
    /// A user-supplied audio file
    Custom(PathBuf),
}

impl SoundCue {
    /// Parse a cue name; anything else is treated as a file path.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "alarm" => Self::Alarm,
            "chime" => Self::Chime,
            "bell" => Self::Bell,
            _ => Self::Custom(PathBuf::from(s)),
        }
    }
}

impl std::fmt::Display for SoundCue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alarm => write!(f, "alarm"),
            Self::Chime => write!(f, "chime"),
            Self::Bell => write!(f, "bell"),
            Self::Custom(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Sound and notification preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertPreferences {
    /// Play `cue` when a phase ends.
    pub sound_enabled: bool,
    /// Notification permission has been granted.
    pub notifications_enabled: bool,
    /// Cue to play.
    pub cue: SoundCue,
}

impl Default for AlertPreferences {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            notifications_enabled: true,
            cue: SoundCue::Alarm,
        }
    }
}

impl AlertPreferences {
    /// Whether a phase-end notification should be requested.
    ///
    /// Notifications ride on the sound toggle: muting the timer also
    /// silences the desktop popup.
    #[must_use]
    pub const fn should_notify(&self) -> bool {
        self.notifications_enabled && self.sound_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_is_break() {
        assert!(!Phase::Work.is_break());
        assert!(Phase::ShortBreak.is_break());
        assert!(Phase::LongBreak.is_break());
    }

    #[test]
    fn test_phase_session_kind() {
        assert_eq!(Phase::Work.session_kind(), SessionKind::Work);
        assert_eq!(Phase::LongBreak.session_kind(), SessionKind::Break);
    }

    #[test]
    fn test_session_kind_parse() {
        assert_eq!(SessionKind::parse("work"), Some(SessionKind::Work));
        assert_eq!(SessionKind::parse("Break"), Some(SessionKind::Break));
        assert_eq!(SessionKind::parse("nap"), None);
    }

    #[test]
    fn test_sound_cue_parse() {
        assert_eq!(SoundCue::parse("chime"), SoundCue::Chime);
        assert_eq!(SoundCue::parse("BELL"), SoundCue::Bell);
        assert_eq!(
            SoundCue::parse("/tmp/ding.wav"),
            SoundCue::Custom(PathBuf::from("/tmp/ding.wav"))
        );
    }

    #[test]
    fn test_should_notify_requires_sound() {
        let mut prefs = AlertPreferences::default();
        assert!(prefs.should_notify());

        prefs.sound_enabled = false;
        assert!(!prefs.should_notify());

        prefs.sound_enabled = true;
        prefs.notifications_enabled = false;
        assert!(!prefs.should_notify());
    }

    #[test]
    fn test_alert_preferences_json() {
        let prefs: AlertPreferences = serde_json::from_str(r#"{"cue":"bell"}"#).unwrap();
        assert_eq!(prefs.cue, SoundCue::Bell);
        assert!(prefs.sound_enabled);
    }
}
