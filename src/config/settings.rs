//! Configuration settings for focusdeck.
//!
//! Settings are loaded from `~/.focusdeck/config.yaml`. The values under
//! `pomodoro` are only defaults; edits made at runtime live in the settings
//! store and take precedence.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::FocusdeckError;
use crate::features::pomodoro::{AlertPreferences, SoundCue, TimerConfig};
use crate::features::tasks::{Priority, TaskSort};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Pomodoro defaults.
    pub pomodoro: PomodoroConfig,
    /// Task list settings.
    pub tasks: TasksConfig,
    /// Goal settings.
    pub goals: GoalsConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply this setting to the global `colored` override.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Pomodoro defaults used until the user edits settings at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PomodoroConfig {
    /// Work phase length in minutes.
    #[serde(default = "default_work")]
    pub work_minutes: u32,
    /// Short break length in minutes.
    #[serde(default = "default_short_break")]
    pub short_break_minutes: u32,
    /// Long break length in minutes.
    #[serde(default = "default_long_break")]
    pub long_break_minutes: u32,
    /// Number of work phases before a long break.
    #[serde(default = "default_long_break_interval")]
    pub long_break_interval: u32,
    /// Play an audio cue when a phase ends.
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    /// Show a desktop notification when a phase ends.
    #[serde(default = "default_true")]
    pub notifications: bool,
    /// Which cue to play.
    #[serde(default)]
    pub sound: SoundCue,
}

/// Task list settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TasksConfig {
    /// Default sort order for `task list`.
    #[serde(default)]
    pub default_sort: TaskSort,
    /// Priority assigned when `task add` doesn't specify one.
    #[serde(default)]
    pub default_priority: Priority,
    /// Categories offered to the user.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

/// Goal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalsConfig {
    /// Days until a new goal's target date.
    #[serde(default = "default_goal_days")]
    pub default_duration_days: u32,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

const fn default_work() -> u32 {
    25
}

const fn default_short_break() -> u32 {
    5
}

const fn default_long_break() -> u32 {
    15
}

const fn default_long_break_interval() -> u32 {
    4
}

const fn default_true() -> bool {
    true
}

const fn default_goal_days() -> u32 {
    14
}

fn default_categories() -> Vec<String> {
    ["Study", "Work", "Personal", "Exercise", "Reading"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work(),
            short_break_minutes: default_short_break(),
            long_break_minutes: default_long_break(),
            long_break_interval: default_long_break_interval(),
            sound_enabled: default_true(),
            notifications: default_true(),
            sound: SoundCue::default(),
        }
    }
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            default_sort: TaskSort::default(),
            default_priority: Priority::default(),
            categories: default_categories(),
        }
    }
}

impl Default for GoalsConfig {
    fn default() -> Self {
        Self {
            default_duration_days: default_goal_days(),
        }
    }
}

impl PomodoroConfig {
    /// Build a validated timer configuration from these defaults.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSettings` if any duration is zero or too large, or the
    /// interval is below 2.
    pub fn timer_config(&self) -> Result<TimerConfig, FocusdeckError> {
        TimerConfig::new(
            minutes_to_seconds("work", self.work_minutes)?,
            minutes_to_seconds("short break", self.short_break_minutes)?,
            minutes_to_seconds("long break", self.long_break_minutes)?,
            self.long_break_interval,
        )
    }

    /// Alert preferences from these defaults.
    #[must_use]
    pub fn alert_preferences(&self) -> AlertPreferences {
        AlertPreferences {
            sound_enabled: self.sound_enabled,
            notifications_enabled: self.notifications,
            cue: self.sound.clone(),
        }
    }
}

fn minutes_to_seconds(name: &str, minutes: u32) -> Result<u32, FocusdeckError> {
    minutes.checked_mul(60).ok_or_else(|| {
        FocusdeckError::InvalidSettings(format!("{name} duration of {minutes} minutes is too long"))
    })
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, FocusdeckError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, FocusdeckError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            FocusdeckError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            FocusdeckError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save(&self) -> Result<(), FocusdeckError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        self.save_to_path(&paths.config_file)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), FocusdeckError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| FocusdeckError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            FocusdeckError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert_eq!(config.pomodoro.work_minutes, 25);
        assert_eq!(config.pomodoro.short_break_minutes, 5);
        assert_eq!(config.pomodoro.long_break_interval, 4);
        assert_eq!(config.goals.default_duration_days, 14);
        assert_eq!(config.tasks.categories.len(), 5);
    }

    #[test]
    fn test_default_timer_config() {
        let timer = Config::default().pomodoro.timer_config().unwrap();
        assert_eq!(timer.work_seconds(), 1500);
        assert_eq!(timer.short_break_seconds(), 300);
        assert_eq!(timer.long_break_seconds(), 900);
        assert_eq!(timer.long_break_interval(), 4);
    }

    #[test]
    fn test_invalid_pomodoro_defaults_rejected() {
        let mut config = Config::default();
        config.pomodoro.long_break_interval = 1;
        assert!(config.pomodoro.timer_config().is_err());
    }

    #[test]
    fn test_oversized_pomodoro_defaults_rejected() {
        let mut config = Config::default();
        config.pomodoro.work_minutes = u32::MAX;
        let err = config.pomodoro.timer_config().unwrap_err();
        assert!(matches!(err, FocusdeckError::InvalidSettings(_)));
        assert!(err.to_string().contains("too long"));

        config.pomodoro.work_minutes = 25;
        config.pomodoro.long_break_minutes = u32::MAX / 60 + 1;
        assert!(config.pomodoro.timer_config().is_err());
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.pomodoro.work_minutes = 50;
        config.pomodoro.sound = SoundCue::Bell;
        config.goals.default_duration_days = 30;

        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.pomodoro.work_minutes, 50);
        assert_eq!(loaded.pomodoro.sound, SoundCue::Bell);
        assert_eq!(loaded.goals.default_duration_days, 30);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r"
pomodoro:
  work_minutes: 45
  notifications: false
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.pomodoro.work_minutes, 45);
        assert!(!config.pomodoro.notifications);
        assert_eq!(config.pomodoro.short_break_minutes, 5);
        assert!(config.pomodoro.sound_enabled);
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "pomodoro: [not, a, map]").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(matches!(err, FocusdeckError::Config(_)));
    }
}
