//! Configuration management for focusdeck.
//!
//! This module handles loading and saving configuration from `~/.focusdeck/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{ColorSetting, Config, GeneralConfig, GoalsConfig, PomodoroConfig, TasksConfig};
