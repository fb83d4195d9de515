//! Command implementations for focusdeck.
//!
//! Each command returns the text to print; an empty string prints nothing.

mod completions;
mod countdown;
mod goal;
mod note;
mod pomodoro;
mod settings;
mod stats;
mod stopwatch;
mod task;

pub use completions::generate_completions;
pub use countdown::countdown;
pub use goal::goal;
pub use note::note;
pub use pomodoro::pomodoro;
pub use settings::settings;
pub use stats::stats;
pub use stopwatch::stopwatch;
pub use task::task;

use std::rc::Rc;

use chrono::NaiveDate;

use crate::config::{Config, Paths};
use crate::error::FocusdeckError;
use crate::features::pomodoro::ports::read_setting;
use crate::features::pomodoro::{
    AlertPreferences, AudioSink, Collaborators, Notifier, PomodoroController, SessionStorage,
    TimerConfig, ALERTS_KEY,
};
use crate::features::tasks::TaskStorage;
use crate::storage::{Database, KeyValueStore};

/// Paths, configuration and the open database shared by every command.
pub struct Context {
    pub paths: Paths,
    pub config: Config,
    pub db: Rc<Database>,
}

impl Context {
    /// Load the config file and open the database under `paths`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created, the config
    /// file is malformed, or the database cannot be opened.
    pub fn open(paths: Paths) -> Result<Self, FocusdeckError> {
        paths.ensure_dirs()?;
        let config = Config::load_from_path(&paths.config_file)?;
        let db = Rc::new(Database::open_at(&paths.database)?);
        Ok(Self { paths, config, db })
    }

    /// Timer durations used when nothing valid has been saved.
    ///
    /// Invalid config-file values are logged and replaced by the built-in
    /// defaults so a saved configuration can still be loaded or fixed.
    #[must_use]
    pub fn timer_defaults(&self) -> TimerConfig {
        self.config.pomodoro.timer_config().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring invalid pomodoro defaults in config file");
            TimerConfig::default()
        })
    }

    /// Alert preferences as last saved, or the config-file defaults.
    #[must_use]
    pub fn alert_preferences(&self) -> AlertPreferences {
        read_setting(
            &KeyValueStore::new(Rc::clone(&self.db)),
            ALERTS_KEY,
            self.config.pomodoro.alert_preferences(),
        )
    }

    /// Build a timer controller backed by this context's database.
    #[must_use]
    pub fn controller(
        &self,
        notifier: Box<dyn Notifier>,
        audio: Box<dyn AudioSink>,
    ) -> PomodoroController {
        let deps = Collaborators {
            settings: Box::new(KeyValueStore::new(Rc::clone(&self.db))),
            session_log: Box::new(SessionStorage::new(Rc::clone(&self.db))),
            tasks: Box::new(TaskStorage::new(Rc::clone(&self.db))),
            notifier,
            audio,
        };
        PomodoroController::load(
            self.timer_defaults(),
            self.config.pomodoro.alert_preferences(),
            deps,
        )
    }
}

/// Parse a `YYYY-MM-DD` date argument.
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, FocusdeckError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| FocusdeckError::InvalidInput(format!("Invalid date '{s}' (expected YYYY-MM-DD)")))
}

/// `"none"` clears an optional field, anything else sets it.
pub(crate) fn clearable(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| {
        if v.eq_ignore_ascii_case("none") || v.trim().is_empty() {
            None
        } else {
            Some(v)
        }
    })
}
