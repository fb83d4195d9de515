//! Controller that owns the timer and carries out its effects.
//!
//! Front ends never touch the machine directly: they call the controller,
//! which runs the transition, then performs the requested side effects
//! against its collaborators. Collaborator failures are logged and never
//! undo in-memory state.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::config::{SettingsUpdate, TimerConfig};
use super::machine::{Effect, PhaseTransition, PomodoroMachine, TickOutcome, TimerState};
use super::phase::AlertPreferences;
use super::ports::{
    read_setting, write_setting, AudioSink, Notifier, SessionLog, SettingsStore, TaskRegistry,
};
use super::quotes::QuoteBag;
use crate::error::FocusdeckError;

/// Settings key for the timer configuration.
pub const TIMER_CONFIG_KEY: &str = "timer_config";
/// Settings key for the completed work counter.
pub const COMPLETED_KEY: &str = "completed_work_sessions";
/// Settings key for alert preferences.
pub const ALERTS_KEY: &str = "alert_preferences";

/// Everything the controller writes to or signals.
pub struct Collaborators {
    pub settings: Box<dyn SettingsStore>,
    pub session_log: Box<dyn SessionLog>,
    pub tasks: Box<dyn TaskRegistry>,
    pub notifier: Box<dyn Notifier>,
    pub audio: Box<dyn AudioSink>,
}

/// Read-only view of the timer for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct TimerSnapshot {
    #[serde(flatten)]
    pub state: TimerState,
    pub config: TimerConfig,
    pub active_task: Option<i64>,
    pub quote: Option<&'static str>,
}

impl TimerSnapshot {
    /// Fraction of the current phase already elapsed, in `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        let total = self.config.duration_of(self.state.phase);
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.state.remaining_seconds);
        f64::from(elapsed) / f64::from(total)
    }
}

/// Owns the state machine and applies its effects.
pub struct PomodoroController {
    machine: PomodoroMachine,
    quotes: QuoteBag,
    quote: Option<&'static str>,
    deps: Collaborators,
}

impl PomodoroController {
    /// Build a controller, restoring persisted settings and counters.
    ///
    /// `defaults` and `alerts` are used for any key the store doesn't have
    /// (or can't read).
    #[must_use]
    pub fn load(defaults: TimerConfig, alerts: AlertPreferences, deps: Collaborators) -> Self {
        let config = read_setting(deps.settings.as_ref(), TIMER_CONFIG_KEY, defaults);
        let alerts = read_setting(deps.settings.as_ref(), ALERTS_KEY, alerts);
        let completed = read_setting(deps.settings.as_ref(), COMPLETED_KEY, 0_u32);

        tracing::debug!(?config, completed, "restored pomodoro state");

        let mut quotes = QuoteBag::new();
        let quote = quotes.draw();

        Self {
            machine: PomodoroMachine::restore(config, alerts, completed),
            quotes,
            quote,
            deps,
        }
    }

    /// Current state, configuration and quote.
    #[must_use]
    pub const fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            state: self.machine.state(),
            config: *self.machine.config(),
            active_task: self.machine.active_task(),
            quote: self.quote,
        }
    }

    /// Current alert preferences.
    #[must_use]
    pub const fn alerts(&self) -> &AlertPreferences {
        self.machine.alerts()
    }

    /// Start or resume.
    pub fn start(&mut self) {
        self.machine.start();
    }

    /// Pause.
    pub fn pause(&mut self) {
        self.machine.pause();
    }

    /// Start if paused, pause if running. Returns the new running flag.
    pub fn toggle(&mut self) -> bool {
        if self.machine.state().is_running {
            self.pause();
        } else {
            self.start();
        }
        self.machine.state().is_running
    }

    /// Reset to a fresh work phase and persist the zeroed counter.
    pub fn reset(&mut self) {
        self.machine.reset();
        write_setting(self.deps.settings.as_ref(), COMPLETED_KEY, &0_u32);
        tracing::info!("pomodoro reset");
    }

    /// Advance one second, carrying out any transition effects.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        let outcome = self.machine.tick(now);
        if let TickOutcome::Transitioned(transition) = &outcome {
            self.apply_effects(transition);
        }
        outcome
    }

    /// End the current phase now.
    pub fn skip(&mut self, now: DateTime<Utc>) -> PhaseTransition {
        let transition = self.machine.skip(now);
        tracing::info!(ended = %transition.ended, "phase skipped");
        self.apply_effects(&transition);
        transition
    }

    /// Validate and apply a settings edit, then persist it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSettings` if the result would be invalid; the current
    /// configuration is kept.
    pub fn apply_settings(&mut self, update: SettingsUpdate) -> Result<TimerConfig, FocusdeckError> {
        let config = self.machine.config().with_update(update)?;
        self.machine.apply_settings(config);
        write_setting(self.deps.settings.as_ref(), TIMER_CONFIG_KEY, &config);
        tracing::info!(?config, "timer settings updated");
        Ok(config)
    }

    /// Set or clear the task credited for completed work phases.
    pub fn select_task(&mut self, task_id: Option<i64>) {
        self.machine.select_task(task_id);
    }

    /// Replace and persist alert preferences.
    pub fn set_alerts(&mut self, alerts: AlertPreferences) {
        write_setting(self.deps.settings.as_ref(), ALERTS_KEY, &alerts);
        self.machine.set_alerts(alerts);
    }

    fn apply_effects(&mut self, transition: &PhaseTransition) {
        for effect in &transition.effects {
            match effect {
                Effect::PersistCompleted(count) => {
                    write_setting(self.deps.settings.as_ref(), COMPLETED_KEY, count);
                }
                Effect::RecordSession(record) => {
                    if let Err(e) = self.deps.session_log.append(record) {
                        tracing::warn!(error = %e, "failed to log session");
                    }
                }
                Effect::CreditTask(task_id) => {
                    if let Err(e) = self.deps.tasks.increment_session_count(*task_id) {
                        tracing::warn!(task_id, error = %e, "failed to credit task");
                    }
                }
                Effect::RefreshQuote => {
                    self.quote = self.quotes.draw();
                }
                Effect::PlayCue(cue) => {
                    if let Err(e) = self.deps.audio.play(cue) {
                        tracing::warn!(%cue, error = %e, "audio cue failed");
                    }
                }
                Effect::Notify { title, body } => {
                    if let Err(e) = self.deps.notifier.notify(title, body) {
                        tracing::warn!(error = %e, "notification failed");
                    }
                }
            }
        }
    }
}
