//! The Pomodoro state machine.
//!
//! Pure transition logic: every operation mutates the machine and returns
//! the side effects it wants performed. Nothing here touches storage, audio
//! or the clock; the caller passes `now` in and carries out the effects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::TimerConfig;
use super::phase::{AlertPreferences, Phase, SessionKind, SoundCue};
use super::record::SessionRecord;

/// Observable timer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Current phase
    pub phase: Phase,
    /// Seconds left in the current phase
    pub remaining_seconds: u32,
    /// Whether ticks advance the countdown
    pub is_running: bool,
    /// Work phases completed since the last reset
    pub completed_work_sessions: u32,
    /// Work phases completed since the cycle counter last reset
    pub cycles_since_long_break: u32,
}

impl TimerState {
    /// Initial state for a configuration.
    #[must_use]
    pub const fn initial(config: &TimerConfig) -> Self {
        Self {
            phase: Phase::Work,
            remaining_seconds: config.work_seconds(),
            is_running: false,
            completed_work_sessions: 0,
            cycles_since_long_break: 0,
        }
    }
}

/// A side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Persist the completed work counter.
    PersistCompleted(u32),
    /// Append a record to the session log.
    RecordSession(SessionRecord),
    /// Increment a task's session counter.
    CreditTask(i64),
    /// Surface a new motivational quote.
    RefreshQuote,
    /// Play an audio cue.
    PlayCue(SoundCue),
    /// Show a notification.
    Notify {
        /// Notification title
        title: String,
        /// Notification body
        body: String,
    },
}

/// What happened when a phase ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseTransition {
    /// Phase that just completed
    pub ended: Phase,
    /// Phase now counting down
    pub next: Phase,
    /// Duration of `next` in seconds
    pub duration_seconds: u32,
    /// Effects to carry out, in order
    pub effects: Vec<Effect>,
}

/// Result of a single tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer is paused; nothing changed.
    Idle,
    /// One second was counted down.
    Counted {
        /// Seconds left after this tick
        remaining_seconds: u32,
    },
    /// The countdown had reached zero and the phase changed.
    Transitioned(PhaseTransition),
}

/// Work/break cycle state machine.
#[derive(Debug, Clone)]
pub struct PomodoroMachine {
    config: TimerConfig,
    alerts: AlertPreferences,
    state: TimerState,
    active_task: Option<i64>,
}

impl PomodoroMachine {
    /// Create a fresh machine.
    #[must_use]
    pub fn new(config: TimerConfig, alerts: AlertPreferences) -> Self {
        Self {
            state: TimerState::initial(&config),
            config,
            alerts,
            active_task: None,
        }
    }

    /// Create a machine restoring a persisted work counter.
    ///
    /// Only the lifetime counter survives restarts; the long-break cycle
    /// starts over.
    #[must_use]
    pub fn restore(
        config: TimerConfig,
        alerts: AlertPreferences,
        completed_work_sessions: u32,
    ) -> Self {
        let mut machine = Self::new(config, alerts);
        machine.state.completed_work_sessions = completed_work_sessions;
        machine
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> TimerState {
        self.state
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Current alert preferences.
    #[must_use]
    pub const fn alerts(&self) -> &AlertPreferences {
        &self.alerts
    }

    /// Task credited when the current work phase completes.
    #[must_use]
    pub const fn active_task(&self) -> Option<i64> {
        self.active_task
    }

    /// Start or resume the countdown. No-op if already running.
    pub fn start(&mut self) {
        self.state.is_running = true;
    }

    /// Pause the countdown.
    pub fn pause(&mut self) {
        self.state.is_running = false;
    }

    /// Return to a fresh work phase with zeroed counters.
    pub fn reset(&mut self) {
        self.state = TimerState::initial(&self.config);
        self.active_task = None;
    }

    /// Associate (or clear) the task credited for completed work phases.
    pub fn select_task(&mut self, task_id: Option<i64>) {
        self.active_task = task_id;
    }

    /// Replace alert preferences.
    pub fn set_alerts(&mut self, alerts: AlertPreferences) {
        self.alerts = alerts;
    }

    /// Replace the configuration.
    ///
    /// An idle work phase restarts at the new work duration. Anything else
    /// keeps counting and picks the new durations up at the next transition,
    /// except that `remaining_seconds` is clamped to the current phase's new
    /// duration.
    pub fn apply_settings(&mut self, config: TimerConfig) {
        self.config = config;

        if self.state.phase == Phase::Work && !self.state.is_running {
            self.state.remaining_seconds = config.work_seconds();
            return;
        }

        let limit = config.duration_of(self.state.phase);
        if self.state.remaining_seconds > limit {
            self.state.remaining_seconds = limit;
        }
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        if !self.state.is_running {
            return TickOutcome::Idle;
        }

        if self.state.remaining_seconds > 0 {
            self.state.remaining_seconds -= 1;
            return TickOutcome::Counted {
                remaining_seconds: self.state.remaining_seconds,
            };
        }

        TickOutcome::Transitioned(self.transition(now))
    }

    /// End the current phase immediately.
    ///
    /// Counts exactly like a natural completion. The running flag is left
    /// as it was.
    pub fn skip(&mut self, now: DateTime<Utc>) -> PhaseTransition {
        self.transition(now)
    }

    fn transition(&mut self, now: DateTime<Utc>) -> PhaseTransition {
        let ended = self.state.phase;
        let mut effects = Vec::new();

        let next = if ended == Phase::Work {
            self.state.completed_work_sessions += 1;
            self.state.cycles_since_long_break += 1;

            effects.push(Effect::PersistCompleted(self.state.completed_work_sessions));
            effects.push(Effect::RecordSession(SessionRecord::new(
                SessionKind::Work,
                self.config.work_seconds(),
                now,
            )));
            if let Some(task_id) = self.active_task {
                effects.push(Effect::CreditTask(task_id));
            }

            if self.state.cycles_since_long_break % self.config.long_break_interval() == 0 {
                Phase::LongBreak
            } else {
                Phase::ShortBreak
            }
        } else {
            effects.push(Effect::RefreshQuote);
            Phase::Work
        };

        let duration_seconds = self.config.duration_of(next);

        if self.alerts.sound_enabled {
            effects.push(Effect::PlayCue(self.alerts.cue.clone()));
        }
        if self.alerts.should_notify() {
            effects.push(Effect::Notify {
                title: format!("{ended} session ended!"),
                body: format!(
                    "{next} starts now ({})",
                    crate::features::countdown::format_seconds_mmss(duration_seconds)
                ),
            });
        }

        self.state.phase = next;
        self.state.remaining_seconds = duration_seconds;

        tracing::debug!(
            %ended,
            %next,
            completed = self.state.completed_work_sessions,
            cycles = self.state.cycles_since_long_break,
            "phase transition"
        );

        PhaseTransition {
            ended,
            next,
            duration_seconds,
            effects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn quiet() -> AlertPreferences {
        AlertPreferences {
            sound_enabled: false,
            notifications_enabled: false,
            cue: SoundCue::Alarm,
        }
    }

    fn scenario_config() -> TimerConfig {
        TimerConfig::new(1500, 300, 900, 4).unwrap()
    }

    /// Tick until the current phase transitions.
    fn run_phase(machine: &mut PomodoroMachine) -> PhaseTransition {
        loop {
            if let TickOutcome::Transitioned(t) = machine.tick(now()) {
                return t;
            }
        }
    }

    #[test]
    fn test_initial_state() {
        let machine = PomodoroMachine::new(scenario_config(), quiet());
        let state = machine.state();
        assert_eq!(state.phase, Phase::Work);
        assert_eq!(state.remaining_seconds, 1500);
        assert!(!state.is_running);
        assert_eq!(state.completed_work_sessions, 0);
        assert_eq!(state.cycles_since_long_break, 0);
    }

    #[test]
    fn test_start_is_idempotent_and_keeps_remaining() {
        let mut machine = PomodoroMachine::new(scenario_config(), quiet());
        machine.start();
        machine.tick(now());
        machine.start();
        assert!(machine.state().is_running);
        assert_eq!(machine.state().remaining_seconds, 1499);
    }

    #[test]
    fn test_tick_while_paused_has_no_effect() {
        let mut machine = PomodoroMachine::new(scenario_config(), quiet());
        let before = machine.state();

        for _ in 0..10 {
            assert_eq!(machine.tick(now()), TickOutcome::Idle);
        }

        assert_eq!(machine.state(), before);
    }

    #[test]
    fn test_pause_stops_countdown() {
        let mut machine = PomodoroMachine::new(scenario_config(), quiet());
        machine.start();
        machine.tick(now());
        machine.pause();
        machine.tick(now());
        machine.tick(now());
        assert_eq!(machine.state().remaining_seconds, 1499);
    }

    #[test]
    fn test_tick_counts_down_without_effects() {
        let mut machine = PomodoroMachine::new(scenario_config(), quiet());
        machine.start();
        assert_eq!(
            machine.tick(now()),
            TickOutcome::Counted {
                remaining_seconds: 1499
            }
        );
    }

    #[test]
    fn test_transition_happens_on_tick_after_zero() {
        let config = TimerConfig::new(2, 1, 1, 2).unwrap();
        let mut machine = PomodoroMachine::new(config, quiet());
        machine.start();

        assert!(matches!(machine.tick(now()), TickOutcome::Counted { remaining_seconds: 1 }));
        assert!(matches!(machine.tick(now()), TickOutcome::Counted { remaining_seconds: 0 }));
        assert_eq!(machine.state().phase, Phase::Work);
        assert!(matches!(machine.tick(now()), TickOutcome::Transitioned(_)));
        assert_eq!(machine.state().phase, Phase::ShortBreak);
        assert!(machine.state().is_running);
    }

    #[test]
    fn test_scenario_fourth_break_is_long() {
        let mut machine = PomodoroMachine::new(scenario_config(), quiet());
        machine.start();

        let mut breaks = Vec::new();
        for _ in 0..4 {
            let work_end = run_phase(&mut machine);
            assert_eq!(work_end.ended, Phase::Work);
            breaks.push((work_end.next, work_end.duration_seconds));
            let break_end = run_phase(&mut machine);
            assert_eq!(break_end.next, Phase::Work);
        }

        assert_eq!(
            breaks,
            vec![
                (Phase::ShortBreak, 300),
                (Phase::ShortBreak, 300),
                (Phase::ShortBreak, 300),
                (Phase::LongBreak, 900),
            ]
        );
        assert_eq!(machine.state().completed_work_sessions, 4);
    }

    #[test]
    fn test_long_break_iff_multiple_of_interval() {
        for k in 2..=5_u32 {
            let config = TimerConfig::new(1, 1, 1, k).unwrap();
            let mut machine = PomodoroMachine::new(config, quiet());
            machine.start();

            for n in 1..=12_u32 {
                let work_end = run_phase(&mut machine);
                let expected = if n % k == 0 {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                };
                assert_eq!(work_end.next, expected, "n={n} k={k}");
                run_phase(&mut machine);
            }
        }
    }

    #[test]
    fn test_one_record_per_work_phase_none_for_breaks() {
        let config = TimerConfig::new(1, 1, 1, 2).unwrap();
        let mut machine = PomodoroMachine::new(config, quiet());
        machine.start();

        let mut records = 0;
        for _ in 0..6 {
            let t = run_phase(&mut machine);
            let count = t
                .effects
                .iter()
                .filter(|e| matches!(e, Effect::RecordSession(_)))
                .count();
            if t.ended == Phase::Work {
                assert_eq!(count, 1);
            } else {
                assert_eq!(count, 0);
            }
            records += count;
        }
        assert_eq!(records, 3);
    }

    #[test]
    fn test_work_record_contents() {
        let config = TimerConfig::new(1, 1, 1, 2).unwrap();
        let mut machine = PomodoroMachine::new(config, quiet());
        machine.start();

        let t = run_phase(&mut machine);
        assert!(t.effects.contains(&Effect::RecordSession(SessionRecord::new(
            SessionKind::Work,
            1,
            now()
        ))));
        assert!(t.effects.contains(&Effect::PersistCompleted(1)));
    }

    #[test]
    fn test_active_task_is_credited() {
        let config = TimerConfig::new(1, 1, 1, 2).unwrap();
        let mut machine = PomodoroMachine::new(config, quiet());
        machine.select_task(Some(42));
        machine.start();

        let work_end = run_phase(&mut machine);
        assert!(work_end.effects.contains(&Effect::CreditTask(42)));

        let break_end = run_phase(&mut machine);
        assert!(!break_end
            .effects
            .iter()
            .any(|e| matches!(e, Effect::CreditTask(_))));
    }

    #[test]
    fn test_break_end_refreshes_quote() {
        let config = TimerConfig::new(1, 1, 1, 2).unwrap();
        let mut machine = PomodoroMachine::new(config, quiet());
        machine.start();

        let work_end = run_phase(&mut machine);
        assert!(!work_end.effects.contains(&Effect::RefreshQuote));
        let break_end = run_phase(&mut machine);
        assert!(break_end.effects.contains(&Effect::RefreshQuote));
    }

    #[test]
    fn test_alert_effects_follow_preferences() {
        let config = TimerConfig::new(1, 1, 1, 2).unwrap();
        let mut machine = PomodoroMachine::new(config, AlertPreferences::default());
        machine.start();

        let t = run_phase(&mut machine);
        assert!(t.effects.contains(&Effect::PlayCue(SoundCue::Alarm)));
        assert!(t.effects.iter().any(|e| matches!(
            e,
            Effect::Notify { title, .. } if title == "Work session ended!"
        )));

        machine.set_alerts(AlertPreferences {
            sound_enabled: false,
            notifications_enabled: true,
            cue: SoundCue::Bell,
        });
        let t = run_phase(&mut machine);
        assert!(!t
            .effects
            .iter()
            .any(|e| matches!(e, Effect::PlayCue(_) | Effect::Notify { .. })));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let config = TimerConfig::new(1, 1, 1, 2).unwrap();
        let mut machine = PomodoroMachine::new(config, quiet());
        machine.select_task(Some(1));
        machine.start();
        run_phase(&mut machine);
        machine.tick(now());

        machine.reset();
        let once = machine.state();
        machine.reset();
        let twice = machine.state();

        assert_eq!(once, twice);
        assert_eq!(once, TimerState::initial(&config));
        assert!(machine.active_task().is_none());
    }

    #[test]
    fn test_apply_settings_idle_work_resets_remaining() {
        let mut machine = PomodoroMachine::new(scenario_config(), quiet());
        assert_eq!(machine.state().remaining_seconds, 1500);

        machine.apply_settings(TimerConfig::new(600, 300, 900, 4).unwrap());

        assert_eq!(machine.state().remaining_seconds, 600);
    }

    #[test]
    fn test_apply_settings_during_break_only_affects_future_work() {
        let config = TimerConfig::new(3, 300, 900, 4).unwrap();
        let mut machine = PomodoroMachine::new(config, quiet());
        machine.start();
        run_phase(&mut machine);
        assert_eq!(machine.state().phase, Phase::ShortBreak);
        machine.tick(now());
        assert_eq!(machine.state().remaining_seconds, 299);

        machine.apply_settings(TimerConfig::new(600, 300, 900, 4).unwrap());
        assert_eq!(machine.state().remaining_seconds, 299);

        let t = run_phase(&mut machine);
        assert_eq!(t.next, Phase::Work);
        assert_eq!(t.duration_seconds, 600);
        assert_eq!(machine.state().remaining_seconds, 600);
    }

    #[test]
    fn test_apply_settings_clamps_to_shorter_phase() {
        let mut machine = PomodoroMachine::new(scenario_config(), quiet());
        machine.start();
        machine.tick(now());

        machine.apply_settings(TimerConfig::new(600, 300, 900, 4).unwrap());
        assert_eq!(machine.state().remaining_seconds, 600);
    }

    #[test]
    fn test_interval_change_applies_at_next_check() {
        let config = TimerConfig::new(1, 1, 1, 4).unwrap();
        let mut machine = PomodoroMachine::new(config, quiet());
        machine.start();

        for _ in 0..2 {
            run_phase(&mut machine);
            run_phase(&mut machine);
        }
        assert_eq!(machine.state().cycles_since_long_break, 2);

        machine.apply_settings(TimerConfig::new(1, 1, 1, 3).unwrap());
        assert_eq!(machine.state().cycles_since_long_break, 2);

        let t = run_phase(&mut machine);
        assert_eq!(t.next, Phase::LongBreak);
    }

    #[test]
    fn test_skip_counts_as_completion() {
        let mut machine = PomodoroMachine::new(scenario_config(), quiet());
        let t = machine.skip(now());
        assert_eq!(t.ended, Phase::Work);
        assert_eq!(t.next, Phase::ShortBreak);
        assert_eq!(machine.state().completed_work_sessions, 1);
        assert!(!machine.state().is_running);
    }

    #[test]
    fn test_skip_while_running_matches_natural_completion() {
        let config = TimerConfig::new(3, 2, 4, 2).unwrap();
        let mut natural = PomodoroMachine::new(config, quiet());
        natural.select_task(Some(7));
        natural.start();
        let mut ended = None;
        for _ in 0..4 {
            if let TickOutcome::Transitioned(t) = natural.tick(now()) {
                ended = Some(t);
            }
        }
        let ended = ended.unwrap();

        let mut skipped = PomodoroMachine::new(config, quiet());
        skipped.select_task(Some(7));
        skipped.start();
        skipped.tick(now());
        let t = skipped.skip(now());

        assert_eq!(t.next, ended.next);
        assert_eq!(t.duration_seconds, 2);
        assert_eq!(t.effects, ended.effects);
        assert_eq!(skipped.state(), natural.state());
        assert!(skipped.state().is_running);
    }

    #[test]
    fn test_skip_break_returns_to_work() {
        let mut machine = PomodoroMachine::new(scenario_config(), quiet());
        machine.skip(now());
        let t = machine.skip(now());
        assert_eq!(t.ended, Phase::ShortBreak);
        assert_eq!(t.next, Phase::Work);
        assert!(t.effects.contains(&Effect::RefreshQuote));
        assert_eq!(machine.state().remaining_seconds, scenario_config().work_seconds());
        assert_eq!(machine.state().completed_work_sessions, 1);
    }

    #[test]
    fn test_restore_keeps_counter_only() {
        let machine = PomodoroMachine::restore(scenario_config(), quiet(), 9);
        assert_eq!(machine.state().completed_work_sessions, 9);
        assert_eq!(machine.state().cycles_since_long_break, 0);
        assert_eq!(machine.state().phase, Phase::Work);
    }

    #[test]
    fn test_remaining_never_exceeds_phase_duration() {
        let config = TimerConfig::new(3, 2, 4, 2).unwrap();
        let mut machine = PomodoroMachine::new(config, quiet());
        machine.start();

        for _ in 0..100 {
            machine.tick(now());
            let state = machine.state();
            assert!(state.remaining_seconds <= machine.config().duration_of(state.phase));
        }
    }
}
