//! Pomodoro session timer.
//!
//! - `machine`: pure work/break state machine emitting effects
//! - `controller`: owns the machine and carries effects out
//! - `ports`: collaborator traits (settings, session log, tasks, alerts)
//! - `storage` / `sinks`: concrete collaborators
//! - `ticker`: fixed-period tick source for interactive loops

pub mod config;
pub mod controller;
pub mod machine;
pub mod phase;
pub mod ports;
pub mod quotes;
pub mod record;
pub mod sinks;
pub mod storage;
pub mod ticker;

pub use config::{SettingsUpdate, TimerConfig, MIN_LONG_BREAK_INTERVAL};
pub use controller::{
    Collaborators, PomodoroController, TimerSnapshot, ALERTS_KEY, COMPLETED_KEY, TIMER_CONFIG_KEY,
};
pub use machine::{Effect, PhaseTransition, PomodoroMachine, TickOutcome, TimerState};
pub use phase::{AlertPreferences, Phase, SessionKind, SoundCue};
pub use ports::{AudioSink, Notifier, SessionLog, SettingsStore, TaskRegistry};
pub use quotes::{QuoteBag, MOTIVATIONAL_QUOTES};
pub use record::SessionRecord;
pub use sinks::{DesktopNotifier, SilentAudio, SilentNotifier, SystemAudio};
pub use storage::SessionStorage;
pub use ticker::Ticker;
