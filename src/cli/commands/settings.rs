//! Settings command implementation.
//!
//! Edits go through the timer controller so they are validated and
//! persisted exactly as the interactive screen does it.

use super::Context;
use crate::cli::args::{OutputFormat, SettingsCommands};
use crate::error::FocusdeckError;
use crate::features::pomodoro::{SettingsUpdate, SilentAudio, SilentNotifier, SoundCue};
use crate::output::format_timer_settings;

/// Execute settings subcommands.
///
/// # Errors
///
/// Returns `InvalidSettings` for rejected durations, `InvalidInput` when
/// nothing was given to change, or an error if formatting fails.
pub fn settings(
    ctx: &Context,
    cmd: SettingsCommands,
    format: OutputFormat,
) -> Result<String, FocusdeckError> {
    let mut controller = ctx.controller(Box::new(SilentNotifier), Box::new(SilentAudio));

    match cmd {
        SettingsCommands::Show => {}
        SettingsCommands::Set {
            work,
            short_break,
            long_break,
            interval,
        } => {
            let update = SettingsUpdate {
                work_seconds: work.map(minutes_to_seconds),
                short_break_seconds: short_break.map(minutes_to_seconds),
                long_break_seconds: long_break.map(minutes_to_seconds),
                long_break_interval: interval,
            };
            if update.is_empty() {
                return Err(FocusdeckError::InvalidInput(
                    "Nothing to change; pass --work, --short-break, --long-break or --interval"
                        .to_string(),
                ));
            }
            controller.apply_settings(update)?;
        }
        SettingsCommands::Alerts {
            sound,
            notifications,
            cue,
        } => {
            if sound.is_none() && notifications.is_none() && cue.is_none() {
                return Err(FocusdeckError::InvalidInput(
                    "Nothing to change; pass --sound, --notifications or --cue".to_string(),
                ));
            }
            let mut alerts = controller.alerts().clone();
            if let Some(sound) = sound {
                alerts.sound_enabled = sound.into();
            }
            if let Some(notifications) = notifications {
                alerts.notifications_enabled = notifications.into();
            }
            if let Some(cue) = cue {
                alerts.cue = SoundCue::parse(&cue);
            }
            controller.set_alerts(alerts);
        }
    }

    let snapshot = controller.snapshot();
    format_timer_settings(
        &snapshot.config,
        controller.alerts(),
        snapshot.state.completed_work_sessions,
        format,
    )
}

const fn minutes_to_seconds(minutes: u32) -> u32 {
    minutes.saturating_mul(60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_to_seconds() {
        assert_eq!(minutes_to_seconds(25), 1500);
        assert_eq!(minutes_to_seconds(0), 0);
        assert_eq!(minutes_to_seconds(u32::MAX), u32::MAX);
    }
}
