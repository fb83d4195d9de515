//! Pomodoro command implementation.

use colored::Colorize;

use super::Context;
use crate::cli::args::{OutputFormat, PomodoroCommands};
use crate::error::FocusdeckError;
use crate::features::pomodoro::{SessionStorage, SilentAudio, SilentNotifier};
use crate::features::tasks::TaskStorage;
use crate::output::{format_sessions, format_timer_settings, to_json};
use crate::tui;

/// Execute pomodoro subcommands.
///
/// # Errors
///
/// Returns an error if storage access, terminal setup or formatting fails.
pub fn pomodoro(
    ctx: &Context,
    cmd: PomodoroCommands,
    format: OutputFormat,
) -> Result<String, FocusdeckError> {
    match cmd {
        PomodoroCommands::Run { task, start } => {
            if let Some(id) = task {
                TaskStorage::new(ctx.db.clone()).require(id)?;
            }
            tui::run(ctx, task, start)?;
            Ok(String::new())
        }
        PomodoroCommands::Status => {
            let controller = ctx.controller(Box::new(SilentNotifier), Box::new(SilentAudio));
            let snapshot = controller.snapshot();
            format_timer_settings(
                &snapshot.config,
                controller.alerts(),
                snapshot.state.completed_work_sessions,
                format,
            )
        }
        PomodoroCommands::Reset => {
            let mut controller = ctx.controller(Box::new(SilentNotifier), Box::new(SilentAudio));
            controller.reset();
            match format {
                OutputFormat::Json => to_json(&controller.snapshot()),
                OutputFormat::Pretty => Ok(format!(
                    "{} Completed work sessions reset to 0",
                    "✓".green()
                )),
            }
        }
        PomodoroCommands::History { limit } => {
            let sessions = SessionStorage::new(ctx.db.clone()).recent(limit)?;
            format_sessions(&sessions, format)
        }
    }
}
