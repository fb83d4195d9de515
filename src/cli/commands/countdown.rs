//! Countdown command implementation.
//!
//! Redraws a single status line once per second until the countdown ends.

use std::io::Write;
use std::thread;
use std::time::Instant;

use colored::Colorize;

use super::Context;
use crate::cli::args::{CountdownArgs, OutputFormat};
use crate::error::FocusdeckError;
use crate::features::countdown::{
    format_clock, format_duration, parse_duration, render_progress_bar, Countdown,
};
use crate::features::pomodoro::{
    AlertPreferences, AudioSink, DesktopNotifier, Notifier, SystemAudio, Ticker,
};
use crate::output::to_json;

/// Build the countdown described by the arguments.
///
/// # Errors
///
/// Returns `InvalidInput` for an unparsable or out-of-range duration.
fn countdown_from_args(args: &CountdownArgs) -> Result<Countdown, FocusdeckError> {
    match &args.duration {
        Some(s) => {
            let duration = parse_duration(s)
                .ok_or_else(|| FocusdeckError::InvalidInput(format!("Invalid duration '{s}'")))?;
            Countdown::from_duration(duration)
        }
        None => Countdown::from_hms(
            args.hours.unwrap_or(0),
            args.minutes.unwrap_or(0),
            args.seconds.unwrap_or(0),
        ),
    }
}

/// Run a countdown in the foreground.
///
/// # Errors
///
/// Returns `InvalidInput` for a bad duration, or an I/O error if the
/// terminal cannot be written.
pub fn countdown(
    ctx: &Context,
    args: &CountdownArgs,
    format: OutputFormat,
) -> Result<String, FocusdeckError> {
    let mut timer = countdown_from_args(args)?;
    let total = chrono::Duration::seconds(i64::from(timer.total_seconds()));

    tracing::info!(seconds = timer.total_seconds(), "countdown started");
    let mut ticker = Ticker::every_second();
    timer.start();
    ticker.resume(Instant::now());

    let mut stdout = std::io::stdout();
    if format == OutputFormat::Pretty {
        println!("{} {}", "Countdown:".bold(), format_duration(total));
    }

    loop {
        if format == OutputFormat::Pretty {
            write!(
                stdout,
                "\r  {} {}  ",
                render_progress_bar(timer.progress(), 30),
                format_clock(timer.remaining_seconds()).cyan().bold()
            )?;
            stdout.flush()?;
        }
        if let Some(wait) = ticker.until_next(Instant::now()) {
            thread::sleep(wait);
        }
        if advance(&mut timer, &mut ticker, Instant::now()) {
            break;
        }
    }

    if !args.quiet {
        alert(
            &ctx.alert_preferences(),
            &SystemAudio,
            &DesktopNotifier,
            &format_duration(total),
        );
    }
    tracing::info!("countdown finished");

    match format {
        OutputFormat::Json => to_json(&serde_json::json!({
            "completed": timer.is_completed(),
            "total_seconds": timer.total_seconds(),
        })),
        OutputFormat::Pretty => Ok(format!("\r  {} Time's up!{}", "✓".green(), " ".repeat(30))),
    }
}

/// Apply every tick the ticker has due. Returns true once the countdown completes.
fn advance(timer: &mut Countdown, ticker: &mut Ticker, now: Instant) -> bool {
    for _ in 0..ticker.due(now) {
        if timer.tick() {
            ticker.halt();
            return true;
        }
    }
    timer.is_completed()
}

fn alert(prefs: &AlertPreferences, audio: &dyn AudioSink, notifier: &dyn Notifier, elapsed: &str) {
    if prefs.sound_enabled {
        if let Err(e) = audio.play(&prefs.cue) {
            tracing::warn!(error = %e, "countdown cue failed");
        }
    }
    if prefs.should_notify() {
        if let Err(e) = notifier.notify("Time's up!", &format!("{elapsed} countdown finished")) {
            tracing::warn!(error = %e, "countdown notification failed");
        }
    }
}
