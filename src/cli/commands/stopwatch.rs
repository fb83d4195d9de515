//! Stopwatch command implementation.
//!
//! Reads single key presses in raw mode and redraws one status line.

use std::io::Write;
use std::time::{Duration, Instant};

use colored::Colorize;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use crate::cli::args::{OutputFormat, StopwatchArgs};
use crate::error::FocusdeckError;
use crate::features::countdown::Stopwatch;
use crate::features::pomodoro::Ticker;
use crate::output::to_json;

/// Poll timeout while stopped.
const IDLE_POLL: Duration = Duration::from_millis(250);

const KEYS: &str = "space:start/stop | r:reset | q:done";

/// Run a stopwatch until the user finishes it.
///
/// # Errors
///
/// Returns `Terminal` if raw mode or key input fails, or an I/O error if the
/// terminal cannot be written.
pub fn stopwatch(args: &StopwatchArgs, format: OutputFormat) -> Result<String, FocusdeckError> {
    let mut watch = Stopwatch::new();
    let mut ticker = Ticker::every_second();

    if format == OutputFormat::Pretty {
        println!("{}  {}", "Stopwatch".bold(), KEYS.dimmed());
    }

    enable_raw_mode()
        .map_err(|e| FocusdeckError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    if !args.paused {
        watch.start();
        ticker.resume(Instant::now());
    }
    let result = run_loop(&mut watch, &mut ticker, format);
    disable_raw_mode().ok();
    result?;

    tracing::info!(seconds = watch.elapsed_seconds(), "stopwatch finished");

    match format {
        OutputFormat::Json => to_json(&serde_json::json!({
            "elapsed_seconds": watch.elapsed_seconds(),
        })),
        OutputFormat::Pretty => Ok(format!(
            "\r  {} Elapsed {}{}",
            "✓".green(),
            watch.format_elapsed().bold(),
            " ".repeat(20)
        )),
    }
}

fn run_loop(
    watch: &mut Stopwatch,
    ticker: &mut Ticker,
    format: OutputFormat,
) -> Result<(), FocusdeckError> {
    let mut stdout = std::io::stdout();

    loop {
        advance(watch, ticker, Instant::now());

        if format == OutputFormat::Pretty {
            let state = if watch.is_running() {
                "running".green()
            } else {
                "stopped".yellow()
            };
            write!(stdout, "\r  {}  {}   ", watch.format_elapsed().cyan().bold(), state)?;
            stdout.flush()?;
        }

        let timeout = ticker
            .until_next(Instant::now())
            .map_or(IDLE_POLL, |d| d.min(IDLE_POLL));
        if !event::poll(timeout)
            .map_err(|e| FocusdeckError::Terminal(format!("Event poll failed: {e}")))?
        {
            continue;
        }

        if let Event::Key(key) =
            event::read().map_err(|e| FocusdeckError::Terminal(format!("Event read failed: {e}")))?
        {
            if key.kind == KeyEventKind::Press {
                let now = Instant::now();
                advance(watch, ticker, now);
                if handle_key(watch, ticker, key, now) {
                    return Ok(());
                }
            }
        }
    }
}

/// Count every second the ticker has due.
fn advance(watch: &mut Stopwatch, ticker: &mut Ticker, now: Instant) {
    for _ in 0..ticker.due(now) {
        watch.tick();
    }
}

/// Apply a key press. Returns true when the user is done.
fn handle_key(watch: &mut Stopwatch, ticker: &mut Ticker, key: KeyEvent, now: Instant) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => true,
        KeyCode::Char(' ' | 'p') => {
            if watch.toggle() {
                ticker.resume(now);
            } else {
                ticker.halt();
            }
            false
        }
        KeyCode::Char('r') => {
            watch.reset();
            ticker.halt();
            false
        }
        _ => false,
    }
}
