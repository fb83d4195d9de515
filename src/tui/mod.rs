//! Terminal User Interface (TUI) for the Pomodoro timer.
//!
//! Shows the countdown, the current quote and the pending task list.
//! Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

#[cfg(test)]
mod testing;

pub use app::App;

use std::io;
use std::time::Instant;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::cli::commands::Context;
use crate::error::FocusdeckError;
use crate::features::pomodoro::{DesktopNotifier, SystemAudio};
use crate::features::tasks::TaskStorage;

/// Run the timer screen.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(ctx: &Context, task: Option<i64>, start: bool) -> Result<(), FocusdeckError> {
    let controller = ctx.controller(Box::new(DesktopNotifier), Box::new(SystemAudio));
    let mut app = App::new(
        controller,
        TaskStorage::new(ctx.db.clone()),
        task,
        start,
        Instant::now(),
    )?;

    enable_raw_mode()
        .map_err(|e| FocusdeckError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| FocusdeckError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| FocusdeckError::Terminal(format!("Failed to create terminal: {e}")))?;

    tracing::info!(?task, "timer screen opened");
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), FocusdeckError> {
    loop {
        app.on_tick(Instant::now());

        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| FocusdeckError::Terminal(format!("Failed to draw: {e}")))?;

        let timeout = app.poll_timeout(Instant::now());
        if let Some(action) = event::handle_events(app, timeout)? {
            match action {
                event::Action::Quit => break,
                event::Action::Toggle => app.toggle(Instant::now()),
                event::Action::Skip => app.skip(),
                event::Action::Reset => app.reset(),
                event::Action::Attach => app.attach_selected(),
            }
        }
    }

    Ok(())
}
