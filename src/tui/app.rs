//! Application state for the timer screen.

use std::time::{Duration, Instant};

use chrono::Utc;

use crate::error::FocusdeckError;
use crate::features::pomodoro::{PomodoroController, TickOutcome, Ticker, TimerSnapshot};
use crate::features::tasks::{Task, TaskFilter, TaskSort, TaskStorage};

/// Poll timeout while the timer is paused.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Application state.
pub struct App {
    controller: PomodoroController,
    storage: TaskStorage,
    ticker: Ticker,
    /// Pending tasks, highest priority first.
    pub tasks: Vec<Task>,
    /// Currently selected index.
    pub selected: usize,
    /// Status message to display.
    pub status: Option<String>,
    /// Pending 'g' key for 'gg' command.
    pub pending_g: bool,
}

impl App {
    /// Create the app, optionally attaching a task and starting right away.
    ///
    /// # Errors
    ///
    /// Returns an error if loading tasks fails.
    pub fn new(
        mut controller: PomodoroController,
        storage: TaskStorage,
        task: Option<i64>,
        start: bool,
        now: Instant,
    ) -> Result<Self, FocusdeckError> {
        controller.select_task(task);

        let mut app = Self {
            controller,
            storage,
            ticker: Ticker::every_second(),
            tasks: Vec::new(),
            selected: 0,
            status: Some("Press ? for help".to_string()),
            pending_g: false,
        };
        app.refresh()?;

        if let Some(index) = task.and_then(|id| app.tasks.iter().position(|t| t.id == id)) {
            app.selected = index;
        }
        if start {
            app.toggle(now);
        }

        Ok(app)
    }

    /// Reload pending tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn refresh(&mut self) -> Result<(), FocusdeckError> {
        self.tasks = self.storage.list(TaskFilter::Pending, TaskSort::Priority)?;

        if self.tasks.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.tasks.len() {
            self.selected = self.tasks.len() - 1;
        }
        Ok(())
    }

    /// Current timer view.
    #[must_use]
    pub const fn snapshot(&self) -> TimerSnapshot {
        self.controller.snapshot()
    }

    /// Title of the task credited for work sessions, if any.
    #[must_use]
    pub fn active_task_title(&self) -> Option<&str> {
        let id = self.controller.snapshot().active_task?;
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.title.as_str())
    }

    /// How long the event loop may block before the next tick is due.
    #[must_use]
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.ticker
            .until_next(now)
            .map_or(IDLE_POLL, |d| d.min(IDLE_POLL))
    }

    /// Start or pause the countdown.
    pub fn toggle(&mut self, now: Instant) {
        if self.controller.toggle() {
            self.ticker.resume(now);
            self.status = Some("Running".to_string());
        } else {
            self.ticker.halt();
            self.status = Some("Paused".to_string());
        }
    }

    /// Back to a fresh, paused work phase.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.ticker.halt();
        self.status = Some("Reset".to_string());
    }

    /// End the current phase now.
    pub fn skip(&mut self) {
        let transition = self.controller.skip(Utc::now());
        self.status = Some(format!(
            "Skipped {}. {} is next",
            transition.ended, transition.next
        ));
        self.refresh_after_transition();
    }

    /// Run every tick that has come due since the last call.
    pub fn on_tick(&mut self, now: Instant) {
        let mut transitioned = false;

        for _ in 0..self.ticker.due(now) {
            if let TickOutcome::Transitioned(transition) = self.controller.tick(Utc::now()) {
                self.status = Some(format!(
                    "{} session ended. {} started",
                    transition.ended, transition.next
                ));
                transitioned = true;
            }
        }

        if transitioned {
            self.refresh_after_transition();
        }
    }

    // The timer keeps going with the old list if the reload fails.
    fn refresh_after_transition(&mut self) {
        if let Err(e) = self.refresh() {
            tracing::warn!(error = %e, "failed to reload tasks");
            self.status = Some(format!("Could not reload tasks: {e}"));
        }
    }

    /// Attach the selected task, or detach it if it is already attached.
    pub fn attach_selected(&mut self) {
        let Some(task) = self.tasks.get(self.selected) else {
            self.status = Some("No pending tasks".to_string());
            return;
        };

        if self.controller.snapshot().active_task == Some(task.id) {
            self.status = Some(format!("Detached: {}", task.title));
            self.controller.select_task(None);
        } else {
            self.status = Some(format!("Working on: {}", task.title));
            self.controller.select_task(Some(task.id));
        }
    }

    /// Move selection up.
    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
        self.pending_g = false;
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        if !self.tasks.is_empty() && self.selected < self.tasks.len() - 1 {
            self.selected += 1;
        }
        self.pending_g = false;
    }

    /// Jump to first item.
    pub fn select_first(&mut self) {
        self.selected = 0;
        self.pending_g = false;
    }

    /// Jump to last item.
    pub fn select_last(&mut self) {
        if !self.tasks.is_empty() {
            self.selected = self.tasks.len() - 1;
        }
        self.pending_g = false;
    }

    /// Handle 'g' key for 'gg' command.
    pub fn handle_g(&mut self) {
        if self.pending_g {
            self.select_first();
        } else {
            self.pending_g = true;
            self.status = Some("g-".to_string());
        }
    }

    /// Cancel pending 'g' command.
    pub fn cancel_pending(&mut self) {
        self.pending_g = false;
    }
}
