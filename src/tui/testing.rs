//! Shared fixtures for the TUI tests.

use std::rc::Rc;
use std::time::Instant;

use crate::features::pomodoro::{
    AlertPreferences, Collaborators, PomodoroController, SessionStorage, SilentAudio,
    SilentNotifier, TimerConfig,
};
use crate::features::tasks::{NewTask, TaskStorage};
use crate::storage::{Database, KeyValueStore};
use crate::tui::app::App;

/// A paused app over an in-memory database holding tasks "a" and "b".
pub fn app() -> App {
    let db = Rc::new(Database::open_in_memory().unwrap());
    let tasks = TaskStorage::new(Rc::clone(&db));
    tasks.create(NewTask::titled("a")).unwrap();
    tasks.create(NewTask::titled("b")).unwrap();

    let controller = PomodoroController::load(
        TimerConfig::default(),
        AlertPreferences::default(),
        Collaborators {
            settings: Box::new(KeyValueStore::new(Rc::clone(&db))),
            session_log: Box::new(SessionStorage::new(Rc::clone(&db))),
            tasks: Box::new(TaskStorage::new(Rc::clone(&db))),
            notifier: Box::new(SilentNotifier),
            audio: Box::new(SilentAudio),
        },
    );
    App::new(controller, tasks, None, false, Instant::now()).unwrap()
}
