//! focusdeck - a terminal Pomodoro timer and study planner
//!
//! This crate provides the timer state machine and its persistence, plus
//! tasks, goals, notes and focus statistics backed by a local `SQLite`
//! database, with a command-line and terminal UI front end.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::FocusdeckError;
