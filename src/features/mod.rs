//! Feature implementations for focusdeck.
//!
//! - Pomodoro timer state machine, controller and session log
//! - Tasks with priorities, deadlines and session counts
//! - Goals with milestones
//! - Tagged notes
//! - Focus statistics and the month agenda
//! - Standalone countdown and stopwatch

pub mod countdown;
pub mod goals;
pub mod notes;
pub mod pomodoro;
pub mod stats;
pub mod tasks;
