//! Goals with milestones and target dates.

pub mod storage;
pub mod types;

pub use storage::GoalStorage;
pub use types::{Goal, GoalFilter, Milestone, NewGoal, Urgency};
