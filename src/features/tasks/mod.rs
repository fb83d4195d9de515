//! Task list with per-task focus session counters.

pub mod storage;
pub mod types;

pub use storage::TaskStorage;
pub use types::{NewTask, Priority, Task, TaskFilter, TaskSort, TaskUpdate};
