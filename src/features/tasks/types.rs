//! Task types, filters and sort orders.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FocusdeckError;

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// All priorities, highest first.
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Numeric weight, higher sorts first.
    #[must_use]
    pub const fn weight(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
        }
    }
}

impl FromStr for Priority {
    type Err = FocusdeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "h" => Ok(Self::High),
            "medium" | "med" | "m" => Ok(Self::Medium),
            "low" | "l" => Ok(Self::Low),
            other => Err(FocusdeckError::InvalidInput(format!(
                "Unknown priority: {other} (expected high, medium or low)"
            ))),
        }
    }
}

/// Which tasks to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl TaskFilter {
    /// Check whether a task passes the filter.
    #[must_use]
    pub const fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

/// Task list ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskSort {
    /// High priority first
    #[default]
    Priority,
    /// Earliest deadline first, tasks without one last
    Deadline,
    /// Most focus sessions first
    Sessions,
}

impl TaskSort {
    /// Compare two tasks under this ordering.
    #[must_use]
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::Priority => b.priority.weight().cmp(&a.priority.weight()),
            Self::Deadline => match (a.deadline, b.deadline) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            Self::Sessions => b.sessions.cmp(&a.sessions),
        }
    }

    /// Sort tasks in place. Ties keep their insertion order.
    pub fn sort(self, tasks: &mut [Task]) {
        tasks.sort_by(|a, b| self.compare(a, b));
    }
}

/// A task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub priority: Priority,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub playlist_url: Option<String>,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    /// Completed focus sessions credited to this task
    pub sessions: u32,
    pub completed: bool,
}

impl Task {
    /// Check if the deadline has passed on `today` and the task is still open.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.deadline.is_some_and(|d| d < today)
    }
}

/// Fields for a new task.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub category: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub playlist_url: Option<String>,
}

impl NewTask {
    /// A task with just a title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// A partial edit. `None` keeps the current value.
///
/// Optional columns use `Some(None)` to clear.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub category: Option<Option<String>>,
    pub deadline: Option<Option<NaiveDate>>,
    pub playlist_url: Option<Option<String>>,
}

impl TaskUpdate {
    /// Whether the update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.category.is_none()
            && self.deadline.is_none()
            && self.playlist_url.is_none()
    }

    /// Apply to a task in memory.
    pub fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(category) = self.category {
            task.category = category;
        }
        if let Some(deadline) = self.deadline {
            task.deadline = deadline;
        }
        if let Some(playlist_url) = self.playlist_url {
            task.playlist_url = playlist_url;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, priority: Priority, deadline: Option<&str>, sessions: u32) -> Task {
        Task {
            id,
            title: format!("Task {id}"),
            description: None,
            priority,
            category: None,
            deadline: deadline.map(|d| d.parse().unwrap()),
            playlist_url: None,
            created: Utc::now(),
            updated: None,
            sessions,
            completed: false,
        }
    }

    fn ids(tasks: &[Task]) -> Vec<i64> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!("High".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("m".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!(" low ".parse::<Priority>().unwrap(), Priority::Low);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_priority_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
    }

    #[test]
    fn test_sort_by_priority() {
        let mut tasks = vec![
            task(1, Priority::Low, None, 0),
            task(2, Priority::High, None, 0),
            task(3, Priority::Medium, None, 0),
            task(4, Priority::High, None, 0),
        ];
        TaskSort::Priority.sort(&mut tasks);
        assert_eq!(ids(&tasks), vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_sort_by_deadline_missing_last() {
        let mut tasks = vec![
            task(1, Priority::Medium, None, 0),
            task(2, Priority::Medium, Some("2024-05-01"), 0),
            task(3, Priority::Medium, Some("2024-04-01"), 0),
        ];
        TaskSort::Deadline.sort(&mut tasks);
        assert_eq!(ids(&tasks), vec![3, 2, 1]);
    }

    #[test]
    fn test_sort_by_sessions_desc() {
        let mut tasks = vec![
            task(1, Priority::Medium, None, 2),
            task(2, Priority::Medium, None, 7),
            task(3, Priority::Medium, None, 0),
        ];
        TaskSort::Sessions.sort(&mut tasks);
        assert_eq!(ids(&tasks), vec![2, 1, 3]);
    }

    #[test]
    fn test_filter() {
        let mut done = task(1, Priority::Medium, None, 0);
        done.completed = true;
        let open = task(2, Priority::Medium, None, 0);

        assert!(TaskFilter::All.matches(&done));
        assert!(TaskFilter::Completed.matches(&done));
        assert!(!TaskFilter::Pending.matches(&done));
        assert!(TaskFilter::Pending.matches(&open));
    }

    #[test]
    fn test_overdue() {
        let today: NaiveDate = "2024-05-02".parse().unwrap();
        let mut t = task(1, Priority::Medium, Some("2024-05-01"), 0);
        assert!(t.is_overdue(today));
        t.completed = true;
        assert!(!t.is_overdue(today));
        assert!(!task(2, Priority::Low, None, 0).is_overdue(today));
    }

    #[test]
    fn test_update_apply_and_clear() {
        let mut t = task(1, Priority::Low, Some("2024-05-01"), 0);
        let update = TaskUpdate {
            title: Some("Renamed".to_string()),
            priority: Some(Priority::High),
            deadline: Some(None),
            ..TaskUpdate::default()
        };
        assert!(!update.is_empty());
        update.apply(&mut t);

        assert_eq!(t.title, "Renamed");
        assert_eq!(t.priority, Priority::High);
        assert!(t.deadline.is_none());
    }
}
