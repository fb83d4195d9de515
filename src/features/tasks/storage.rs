//! Task storage.

use std::rc::Rc;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, OptionalExtension, Row};

use super::types::{NewTask, Priority, Task, TaskFilter, TaskSort, TaskUpdate};
use crate::error::FocusdeckError;
use crate::features::pomodoro::TaskRegistry;
use crate::storage::Database;

const SELECT_COLUMNS: &str = "SELECT id, title, description, priority, category, deadline, \
     playlist_url, created, updated, sessions, completed FROM tasks";

/// Storage for tasks.
pub struct TaskStorage {
    db: Rc<Database>,
}

impl TaskStorage {
    /// Create storage over a shared database handle.
    #[must_use]
    pub const fn new(db: Rc<Database>) -> Self {
        Self { db }
    }

    /// Create a task.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty title, or a database error.
    pub fn create(&self, new: NewTask) -> Result<Task, FocusdeckError> {
        let title = new.title.trim();
        if title.is_empty() {
            return Err(FocusdeckError::InvalidInput(
                "Task title cannot be empty".to_string(),
            ));
        }

        let created = Utc::now();
        let conn = self.db.connection();
        conn.execute(
            "INSERT INTO tasks (title, description, priority, category, deadline, playlist_url, created)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                title,
                new.description,
                new.priority.as_str(),
                new.category,
                new.deadline.map(|d| d.to_string()),
                new.playlist_url,
                created.to_rfc3339(),
            ],
        )
        .map_err(|e| FocusdeckError::db("Failed to create task", &e))?;

        let id = conn.last_insert_rowid();
        tracing::debug!(id, title, "task created");
        self.require(id)
    }

    /// Get a task by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get(&self, id: i64) -> Result<Option<Task>, FocusdeckError> {
        self.db
            .connection()
            .query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), [id], row_to_task)
            .optional()
            .map_err(|e| FocusdeckError::db("Failed to query task", &e))
    }

    /// Get a task by ID, failing with `NotFound` when absent.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub fn require(&self, id: i64) -> Result<Task, FocusdeckError> {
        self.get(id)?
            .ok_or_else(|| FocusdeckError::NotFound(format!("task {id}")))
    }

    /// List tasks matching a filter, in the given order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list(&self, filter: TaskFilter, sort: TaskSort) -> Result<Vec<Task>, FocusdeckError> {
        let mut tasks: Vec<Task> = self
            .query(&format!("{SELECT_COLUMNS} ORDER BY id"), [])?
            .into_iter()
            .filter(|t| filter.matches(t))
            .collect();
        sort.sort(&mut tasks);
        Ok(tasks)
    }

    /// Tasks with a deadline in `[start, end]`, earliest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn with_deadline_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Task>, FocusdeckError> {
        self.query(
            &format!(
                "{SELECT_COLUMNS} WHERE deadline IS NOT NULL AND deadline >= ?1 AND deadline <= ?2 ORDER BY deadline, id"
            ),
            params![start.to_string(), end.to_string()],
        )
    }

    /// Apply a partial edit.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `InvalidInput` for an empty title, or a database error.
    pub fn update(&self, id: i64, update: TaskUpdate) -> Result<Task, FocusdeckError> {
        let mut task = self.require(id)?;
        if update.is_empty() {
            return Ok(task);
        }
        if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(FocusdeckError::InvalidInput(
                "Task title cannot be empty".to_string(),
            ));
        }

        update.apply(&mut task);
        task.updated = Some(Utc::now());

        self.db
            .connection()
            .execute(
                "UPDATE tasks SET title = ?1, description = ?2, priority = ?3, category = ?4,
                 deadline = ?5, playlist_url = ?6, updated = ?7 WHERE id = ?8",
                params![
                    task.title.trim(),
                    task.description,
                    task.priority.as_str(),
                    task.category,
                    task.deadline.map(|d| d.to_string()),
                    task.playlist_url,
                    task.updated.map(|t| t.to_rfc3339()),
                    id,
                ],
            )
            .map_err(|e| FocusdeckError::db("Failed to update task", &e))?;

        self.require(id)
    }

    /// Flip the completed flag.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub fn toggle_complete(&self, id: i64) -> Result<Task, FocusdeckError> {
        let changed = self
            .db
            .connection()
            .execute(
                "UPDATE tasks SET completed = NOT completed, updated = ?1 WHERE id = ?2",
                params![Utc::now().to_rfc3339(), id],
            )
            .map_err(|e| FocusdeckError::db("Failed to toggle task", &e))?;

        if changed == 0 {
            return Err(FocusdeckError::NotFound(format!("task {id}")));
        }
        self.require(id)
    }

    /// Delete a task.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub fn delete(&self, id: i64) -> Result<(), FocusdeckError> {
        let changed = self
            .db
            .connection()
            .execute("DELETE FROM tasks WHERE id = ?1", [id])
            .map_err(|e| FocusdeckError::db("Failed to delete task", &e))?;

        if changed == 0 {
            return Err(FocusdeckError::NotFound(format!("task {id}")));
        }
        tracing::debug!(id, "task deleted");
        Ok(())
    }

    /// Count tasks per priority, highest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_by_priority(&self) -> Result<Vec<(Priority, u32)>, FocusdeckError> {
        let tasks = self.list(TaskFilter::All, TaskSort::Priority)?;
        Ok(Priority::ALL
            .iter()
            .map(|p| {
                let n = tasks.iter().filter(|t| t.priority == *p).count();
                (*p, u32::try_from(n).unwrap_or(u32::MAX))
            })
            .collect())
    }

    fn query<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<Task>, FocusdeckError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| FocusdeckError::db("Failed to prepare query", &e))?;

        let rows = stmt
            .query_map(params, row_to_task)
            .map_err(|e| FocusdeckError::db("Failed to query tasks", &e))?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row.map_err(|e| FocusdeckError::db("Failed to read task", &e))?);
        }
        Ok(tasks)
    }
}

impl TaskRegistry for TaskStorage {
    fn increment_session_count(&self, task_id: i64) -> Result<(), FocusdeckError> {
        let changed = self
            .db
            .connection()
            .execute(
                "UPDATE tasks SET sessions = sessions + 1, updated = ?1 WHERE id = ?2",
                params![Utc::now().to_rfc3339(), task_id],
            )
            .map_err(|e| FocusdeckError::db("Failed to credit task", &e))?;

        if changed == 0 {
            tracing::debug!(task_id, "credited task no longer exists");
        }
        Ok(())
    }
}

fn parse_timestamp(idx: usize, s: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Convert a database row to a `Task`.
fn row_to_task(row: &Row<'_>) -> Result<Task, rusqlite::Error> {
    let priority_str: String = row.get(3)?;
    let deadline_str: Option<String> = row.get(5)?;
    let created_str: String = row.get(7)?;
    let updated_str: Option<String> = row.get(8)?;

    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        priority: priority_str.parse().unwrap_or_default(),
        category: row.get(4)?,
        deadline: deadline_str.and_then(|s| s.parse().ok()),
        playlist_url: row.get(6)?,
        created: parse_timestamp(7, &created_str)?,
        updated: updated_str.map(|s| parse_timestamp(8, &s)).transpose()?,
        sessions: row.get(9)?,
        completed: row.get(10)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_storage() -> TaskStorage {
        TaskStorage::new(Rc::new(Database::open_in_memory().unwrap()))
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_create_and_get() {
        let storage = create_test_storage();
        let task = storage
            .create(NewTask {
                title: "  Read chapter 3 ".to_string(),
                priority: Priority::High,
                category: Some("Study".to_string()),
                deadline: Some(date("2024-05-01")),
                ..NewTask::default()
            })
            .unwrap();

        assert_eq!(task.title, "Read chapter 3");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.deadline, Some(date("2024-05-01")));
        assert_eq!(task.sessions, 0);
        assert!(!task.completed);
        assert!(task.updated.is_none());

        let loaded = storage.get(task.id).unwrap().unwrap();
        assert_eq!(loaded, task);
    }

    #[test]
    fn test_create_rejects_empty_title() {
        let storage = create_test_storage();
        let err = storage.create(NewTask::titled("   ")).unwrap_err();
        assert!(matches!(err, FocusdeckError::InvalidInput(_)));
    }

    #[test]
    fn test_list_filter_and_sort() {
        let storage = create_test_storage();
        let low = storage
            .create(NewTask {
                priority: Priority::Low,
                ..NewTask::titled("low")
            })
            .unwrap();
        let high = storage
            .create(NewTask {
                priority: Priority::High,
                ..NewTask::titled("high")
            })
            .unwrap();
        storage.toggle_complete(low.id).unwrap();

        let all = storage.list(TaskFilter::All, TaskSort::Priority).unwrap();
        assert_eq!(all.iter().map(|t| t.id).collect::<Vec<_>>(), vec![high.id, low.id]);

        let pending = storage.list(TaskFilter::Pending, TaskSort::Priority).unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, high.id);

        let completed = storage.list(TaskFilter::Completed, TaskSort::Priority).unwrap();
        assert_eq!(completed[0].id, low.id);
    }

    #[test]
    fn test_update_sets_updated() {
        let storage = create_test_storage();
        let task = storage.create(NewTask::titled("draft")).unwrap();

        let updated = storage
            .update(
                task.id,
                TaskUpdate {
                    title: Some("final".to_string()),
                    playlist_url: Some(Some("https://example.com/lofi".to_string())),
                    ..TaskUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(updated.title, "final");
        assert_eq!(updated.playlist_url.as_deref(), Some("https://example.com/lofi"));
        assert!(updated.updated.is_some());
    }

    #[test]
    fn test_toggle_complete_twice() {
        let storage = create_test_storage();
        let task = storage.create(NewTask::titled("flip")).unwrap();

        assert!(storage.toggle_complete(task.id).unwrap().completed);
        assert!(!storage.toggle_complete(task.id).unwrap().completed);
    }

    #[test]
    fn test_missing_task_errors() {
        let storage = create_test_storage();
        assert!(matches!(storage.require(9), Err(FocusdeckError::NotFound(_))));
        assert!(matches!(storage.toggle_complete(9), Err(FocusdeckError::NotFound(_))));
        assert!(matches!(storage.delete(9), Err(FocusdeckError::NotFound(_))));
    }

    #[test]
    fn test_delete() {
        let storage = create_test_storage();
        let task = storage.create(NewTask::titled("gone")).unwrap();
        storage.delete(task.id).unwrap();
        assert!(storage.get(task.id).unwrap().is_none());
    }

    #[test]
    fn test_increment_session_count() {
        let storage = create_test_storage();
        let task = storage.create(NewTask::titled("focus")).unwrap();

        storage.increment_session_count(task.id).unwrap();
        storage.increment_session_count(task.id).unwrap();
        assert_eq!(storage.require(task.id).unwrap().sessions, 2);

        // Unknown IDs are ignored
        storage.increment_session_count(404).unwrap();
    }

    #[test]
    fn test_deadline_window_and_priority_counts() {
        let storage = create_test_storage();
        for (title, deadline, priority) in [
            ("a", Some("2024-05-01"), Priority::High),
            ("b", Some("2024-05-31"), Priority::Low),
            ("c", Some("2024-06-01"), Priority::Low),
            ("d", None, Priority::Medium),
        ] {
            storage
                .create(NewTask {
                    deadline: deadline.map(date),
                    priority,
                    ..NewTask::titled(title)
                })
                .unwrap();
        }

        let may = storage
            .with_deadline_between(date("2024-05-01"), date("2024-05-31"))
            .unwrap();
        assert_eq!(may.iter().map(|t| t.title.as_str()).collect::<Vec<_>>(), vec!["a", "b"]);

        let counts = storage.count_by_priority().unwrap();
        assert_eq!(
            counts,
            vec![(Priority::High, 1), (Priority::Medium, 1), (Priority::Low, 2)]
        );
    }
}
