//! Goal and milestone storage.

use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, OptionalExtension, Row};

use super::types::{Goal, GoalFilter, Milestone, NewGoal};
use crate::error::FocusdeckError;
use crate::storage::Database;

const SELECT_COLUMNS: &str =
    "SELECT id, title, description, category, created, target_date, completed, progress FROM goals";

/// Storage for goals.
pub struct GoalStorage {
    db: Rc<Database>,
}

impl GoalStorage {
    /// Create storage over a shared database handle.
    #[must_use]
    pub const fn new(db: Rc<Database>) -> Self {
        Self { db }
    }

    /// Create a goal and its initial milestones.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty title, or a database error.
    pub fn create(&self, new: NewGoal) -> Result<Goal, FocusdeckError> {
        let title = new.title.trim();
        if title.is_empty() {
            return Err(FocusdeckError::InvalidInput(
                "Goal title cannot be empty".to_string(),
            ));
        }

        let created = Utc::now();
        let target_date = created + Duration::days(i64::from(new.duration_days));

        let conn = self.db.connection();
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| FocusdeckError::db("Failed to begin transaction", &e))?;

        tx.execute(
            "INSERT INTO goals (title, description, category, created, target_date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                title,
                new.description,
                new.category,
                created.to_rfc3339(),
                target_date.to_rfc3339(),
            ],
        )
        .map_err(|e| FocusdeckError::db("Failed to create goal", &e))?;
        let id = tx.last_insert_rowid();

        for milestone in new.milestones.iter().map(|m| m.trim()).filter(|m| !m.is_empty()) {
            tx.execute(
                "INSERT INTO goal_milestones (goal_id, title) VALUES (?1, ?2)",
                params![id, milestone],
            )
            .map_err(|e| FocusdeckError::db("Failed to add milestone", &e))?;
        }

        tx.commit()
            .map_err(|e| FocusdeckError::db("Failed to commit goal", &e))?;

        tracing::debug!(id, title, days = new.duration_days, "goal created");
        self.require(id)
    }

    /// Get a goal with its milestones.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get(&self, id: i64) -> Result<Option<Goal>, FocusdeckError> {
        let goal = self
            .db
            .connection()
            .query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), [id], row_to_goal)
            .optional()
            .map_err(|e| FocusdeckError::db("Failed to query goal", &e))?;

        goal.map(|mut g| {
            g.milestones = self.milestones(g.id)?;
            Ok(g)
        })
        .transpose()
    }

    /// Get a goal, failing with `NotFound` when absent.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub fn require(&self, id: i64) -> Result<Goal, FocusdeckError> {
        self.get(id)?
            .ok_or_else(|| FocusdeckError::NotFound(format!("goal {id}")))
    }

    /// List goals, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list(&self, filter: GoalFilter) -> Result<Vec<Goal>, FocusdeckError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY created DESC, id DESC"))
            .map_err(|e| FocusdeckError::db("Failed to prepare query", &e))?;
        let rows = stmt
            .query_map([], row_to_goal)
            .map_err(|e| FocusdeckError::db("Failed to query goals", &e))?;

        let mut goals = Vec::new();
        for row in rows {
            let mut goal = row.map_err(|e| FocusdeckError::db("Failed to read goal", &e))?;
            if filter.matches(&goal) {
                goal.milestones = self.milestones(goal.id)?;
                goals.push(goal);
            }
        }
        Ok(goals)
    }

    /// Set progress directly.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `InvalidInput` for values over 100, or a database error.
    pub fn set_progress(&self, id: i64, progress: u8) -> Result<Goal, FocusdeckError> {
        let mut goal = self.require(id)?;
        goal.set_progress(progress)?;
        self.save_status(&goal)?;
        Ok(goal)
    }

    /// Flip completion.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub fn toggle_completed(&self, id: i64) -> Result<Goal, FocusdeckError> {
        let mut goal = self.require(id)?;
        goal.toggle_completed();
        self.save_status(&goal)?;
        Ok(goal)
    }

    /// Append a milestone. Progress is left alone until a milestone toggles.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `InvalidInput` for an empty title, or a database error.
    pub fn add_milestone(&self, goal_id: i64, title: &str) -> Result<Goal, FocusdeckError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(FocusdeckError::InvalidInput(
                "Milestone title cannot be empty".to_string(),
            ));
        }
        self.require(goal_id)?;

        self.db
            .connection()
            .execute(
                "INSERT INTO goal_milestones (goal_id, title) VALUES (?1, ?2)",
                params![goal_id, title],
            )
            .map_err(|e| FocusdeckError::db("Failed to add milestone", &e))?;

        self.require(goal_id)
    }

    /// Flip a milestone and store the recomputed progress.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub fn toggle_milestone(&self, goal_id: i64, milestone_id: i64) -> Result<Goal, FocusdeckError> {
        let mut goal = self.require(goal_id)?;
        goal.toggle_milestone(milestone_id)?;

        let completed = goal
            .milestones
            .iter()
            .any(|m| m.id == milestone_id && m.completed);

        let conn = self.db.connection();
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| FocusdeckError::db("Failed to begin transaction", &e))?;
        tx.execute(
            "UPDATE goal_milestones SET completed = ?1 WHERE id = ?2 AND goal_id = ?3",
            params![completed, milestone_id, goal_id],
        )
        .map_err(|e| FocusdeckError::db("Failed to update milestone", &e))?;
        tx.execute(
            "UPDATE goals SET progress = ?1, completed = ?2 WHERE id = ?3",
            params![goal.progress, goal.completed, goal_id],
        )
        .map_err(|e| FocusdeckError::db("Failed to update goal", &e))?;
        tx.commit()
            .map_err(|e| FocusdeckError::db("Failed to commit milestone", &e))?;

        Ok(goal)
    }

    /// Delete a goal and its milestones.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub fn delete(&self, id: i64) -> Result<(), FocusdeckError> {
        let changed = self
            .db
            .connection()
            .execute("DELETE FROM goals WHERE id = ?1", [id])
            .map_err(|e| FocusdeckError::db("Failed to delete goal", &e))?;

        if changed == 0 {
            return Err(FocusdeckError::NotFound(format!("goal {id}")));
        }
        Ok(())
    }

    fn save_status(&self, goal: &Goal) -> Result<(), FocusdeckError> {
        self.db
            .connection()
            .execute(
                "UPDATE goals SET progress = ?1, completed = ?2 WHERE id = ?3",
                params![goal.progress, goal.completed, goal.id],
            )
            .map_err(|e| FocusdeckError::db("Failed to update goal", &e))?;
        Ok(())
    }

    fn milestones(&self, goal_id: i64) -> Result<Vec<Milestone>, FocusdeckError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare("SELECT id, title, completed FROM goal_milestones WHERE goal_id = ?1 ORDER BY id")
            .map_err(|e| FocusdeckError::db("Failed to prepare query", &e))?;
        let rows = stmt
            .query_map([goal_id], |row| {
                Ok(Milestone {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    completed: row.get(2)?,
                })
            })
            .map_err(|e| FocusdeckError::db("Failed to query milestones", &e))?;

        let mut milestones = Vec::new();
        for row in rows {
            milestones.push(row.map_err(|e| FocusdeckError::db("Failed to read milestone", &e))?);
        }
        Ok(milestones)
    }
}

fn parse_timestamp(idx: usize, s: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Convert a database row to a `Goal` without milestones.
fn row_to_goal(row: &Row<'_>) -> Result<Goal, rusqlite::Error> {
    let created_str: String = row.get(4)?;
    let target_str: String = row.get(5)?;

    Ok(Goal {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        created: parse_timestamp(4, &created_str)?,
        target_date: parse_timestamp(5, &target_str)?,
        completed: row.get(6)?,
        progress: row.get(7)?,
        milestones: Vec::new(),
    })
}
