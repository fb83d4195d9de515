//! Database migrations for focusdeck.
//!
//! Each migration is a function that upgrades the schema by one version.
//! Migrations are run automatically when the database is opened.

use rusqlite::Connection;

use crate::error::FocusdeckError;

/// Current schema version.
const CURRENT_VERSION: i32 = 2;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, FocusdeckError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| FocusdeckError::db("Failed to get schema version", &e))
}

/// Set the schema version in the database.
fn set_version(conn: &Connection, version: i32) -> Result<(), FocusdeckError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| FocusdeckError::db("Failed to set schema version", &e))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), FocusdeckError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        tracing::debug!(version, "running schema migration");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

/// Run a specific migration.
fn run_migration(conn: &Connection, version: i32) -> Result<(), FocusdeckError> {
    match version {
        1 => migrate_v1(conn),
        2 => migrate_v2(conn),
        _ => Err(FocusdeckError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: settings, session log and tasks.
///
/// Creates tables for:
/// - `settings`: key/value store, values are JSON text
/// - `sessions`: append-only log of completed phases
/// - `tasks`: task list with per-task session counter
fn migrate_v1(conn: &Connection) -> Result<(), FocusdeckError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            kind TEXT NOT NULL,
            duration_seconds INTEGER NOT NULL CHECK (duration_seconds > 0),
            completed_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_completed
        ON sessions(completed_at);

        CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            priority TEXT NOT NULL DEFAULT 'medium',
            category TEXT,
            deadline TEXT,
            playlist_url TEXT,
            created TEXT NOT NULL,
            updated TEXT,
            sessions INTEGER NOT NULL DEFAULT 0,
            completed INTEGER NOT NULL DEFAULT 0
        );
        ",
    )
    .map_err(|e| FocusdeckError::db("Migration v1 failed", &e))
}

/// Migration v2: goals, milestones and notes.
fn migrate_v2(conn: &Connection) -> Result<(), FocusdeckError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS goals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            category TEXT,
            created TEXT NOT NULL,
            target_date TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0,
            progress INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS goal_milestones (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            goal_id INTEGER NOT NULL REFERENCES goals(id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_goal_milestones_goal
        ON goal_milestones(goal_id);

        CREATE TABLE IF NOT EXISTS notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            content TEXT NOT NULL DEFAULT '',
            tags TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL,
            last_edited TEXT NOT NULL
        );
        ",
    )
    .map_err(|e| FocusdeckError::db("Migration v2 failed", &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_create_tables() {
        let conn = Connection::open_in_memory().unwrap();

        run(&conn).unwrap();

        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);

        conn.execute(
            "INSERT INTO settings (key, value, updated_at) VALUES ('k', '1', '2024-01-01T00:00:00Z')",
            [],
        )
        .unwrap();

        conn.execute(
            "INSERT INTO sessions (kind, duration_seconds, completed_at)
             VALUES ('work', 1500, '2024-01-01T10:00:00Z')",
            [],
        )
        .unwrap();

        conn.execute(
            "INSERT INTO tasks (title, created) VALUES ('Read chapter 3', '2024-01-01T10:00:00Z')",
            [],
        )
        .unwrap();

        conn.execute(
            "INSERT INTO goals (title, created, target_date) VALUES ('Finish course', '2024-01-01T10:00:00Z', '2024-01-15')",
            [],
        )
        .unwrap();

        conn.execute(
            "INSERT INTO notes (title, created_at, last_edited) VALUES ('Untitled Note', 'a', 'b')",
            [],
        )
        .unwrap();
    }

    #[test]
    fn test_session_duration_must_be_positive() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO sessions (kind, duration_seconds, completed_at) VALUES ('work', 0, 'x')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_migration_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        run(&conn).unwrap();
        run(&conn).unwrap();

        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_get_version_new_database() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(get_version(&conn).unwrap(), 0);
    }
}
