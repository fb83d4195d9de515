//! Key/value settings table.
//!
//! Values are stored as JSON text so callers can persist numbers, booleans
//! and small objects without a schema change.

use std::rc::Rc;

use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use serde_json::Value;

use super::Database;
use crate::error::FocusdeckError;
use crate::features::pomodoro::SettingsStore;

/// SQLite-backed key/value store.
pub struct KeyValueStore {
    db: Rc<Database>,
}

impl KeyValueStore {
    /// Create a store over a shared database handle.
    #[must_use]
    pub const fn new(db: Rc<Database>) -> Self {
        Self { db }
    }

    /// Read a raw value.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored text is not JSON.
    pub fn get_value(&self, key: &str) -> Result<Option<Value>, FocusdeckError> {
        let raw: Option<String> = self
            .db
            .connection()
            .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| FocusdeckError::db(&format!("Failed to read setting {key}"), &e))?;

        raw.map(|text| serde_json::from_str(&text).map_err(FocusdeckError::from))
            .transpose()
    }

    /// Write a raw value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn set_value(&self, key: &str, value: &Value) -> Result<(), FocusdeckError> {
        let text = serde_json::to_string(value)?;
        self.db
            .connection()
            .execute(
                r"INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)
                  ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, text, Utc::now().to_rfc3339()],
            )
            .map_err(|e| FocusdeckError::db(&format!("Failed to write setting {key}"), &e))?;
        Ok(())
    }

    /// Delete a key. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn remove(&self, key: &str) -> Result<bool, FocusdeckError> {
        let rows = self
            .db
            .connection()
            .execute("DELETE FROM settings WHERE key = ?1", [key])
            .map_err(|e| FocusdeckError::db(&format!("Failed to delete setting {key}"), &e))?;
        Ok(rows > 0)
    }

    /// All stored entries, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn entries(&self) -> Result<Vec<(String, Value)>, FocusdeckError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare("SELECT key, value FROM settings ORDER BY key")
            .map_err(|e| FocusdeckError::db("Failed to prepare query", &e))?;

        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
            .map_err(|e| FocusdeckError::db("Failed to query settings", &e))?;

        let mut entries = Vec::new();
        for row in rows {
            let (key, text) = row.map_err(|e| FocusdeckError::db("Failed to read row", &e))?;
            entries.push((key, serde_json::from_str(&text)?));
        }
        Ok(entries)
    }
}

impl SettingsStore for KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, FocusdeckError> {
        self.get_value(key)
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), FocusdeckError> {
        self.set_value(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_store() -> KeyValueStore {
        KeyValueStore::new(Rc::new(Database::open_in_memory().unwrap()))
    }

    #[test]
    fn test_missing_key() {
        let store = create_store();
        assert!(store.get_value("nope").unwrap().is_none());
    }

    #[test]
    fn test_set_and_overwrite() {
        let store = create_store();

        store.set_value("completed_work_sessions", &json!(3)).unwrap();
        assert_eq!(store.get_value("completed_work_sessions").unwrap(), Some(json!(3)));

        store.set_value("completed_work_sessions", &json!(4)).unwrap();
        assert_eq!(store.get_value("completed_work_sessions").unwrap(), Some(json!(4)));
    }

    #[test]
    fn test_structured_values() {
        let store = create_store();
        let value = json!({ "work_seconds": 600, "long_break_interval": 3 });

        store.set_value("timer_config", &value).unwrap();
        assert_eq!(store.get_value("timer_config").unwrap(), Some(value));
    }

    #[test]
    fn test_entries_and_remove() {
        let store = create_store();
        store.set_value("b", &json!(true)).unwrap();
        store.set_value("a", &json!("x")).unwrap();

        let keys: Vec<String> = store.entries().unwrap().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);

        assert!(store.remove("a").unwrap());
        assert!(!store.remove("a").unwrap());
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("kv.db");

        {
            let store = KeyValueStore::new(Rc::new(Database::open_at(&path).unwrap()));
            store.set_value("completed_work_sessions", &json!(7)).unwrap();
        }

        let store = KeyValueStore::new(Rc::new(Database::open_at(&path).unwrap()));
        assert_eq!(store.get_value("completed_work_sessions").unwrap(), Some(json!(7)));
    }
}
