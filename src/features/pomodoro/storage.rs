//! Session log storage.
//!
//! Persists completed sessions to the local database. Rows are only ever
//! inserted; the read side feeds reports.

use std::rc::Rc;

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};

use super::phase::SessionKind;
use super::ports::SessionLog;
use super::record::SessionRecord;
use crate::error::FocusdeckError;
use crate::storage::Database;

const SELECT_COLUMNS: &str = "SELECT id, kind, duration_seconds, completed_at FROM sessions";

/// Storage for session records.
pub struct SessionStorage {
    db: Rc<Database>,
}

impl SessionStorage {
    /// Create storage over a shared database handle.
    #[must_use]
    pub const fn new(db: Rc<Database>) -> Self {
        Self { db }
    }

    /// Insert a record and return its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert(&self, record: &SessionRecord) -> Result<i64, FocusdeckError> {
        let conn = self.db.connection();

        conn.execute(
            "INSERT INTO sessions (kind, duration_seconds, completed_at) VALUES (?1, ?2, ?3)",
            params![
                record.kind.as_str(),
                record.duration_seconds,
                record.completed_at.to_rfc3339(),
            ],
        )
        .map_err(|e| FocusdeckError::db("Failed to insert session", &e))?;

        Ok(conn.last_insert_rowid())
    }

    /// Get a record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get(&self, id: i64) -> Result<Option<SessionRecord>, FocusdeckError> {
        self.db
            .connection()
            .query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), [id], row_to_record)
            .optional()
            .map_err(|e| FocusdeckError::db("Failed to query session", &e))
    }

    /// Most recent records, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn recent(&self, limit: usize) -> Result<Vec<SessionRecord>, FocusdeckError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.query(
            &format!("{SELECT_COLUMNS} ORDER BY completed_at DESC, id DESC LIMIT ?1"),
            params![limit],
        )
    }

    /// Records completed in `[start, end)`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<SessionRecord>, FocusdeckError> {
        self.query(
            &format!(
                "{SELECT_COLUMNS} WHERE completed_at >= ?1 AND completed_at < ?2 ORDER BY completed_at"
            ),
            params![start.to_rfc3339(), end.to_rfc3339()],
        )
    }

    /// Every record, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn all(&self) -> Result<Vec<SessionRecord>, FocusdeckError> {
        self.query(&format!("{SELECT_COLUMNS} ORDER BY completed_at"), [])
    }

    /// Number of records of a kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count(&self, kind: SessionKind) -> Result<i64, FocusdeckError> {
        self.db
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM sessions WHERE kind = ?1",
                [kind.as_str()],
                |row| row.get(0),
            )
            .map_err(|e| FocusdeckError::db("Failed to count sessions", &e))
    }

    /// Total logged seconds of a kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn total_seconds(&self, kind: SessionKind) -> Result<i64, FocusdeckError> {
        self.db
            .connection()
            .query_row(
                "SELECT COALESCE(SUM(duration_seconds), 0) FROM sessions WHERE kind = ?1",
                [kind.as_str()],
                |row| row.get(0),
            )
            .map_err(|e| FocusdeckError::db("Failed to total sessions", &e))
    }

    fn query<P: rusqlite::Params>(
        &self,
        sql: &str,
        params: P,
    ) -> Result<Vec<SessionRecord>, FocusdeckError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| FocusdeckError::db("Failed to prepare query", &e))?;

        let rows = stmt
            .query_map(params, row_to_record)
            .map_err(|e| FocusdeckError::db("Failed to query sessions", &e))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(|e| FocusdeckError::db("Failed to read session", &e))?);
        }
        Ok(records)
    }
}

impl SessionLog for SessionStorage {
    fn append(&self, record: &SessionRecord) -> Result<(), FocusdeckError> {
        let id = self.insert(record)?;
        tracing::info!(id, kind = %record.kind, seconds = record.duration_seconds, "session logged");
        Ok(())
    }
}

/// Convert a database row to a `SessionRecord`.
fn row_to_record(row: &Row<'_>) -> Result<SessionRecord, rusqlite::Error> {
    let id: i64 = row.get(0)?;
    let kind_str: String = row.get(1)?;
    let duration_seconds: u32 = row.get(2)?;
    let completed_at_str: String = row.get(3)?;

    let kind = SessionKind::parse(&kind_str).unwrap_or(SessionKind::Work);
    let completed_at = DateTime::parse_from_rfc3339(&completed_at_str)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(SessionRecord {
        id: Some(id),
        kind,
        duration_seconds,
        completed_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn create_test_storage() -> SessionStorage {
        SessionStorage::new(Rc::new(Database::open_in_memory().unwrap()))
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_append_and_get() {
        let storage = create_test_storage();
        let record = SessionRecord::new(SessionKind::Work, 1500, at(9));

        let id = storage.insert(&record).unwrap();
        let loaded = storage.get(id).unwrap().unwrap();

        assert_eq!(loaded.id, Some(id));
        assert_eq!(loaded.kind, SessionKind::Work);
        assert_eq!(loaded.duration_seconds, 1500);
        assert_eq!(loaded.completed_at, at(9));
    }

    #[test]
    fn test_append_via_trait() {
        let storage = create_test_storage();
        let log: &dyn SessionLog = &storage;

        log.append(&SessionRecord::new(SessionKind::Work, 1500, at(9))).unwrap();
        log.append(&SessionRecord::new(SessionKind::Work, 1500, at(10))).unwrap();

        assert_eq!(storage.count(SessionKind::Work).unwrap(), 2);
        assert_eq!(storage.total_seconds(SessionKind::Work).unwrap(), 3000);
        assert_eq!(storage.count(SessionKind::Break).unwrap(), 0);
    }

    #[test]
    fn test_recent_newest_first() {
        let storage = create_test_storage();
        for hour in 8..13 {
            storage
                .insert(&SessionRecord::new(SessionKind::Work, 1500, at(hour)))
                .unwrap();
        }

        let recent = storage.recent(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].completed_at, at(12));
        assert_eq!(recent[2].completed_at, at(10));
    }

    #[test]
    fn test_range_is_half_open() {
        let storage = create_test_storage();
        for hour in [8, 9, 10] {
            storage
                .insert(&SessionRecord::new(SessionKind::Work, 1500, at(hour)))
                .unwrap();
        }

        let hits = storage.range(at(9), at(10)).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].completed_at, at(9));

        let all = storage.range(at(0), at(10) + Duration::seconds(1)).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(storage.all().unwrap().len(), 3);
    }

    #[test]
    fn test_missing_id() {
        let storage = create_test_storage();
        assert!(storage.get(99).unwrap().is_none());
    }
}
