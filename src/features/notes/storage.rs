//! Note storage and export.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use chrono::{DateTime, Local, Utc};
use rusqlite::{params, OptionalExtension, Row};

use super::types::{Note, DEFAULT_TITLE};
use crate::error::FocusdeckError;
use crate::storage::Database;

const SELECT_COLUMNS: &str = "SELECT id, title, content, tags, created_at, last_edited FROM notes";

/// A partial edit. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Storage for notes.
pub struct NoteStorage {
    db: Rc<Database>,
}

impl NoteStorage {
    /// Create storage over a shared database handle.
    #[must_use]
    pub const fn new(db: Rc<Database>) -> Self {
        Self { db }
    }

    /// Create a note. A blank title becomes "Untitled Note".
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create(
        &self,
        title: Option<&str>,
        content: &str,
        tags: &[String],
    ) -> Result<Note, FocusdeckError> {
        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TITLE);

        let mut clean_tags: Vec<String> = Vec::new();
        for tag in tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
            if !clean_tags.iter().any(|t| t == tag) {
                clean_tags.push(tag.to_string());
            }
        }

        let now = Utc::now().to_rfc3339();
        let conn = self.db.connection();
        conn.execute(
            "INSERT INTO notes (title, content, tags, created_at, last_edited)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![title, content, serde_json::to_string(&clean_tags)?, now],
        )
        .map_err(|e| FocusdeckError::db("Failed to create note", &e))?;

        self.require(conn.last_insert_rowid())
    }

    /// Get a note by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get(&self, id: i64) -> Result<Option<Note>, FocusdeckError> {
        self.db
            .connection()
            .query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), [id], row_to_note)
            .optional()
            .map_err(|e| FocusdeckError::db("Failed to query note", &e))
    }

    /// Get a note, failing with `NotFound` when absent.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub fn require(&self, id: i64) -> Result<Note, FocusdeckError> {
        self.get(id)?
            .ok_or_else(|| FocusdeckError::NotFound(format!("note {id}")))
    }

    /// All notes, most recently edited first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list(&self) -> Result<Vec<Note>, FocusdeckError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY last_edited DESC, id DESC"))
            .map_err(|e| FocusdeckError::db("Failed to prepare query", &e))?;
        let rows = stmt
            .query_map([], row_to_note)
            .map_err(|e| FocusdeckError::db("Failed to query notes", &e))?;

        let mut notes = Vec::new();
        for row in rows {
            notes.push(row.map_err(|e| FocusdeckError::db("Failed to read note", &e))?);
        }
        Ok(notes)
    }

    /// Notes whose title, content or tags contain `term`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn search(&self, term: &str) -> Result<Vec<Note>, FocusdeckError> {
        Ok(self.list()?.into_iter().filter(|n| n.matches(term)).collect())
    }

    /// Edit title and/or content.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub fn update(&self, id: i64, update: NoteUpdate) -> Result<Note, FocusdeckError> {
        let mut note = self.require(id)?;
        if let Some(title) = update.title {
            let title = title.trim();
            note.title = if title.is_empty() { DEFAULT_TITLE } else { title }.to_string();
        }
        if let Some(content) = update.content {
            note.content = content;
        }
        self.save(&mut note)?;
        Ok(note)
    }

    /// Add a tag.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `InvalidInput` for blank or duplicate tags, or a database error.
    pub fn add_tag(&self, id: i64, tag: &str) -> Result<Note, FocusdeckError> {
        let mut note = self.require(id)?;
        note.add_tag(tag)?;
        self.save(&mut note)?;
        Ok(note)
    }

    /// Remove a tag.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the note or the tag doesn't exist, or a database error.
    pub fn remove_tag(&self, id: i64, tag: &str) -> Result<Note, FocusdeckError> {
        let mut note = self.require(id)?;
        if !note.remove_tag(tag) {
            return Err(FocusdeckError::NotFound(format!("tag '{tag}' on note {id}")));
        }
        self.save(&mut note)?;
        Ok(note)
    }

    /// Delete a note.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub fn delete(&self, id: i64) -> Result<(), FocusdeckError> {
        let changed = self
            .db
            .connection()
            .execute("DELETE FROM notes WHERE id = ?1", [id])
            .map_err(|e| FocusdeckError::db("Failed to delete note", &e))?;

        if changed == 0 {
            return Err(FocusdeckError::NotFound(format!("note {id}")));
        }
        Ok(())
    }

    /// Write every note as pretty JSON into `dir`, returning the file path.
    ///
    /// The file is named `notes_<YYYY-MM-DD>.json` after today's local date.
    ///
    /// # Errors
    ///
    /// Returns an error if reading notes or writing the file fails.
    pub fn export_json(&self, dir: &Path) -> Result<PathBuf, FocusdeckError> {
        let notes = self.list()?;
        std::fs::create_dir_all(dir)?;

        let path = dir.join(format!("notes_{}.json", Local::now().format("%Y-%m-%d")));
        std::fs::write(&path, serde_json::to_string_pretty(&notes)?)?;

        tracing::info!(count = notes.len(), path = %path.display(), "notes exported");
        Ok(path)
    }

    fn save(&self, note: &mut Note) -> Result<(), FocusdeckError> {
        note.last_edited = Utc::now();
        self.db
            .connection()
            .execute(
                "UPDATE notes SET title = ?1, content = ?2, tags = ?3, last_edited = ?4 WHERE id = ?5",
                params![
                    note.title,
                    note.content,
                    serde_json::to_string(&note.tags)?,
                    note.last_edited.to_rfc3339(),
                    note.id,
                ],
            )
            .map_err(|e| FocusdeckError::db("Failed to update note", &e))?;
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

/// Convert a database row to a `Note`.
fn row_to_note(row: &Row<'_>) -> Result<Note, rusqlite::Error> {
    let tags_str: String = row.get(3)?;
    let created_str: String = row.get(4)?;
    let edited_str: String = row.get(5)?;

    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        tags: serde_json::from_str(&tags_str).unwrap_or_default(),
        created_at: parse_timestamp(4, &created_str)?,
        last_edited: parse_timestamp(5, &edited_str)?,
    })
}
