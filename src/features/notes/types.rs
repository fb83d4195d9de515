//! Note type, tag editing and search.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FocusdeckError;

/// Title given to notes created without one.
pub const DEFAULT_TITLE: &str = "Untitled Note";

/// A free-form note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub last_edited: DateTime<Utc>,
}

impl Note {
    /// Case-insensitive match against title, content and tags.
    ///
    /// An empty term matches everything.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&term)
            || self.content.to_lowercase().contains(&term)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&term))
    }

    /// Add a tag.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the tag is blank or already present.
    pub fn add_tag(&mut self, tag: &str) -> Result<(), FocusdeckError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(FocusdeckError::InvalidInput("Tag cannot be empty".to_string()));
        }
        if self.tags.iter().any(|t| t == tag) {
            return Err(FocusdeckError::InvalidInput(format!(
                "Note already has tag '{tag}'"
            )));
        }
        self.tags.push(tag.to_string());
        Ok(())
    }

    /// Remove a tag. Returns whether it was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag.trim());
        self.tags.len() != before
    }

    /// First line of content, truncated for list views.
    #[must_use]
    pub fn preview(&self, max_chars: usize) -> String {
        let line = self.content.lines().next().unwrap_or_default().trim();
        if line.chars().count() <= max_chars {
            return line.to_string();
        }
        let cut: String = line.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

/// Every distinct tag across notes, sorted.
#[must_use]
pub fn all_tags(notes: &[Note]) -> Vec<String> {
    let mut tags: Vec<String> = notes.iter().flat_map(|n| n.tags.iter().cloned()).collect();
    tags.sort();
    tags.dedup();
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(title: &str, content: &str, tags: &[&str]) -> Note {
        Note {
            id: 1,
            title: title.to_string(),
            content: content.to_string(),
            tags: tags.iter().map(ToString::to_string).collect(),
            created_at: Utc::now(),
            last_edited: Utc::now(),
        }
    }

    #[test]
    fn test_search_fields() {
        let n = note("Biology", "Mitochondria is the powerhouse", &["Exam"]);
        assert!(n.matches("bio"));
        assert!(n.matches("POWERHOUSE"));
        assert!(n.matches("exam"));
        assert!(n.matches(""));
        assert!(!n.matches("chemistry"));
    }

    #[test]
    fn test_tags() {
        let mut n = note("t", "", &[]);
        n.add_tag(" rust ").unwrap();
        assert_eq!(n.tags, vec!["rust"]);
        assert!(n.add_tag("rust").is_err());
        assert!(n.add_tag("  ").is_err());

        assert!(n.remove_tag("rust"));
        assert!(!n.remove_tag("rust"));
    }

    #[test]
    fn test_preview() {
        let n = note("t", "a fairly long first line\nsecond", &[]);
        assert_eq!(n.preview(100), "a fairly long first line");
        assert_eq!(n.preview(10), "a fairl...");
    }

    #[test]
    fn test_all_tags() {
        let notes = vec![note("a", "", &["x", "y"]), note("b", "", &["y", "z"])];
        assert_eq!(all_tags(&notes), vec!["x", "y", "z"]);
    }
}
