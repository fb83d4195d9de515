//! Tagged notes with search and JSON export.

pub mod storage;
pub mod types;

pub use storage::{NoteStorage, NoteUpdate};
pub use types::{all_tags, Note, DEFAULT_TITLE};
