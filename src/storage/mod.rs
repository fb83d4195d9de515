//! Storage layer for focusdeck.
//!
//! This module provides SQLite-based persistence for:
//! - Settings (key/value pairs)
//! - The session log
//! - Tasks, goals and notes

mod database;
mod kv;
mod migrations;

pub use database::Database;
pub use kv::KeyValueStore;
