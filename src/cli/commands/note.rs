//! Note command implementation.

use colored::Colorize;

use super::Context;
use crate::cli::args::{NoteCommands, OutputFormat};
use crate::error::FocusdeckError;
use crate::features::notes::{NoteStorage, NoteUpdate};
use crate::output::{format_note, format_notes, to_json};

/// Execute note subcommands.
///
/// # Errors
///
/// Returns an error if the note doesn't exist, input is invalid, or storage
/// access fails.
pub fn note(ctx: &Context, cmd: NoteCommands, format: OutputFormat) -> Result<String, FocusdeckError> {
    let storage = NoteStorage::new(ctx.db.clone());

    match cmd {
        NoteCommands::New {
            title,
            content,
            tags,
        } => {
            let note = storage.create(title.as_deref(), &content, &tags)?;
            match format {
                OutputFormat::Json => to_json(&note),
                OutputFormat::Pretty => Ok(format!(
                    "{} Created note #{}: {}",
                    "✓".green(),
                    note.id,
                    note.title.bold()
                )),
            }
        }

        NoteCommands::List => format_notes(&storage.list()?, "Notes", format),

        NoteCommands::Show { id } => format_note(&storage.require(id)?, format),

        NoteCommands::Edit { id, title, content } => {
            if title.is_none() && content.is_none() {
                return Err(FocusdeckError::InvalidInput(
                    "Nothing to change; pass --title or --content".to_string(),
                ));
            }
            format_note(&storage.update(id, NoteUpdate { title, content })?, format)
        }

        NoteCommands::Search { term } => {
            let notes = storage.search(&term)?;
            format_notes(&notes, &format!("Notes matching '{term}'"), format)
        }

        NoteCommands::Tag { id, tag } => format_note(&storage.add_tag(id, &tag)?, format),

        NoteCommands::Untag { id, tag } => format_note(&storage.remove_tag(id, &tag)?, format),

        NoteCommands::Delete { id } => {
            storage.delete(id)?;
            match format {
                OutputFormat::Json => to_json(&serde_json::json!({ "deleted": id })),
                OutputFormat::Pretty => Ok(format!("{} Deleted note #{id}", "✓".green())),
            }
        }

        NoteCommands::Export { dir } => {
            let dir = dir.unwrap_or_else(|| ctx.paths.exports.clone());
            let path = storage.export_json(&dir)?;
            match format {
                OutputFormat::Json => to_json(&serde_json::json!({ "path": path })),
                OutputFormat::Pretty => Ok(format!(
                    "{} Exported notes to {}",
                    "✓".green(),
                    path.display()
                )),
            }
        }
    }
}
