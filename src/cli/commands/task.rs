//! Task command implementation.

use colored::Colorize;

use super::{clearable, parse_date, Context};
use crate::cli::args::{OutputFormat, TaskCommands};
use crate::error::FocusdeckError;
use crate::features::tasks::{NewTask, TaskFilter, TaskSort, TaskStorage, TaskUpdate};
use crate::output::{format_task, format_tasks, to_json};

/// Execute task subcommands.
///
/// # Errors
///
/// Returns an error if input is invalid, the task doesn't exist, or
/// storage access fails.
pub fn task(ctx: &Context, cmd: TaskCommands, format: OutputFormat) -> Result<String, FocusdeckError> {
    let storage = TaskStorage::new(ctx.db.clone());

    match cmd {
        TaskCommands::Add {
            title,
            description,
            priority,
            category,
            deadline,
            playlist,
        } => {
            let new = NewTask {
                title,
                description,
                priority: priority.map_or(ctx.config.tasks.default_priority, Into::into),
                category,
                deadline: deadline.as_deref().map(parse_date).transpose()?,
                playlist_url: playlist,
            };
            let task = storage.create(new)?;
            match format {
                OutputFormat::Json => to_json(&task),
                OutputFormat::Pretty => Ok(format!(
                    "{} Added task #{}: {}",
                    "✓".green(),
                    task.id,
                    task.title.bold()
                )),
            }
        }

        TaskCommands::List { filter, sort } => {
            let filter: TaskFilter = filter.into();
            let sort: TaskSort = sort.map_or(ctx.config.tasks.default_sort, Into::into);
            let tasks = storage.list(filter, sort)?;
            format_tasks(&tasks, list_title(filter), format)
        }

        TaskCommands::Show { id } => format_task(&storage.require(id)?, format),

        TaskCommands::Edit {
            id,
            title,
            description,
            priority,
            category,
            deadline,
            playlist,
        } => {
            let deadline = match clearable(deadline) {
                Some(Some(d)) => Some(Some(parse_date(&d)?)),
                Some(None) => Some(None),
                None => None,
            };
            let update = TaskUpdate {
                title,
                description: clearable(description),
                priority: priority.map(Into::into),
                category: clearable(category),
                deadline,
                playlist_url: clearable(playlist),
            };
            if update.is_empty() {
                return Err(FocusdeckError::InvalidInput(
                    "Nothing to change; pass at least one field to edit".to_string(),
                ));
            }
            format_task(&storage.update(id, update)?, format)
        }

        TaskCommands::Done { id } => {
            let task = storage.toggle_complete(id)?;
            match format {
                OutputFormat::Json => to_json(&task),
                OutputFormat::Pretty => {
                    let verb = if task.completed { "Completed" } else { "Reopened" };
                    Ok(format!("{} {verb}: {}", "✓".green(), task.title))
                }
            }
        }

        TaskCommands::Delete { id } => {
            storage.delete(id)?;
            match format {
                OutputFormat::Json => to_json(&serde_json::json!({ "deleted": id })),
                OutputFormat::Pretty => Ok(format!("{} Deleted task #{id}", "✓".green())),
            }
        }
    }
}

const fn list_title(filter: TaskFilter) -> &'static str {
    match filter {
        TaskFilter::All => "Tasks",
        TaskFilter::Pending => "Pending Tasks",
        TaskFilter::Completed => "Completed Tasks",
    }
}
