//! Goal command implementation.

use chrono::Utc;
use colored::Colorize;

use super::Context;
use crate::cli::args::{GoalCommands, OutputFormat};
use crate::error::FocusdeckError;
use crate::features::goals::{Goal, GoalStorage, NewGoal};
use crate::output::{format_goal, format_goals, to_json};

/// Execute goal subcommands.
///
/// # Errors
///
/// Returns an error if the goal or milestone doesn't exist, or storage
/// access fails.
pub fn goal(ctx: &Context, cmd: GoalCommands, format: OutputFormat) -> Result<String, FocusdeckError> {
    let storage = GoalStorage::new(ctx.db.clone());
    let now = Utc::now();

    match cmd {
        GoalCommands::Add {
            title,
            description,
            category,
            days,
            milestones,
        } => {
            let goal = storage.create(NewGoal {
                title,
                description,
                category,
                duration_days: days.unwrap_or(ctx.config.goals.default_duration_days),
                milestones,
            })?;
            match format {
                OutputFormat::Json => to_json(&goal),
                OutputFormat::Pretty => Ok(format!(
                    "{} Added goal #{}: {} (target {})",
                    "✓".green(),
                    goal.id,
                    goal.title.bold(),
                    goal.target_date.format("%Y-%m-%d")
                )),
            }
        }

        GoalCommands::List { filter } => format_goals(&storage.list(filter.into())?, now, format),

        GoalCommands::Show { id } => format_goal(&storage.require(id)?, now, format),

        GoalCommands::Progress { id, percent } => {
            let goal = storage.set_progress(id, percent)?;
            updated(&goal, format)
        }

        GoalCommands::Done { id } => {
            let goal = storage.toggle_completed(id)?;
            updated(&goal, format)
        }

        GoalCommands::Milestone { id, title } => {
            let goal = storage.add_milestone(id, &title)?;
            format_goal(&goal, now, format)
        }

        GoalCommands::Check { id, milestone } => {
            let goal = storage.toggle_milestone(id, milestone)?;
            format_goal(&goal, now, format)
        }

        GoalCommands::Delete { id } => {
            storage.delete(id)?;
            match format {
                OutputFormat::Json => to_json(&serde_json::json!({ "deleted": id })),
                OutputFormat::Pretty => Ok(format!("{} Deleted goal #{id}", "✓".green())),
            }
        }
    }
}

fn updated(goal: &Goal, format: OutputFormat) -> Result<String, FocusdeckError> {
    match format {
        OutputFormat::Json => to_json(goal),
        OutputFormat::Pretty => {
            let state = if goal.completed {
                "completed".green().to_string()
            } else {
                "active".to_string()
            };
            Ok(format!(
                "{} {}: {}% ({state})",
                "✓".green(),
                goal.title.bold(),
                goal.progress
            ))
        }
    }
}
