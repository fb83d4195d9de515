//! Statistics command implementation.

use chrono::Local;

use super::Context;
use crate::cli::args::{OutputFormat, StatsCommands};
use crate::error::FocusdeckError;
use crate::features::pomodoro::SessionStorage;
use crate::features::stats::{month_bounds, parse_month, Agenda, ReportPeriod, StatsReport};
use crate::features::tasks::{TaskFilter, TaskSort, TaskStorage};
use crate::output::to_json;

/// Execute stats subcommands. With no subcommand, shows the all-time report.
///
/// # Errors
///
/// Returns an error if storage access fails or the month is malformed.
pub fn stats(
    ctx: &Context,
    cmd: Option<StatsCommands>,
    format: OutputFormat,
) -> Result<String, FocusdeckError> {
    let sessions = SessionStorage::new(ctx.db.clone());
    let tasks = TaskStorage::new(ctx.db.clone());
    let today = Local::now().date_naive();

    match cmd {
        None => report(&sessions, &tasks, ReportPeriod::AllTime, format),
        Some(StatsCommands::Report { period }) => {
            report(&sessions, &tasks, ReportPeriod::parse(&period), format)
        }
        Some(StatsCommands::Agenda { month }) => {
            let month = month.as_deref().map_or(Ok(today), parse_month)?;
            let (first, last) = month_bounds(month)?;
            let due = tasks.with_deadline_between(first, last)?;
            let logged = sessions.all()?;
            let agenda = Agenda::build(month, &due, &logged)?;
            match format {
                OutputFormat::Json => to_json(&agenda),
                OutputFormat::Pretty => Ok(agenda.format()),
            }
        }
    }
}

fn report(
    sessions: &SessionStorage,
    tasks: &TaskStorage,
    period: ReportPeriod,
    format: OutputFormat,
) -> Result<String, FocusdeckError> {
    let today = Local::now().date_naive();
    let records = match period.date_range(today) {
        Some((start, end)) => sessions.range(start, end)?,
        None => sessions.all()?,
    };
    let all_tasks = tasks.list(TaskFilter::All, TaskSort::Priority)?;
    let report = StatsReport::generate(period, &records, &all_tasks, today);

    match format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Pretty => Ok(report.format()),
    }
}
