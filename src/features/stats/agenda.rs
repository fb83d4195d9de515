//! Month agenda: task deadlines and logged sessions per day.

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::error::FocusdeckError;
use crate::features::pomodoro::{SessionKind, SessionRecord};
use crate::features::tasks::{Priority, Task};

/// A task due on an agenda day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaTask {
    pub id: i64,
    pub title: String,
    pub priority: Priority,
    pub completed: bool,
    pub sessions: u32,
}

/// One day with something on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaDay {
    pub date: NaiveDate,
    pub deadlines: Vec<AgendaTask>,
    pub work_sessions: u32,
    pub break_sessions: u32,
    pub focus_minutes: u32,
}

impl AgendaDay {
    const fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            deadlines: Vec::new(),
            work_sessions: 0,
            break_sessions: 0,
            focus_minutes: 0,
        }
    }
}

/// Deadlines and sessions for a calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agenda {
    /// First day of the month
    pub month: NaiveDate,
    /// Days with deadlines or sessions, in date order
    pub days: Vec<AgendaDay>,
}

/// First and last day of the month containing `date`.
///
/// # Errors
///
/// Returns `InvalidInput` if the month is out of chrono's range.
pub fn month_bounds(date: NaiveDate) -> Result<(NaiveDate, NaiveDate), FocusdeckError> {
    let out_of_range = || FocusdeckError::InvalidInput(format!("month out of range: {date}"));
    let first = date.with_day(1).ok_or_else(out_of_range)?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(out_of_range)?;
    Ok((first, last))
}

/// Parse `YYYY-MM` into the first day of that month.
///
/// # Errors
///
/// Returns `InvalidInput` for anything else.
pub fn parse_month(s: &str) -> Result<NaiveDate, FocusdeckError> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| FocusdeckError::InvalidInput(format!("Invalid month '{s}' (expected YYYY-MM)")))
}

impl Agenda {
    /// Build the agenda for the month containing `month`.
    ///
    /// Tasks and sessions outside the month are ignored. Sessions are
    /// placed on their local calendar date.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the month is out of range.
    pub fn build(
        month: NaiveDate,
        tasks: &[Task],
        sessions: &[SessionRecord],
    ) -> Result<Self, FocusdeckError> {
        let (first, last) = month_bounds(month)?;
        let in_month = |d: NaiveDate| d >= first && d <= last;

        let mut days: BTreeMap<NaiveDate, AgendaDay> = BTreeMap::new();

        for task in tasks {
            let Some(deadline) = task.deadline.filter(|d| in_month(*d)) else {
                continue;
            };
            days.entry(deadline)
                .or_insert_with(|| AgendaDay::empty(deadline))
                .deadlines
                .push(AgendaTask {
                    id: task.id,
                    title: task.title.clone(),
                    priority: task.priority,
                    completed: task.completed,
                    sessions: task.sessions,
                });
        }

        for session in sessions {
            let date = session.completed_at_local().date_naive();
            if !in_month(date) {
                continue;
            }
            let day = days.entry(date).or_insert_with(|| AgendaDay::empty(date));
            match session.kind {
                SessionKind::Work => {
                    day.work_sessions += 1;
                    day.focus_minutes += session.minutes();
                }
                SessionKind::Break => day.break_sessions += 1,
            }
        }

        Ok(Self {
            month: first,
            days: days.into_values().collect(),
        })
    }

    /// Format the agenda for display.
    #[must_use]
    pub fn format(&self) -> String {
        let mut lines = vec![
            format!("{} {}", "Agenda:".bold(), self.month.format("%B %Y")),
            "═".repeat(50),
        ];

        if self.days.is_empty() {
            lines.push("  Nothing scheduled".dimmed().to_string());
            return lines.join("\n");
        }

        for day in &self.days {
            lines.push(String::new());
            lines.push(day.date.format("%a %b %d").to_string().bold().to_string());

            for task in &day.deadlines {
                let icon = if task.completed { "[x]".green() } else { "[ ]".white() };
                lines.push(format!(
                    "  {} {}  {}  {} sessions",
                    icon,
                    task.title,
                    task.priority.to_string().dimmed(),
                    task.sessions
                ));
            }

            if day.work_sessions > 0 || day.break_sessions > 0 {
                lines.push(format!(
                    "  {} {} work session{} ({}m)",
                    "●".magenta(),
                    day.work_sessions,
                    if day.work_sessions == 1 { "" } else { "s" },
                    day.focus_minutes
                ));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone, Utc};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn task(id: i64, deadline: Option<&str>) -> Task {
        Task {
            id,
            title: format!("Task {id}"),
            description: None,
            priority: Priority::Medium,
            category: None,
            deadline: deadline.map(date),
            playlist_url: None,
            created: Utc::now(),
            updated: None,
            sessions: 2,
            completed: false,
        }
    }

    fn session_on(day: &str, kind: SessionKind, seconds: u32) -> SessionRecord {
        let local = Local
            .from_local_datetime(&date(day).and_hms_opt(12, 0, 0).unwrap())
            .earliest()
            .unwrap();
        SessionRecord::new(kind, seconds, local.with_timezone(&Utc))
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(
            month_bounds(date("2024-02-14")).unwrap(),
            (date("2024-02-01"), date("2024-02-29"))
        );
        assert_eq!(
            month_bounds(date("2023-12-31")).unwrap(),
            (date("2023-12-01"), date("2023-12-31"))
        );
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-05").unwrap(), date("2024-05-01"));
        assert!(parse_month("May").is_err());
        assert!(parse_month("2024-13").is_err());
    }

    #[test]
    fn test_build_groups_by_day() {
        let tasks = vec![
            task(1, Some("2024-05-03")),
            task(2, Some("2024-06-01")),
            task(3, None),
            task(4, Some("2024-05-03")),
        ];
        let sessions = vec![
            session_on("2024-05-03", SessionKind::Work, 1500),
            session_on("2024-05-10", SessionKind::Work, 1500),
            session_on("2024-05-10", SessionKind::Work, 1500),
            session_on("2024-04-30", SessionKind::Work, 1500),
        ];

        let agenda = Agenda::build(date("2024-05-17"), &tasks, &sessions).unwrap();
        assert_eq!(agenda.month, date("2024-05-01"));
        assert_eq!(agenda.days.len(), 2);

        let third = &agenda.days[0];
        assert_eq!(third.date, date("2024-05-03"));
        assert_eq!(third.deadlines.len(), 2);
        assert_eq!(third.work_sessions, 1);

        let tenth = &agenda.days[1];
        assert!(tenth.deadlines.is_empty());
        assert_eq!(tenth.work_sessions, 2);
        assert_eq!(tenth.focus_minutes, 50);
    }

    #[test]
    fn test_empty_agenda_format() {
        let agenda = Agenda::build(date("2024-05-01"), &[], &[]).unwrap();
        assert!(agenda.days.is_empty());
        assert!(agenda.format().contains("Nothing scheduled"));
    }
}
