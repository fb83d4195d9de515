//! Productivity reports.
//!
//! Aggregates the session log and task list into totals, a per-day focus
//! breakdown and task counts by priority.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::features::countdown::{format_duration, render_progress_bar};
use crate::features::pomodoro::{SessionKind, SessionRecord};
use crate::features::tasks::{Priority, Task};

/// Days shown in the daily breakdown.
pub const DAILY_WINDOW: usize = 7;

/// Report time period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    /// Today only
    Today,
    /// Last 7 days
    Week,
    /// Last 30 days
    Month,
    /// Everything logged
    AllTime,
}

impl ReportPeriod {
    /// Start and end of this period, relative to `today`.
    ///
    /// `None` for all time.
    #[must_use]
    pub fn date_range(&self, today: NaiveDate) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let back = match self {
            Self::Today => 0,
            Self::Week => 6,
            Self::Month => 29,
            Self::AllTime => return None,
        };
        let start = local_midnight(today - Duration::days(back));
        let end = local_midnight(today + Duration::days(1));
        Some((start, end))
    }

    /// Parse period from string. Unknown values mean all time.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "today" | "t" | "d" => Self::Today,
            "week" | "w" | "7d" => Self::Week,
            "month" | "m" | "30d" => Self::Month,
            _ => Self::AllTime,
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Week => "This Week",
            Self::Month => "This Month",
            Self::AllTime => "All Time",
        }
    }
}

/// Start of a local calendar day, in UTC.
fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map_or_else(|| naive.and_utc(), |t| t.with_timezone(&Utc))
}

/// Focus time on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyFocus {
    pub date: NaiveDate,
    pub minutes: u32,
    pub sessions: u32,
}

/// Task count for one priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCount {
    pub priority: Priority,
    pub count: u32,
}

/// Productivity report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsReport {
    /// Report period name
    pub period: String,
    /// Completed work sessions in the period
    pub total_sessions: u32,
    /// Total focus time in minutes
    pub total_minutes: u32,
    /// Share of tasks completed, 0 to 100
    pub completion_rate: f64,
    /// Day with the most focus time
    pub most_productive_day: Option<DailyFocus>,
    /// Most recent days with data, oldest first
    pub daily: Vec<DailyFocus>,
    /// Tasks per priority, highest first
    pub by_priority: Vec<PriorityCount>,
    /// Consecutive days with focus time ending today or yesterday
    pub streak_days: u32,
}

impl StatsReport {
    /// Build a report from raw records.
    ///
    /// Sessions are grouped by local calendar date. Only work sessions
    /// count toward focus time.
    #[must_use]
    pub fn generate(
        period: ReportPeriod,
        sessions: &[SessionRecord],
        tasks: &[Task],
        today: NaiveDate,
    ) -> Self {
        let work: Vec<&SessionRecord> = sessions
            .iter()
            .filter(|s| s.kind == SessionKind::Work)
            .collect();

        let mut by_day: BTreeMap<NaiveDate, (u32, u32)> = BTreeMap::new();
        for session in &work {
            let entry = by_day
                .entry(session.completed_at_local().date_naive())
                .or_insert((0, 0));
            entry.0 += session.duration_seconds;
            entry.1 += 1;
        }

        let days: Vec<DailyFocus> = by_day
            .into_iter()
            .map(|(date, (seconds, sessions))| DailyFocus {
                date,
                minutes: seconds / 60,
                sessions,
            })
            .collect();

        let most_productive_day = days
            .iter()
            .fold(None::<&DailyFocus>, |best, day| match best {
                Some(b) if b.minutes >= day.minutes => Some(b),
                _ => Some(day),
            })
            .cloned();

        let daily = days[days.len().saturating_sub(DAILY_WINDOW)..].to_vec();
        let streak_days = streak(&days, today);

        let total_seconds: u32 = work.iter().map(|s| s.duration_seconds).sum();

        Self {
            period: period.display_name().to_string(),
            total_sessions: count_u32(work.len()),
            total_minutes: total_seconds / 60,
            completion_rate: completion_rate(tasks),
            most_productive_day,
            daily,
            by_priority: Priority::ALL
                .iter()
                .map(|p| PriorityCount {
                    priority: *p,
                    count: count_u32(tasks.iter().filter(|t| t.priority == *p).count()),
                })
                .collect(),
            streak_days,
        }
    }

    /// Total focus time in hours.
    #[must_use]
    pub fn total_hours(&self) -> f64 {
        f64::from(self.total_minutes) / 60.0
    }

    /// Format the report for display.
    #[must_use]
    pub fn format(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("{} {}", "Focus Report:".bold(), self.period));
        lines.push("═".repeat(50));
        lines.push(String::new());

        lines.push("Summary".bold().to_string());
        lines.push("─".repeat(40));
        lines.push(format!(
            "  Total focus time:    {}",
            format_duration(Duration::minutes(i64::from(self.total_minutes)))
        ));
        lines.push(format!("  Work sessions:       {}", self.total_sessions));
        lines.push(format!(
            "  Tasks completed:     {:.0}%",
            self.completion_rate
        ));
        lines.push(format!("  Current streak:      {} days", self.streak_days));
        match &self.most_productive_day {
            Some(day) => lines.push(format!(
                "  Most productive:     {} ({:.1} hours)",
                day.date.format("%A, %b %-d"),
                f64::from(day.minutes) / 60.0
            )),
            None => lines.push("  Most productive:     No data yet".to_string()),
        }
        lines.push(String::new());

        if !self.daily.is_empty() {
            lines.push("Study Minutes".bold().to_string());
            lines.push("─".repeat(40));
            let max = self.daily.iter().map(|d| d.minutes).max().unwrap_or(1).max(1);
            for day in &self.daily {
                lines.push(format!(
                    "  {} {:>4}m {}",
                    day.date.format("%a %b %d"),
                    day.minutes,
                    render_progress_bar(f64::from(day.minutes) / f64::from(max), 20).cyan()
                ));
            }
            lines.push(String::new());
        }

        lines.push("Tasks by Priority".bold().to_string());
        lines.push("─".repeat(40));
        for entry in &self.by_priority {
            let label = match entry.priority {
                Priority::High => entry.priority.to_string().red(),
                Priority::Medium => entry.priority.to_string().yellow(),
                Priority::Low => entry.priority.to_string().green(),
            };
            lines.push(format!("  {label:<8} {}", entry.count));
        }

        lines.join("\n")
    }
}

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Percentage of tasks completed, 0 when there are none.
fn completion_rate(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let done = tasks.iter().filter(|t| t.completed).count();
    f64::from(count_u32(done)) / f64::from(count_u32(tasks.len())) * 100.0
}

/// Consecutive days with focus time, counting back from today (or
/// yesterday when today has none yet).
fn streak(days: &[DailyFocus], today: NaiveDate) -> u32 {
    let has = |date: NaiveDate| days.iter().any(|d| d.date == date);

    let mut check = today;
    if !has(check) {
        check = today - Duration::days(1);
    }

    let mut streak = 0;
    while has(check) {
        streak += 1;
        check -= Duration::days(1);
    }
    streak
}
