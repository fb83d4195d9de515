use chrono::{DateTime, NaiveDate, Utc};
use colored::{ColoredString, Colorize};

use crate::features::countdown::format_seconds_mmss;
use crate::features::goals::{Goal, Urgency};
use crate::features::notes::Note;
use crate::features::pomodoro::{AlertPreferences, SessionRecord, TimerConfig};
use crate::features::tasks::{Priority, Task};

fn priority_label(priority: Priority) -> ColoredString {
    match priority {
        Priority::High => "high".red(),
        Priority::Medium => "medium".yellow(),
        Priority::Low => "low".green(),
    }
}

fn check_icon(completed: bool) -> ColoredString {
    if completed {
        "[x]".green()
    } else {
        "[ ]".white()
    }
}

/// Format a list of tasks as a pretty table
pub fn format_tasks_pretty(tasks: &[Task], title: &str, today: NaiveDate) -> String {
    if tasks.is_empty() {
        return format!("{title} (0 items)\n  No tasks");
    }

    let mut output = format!("{} ({} items)\n", title, tasks.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for task in tasks {
        let name = if task.completed {
            task.title.strikethrough().to_string()
        } else {
            task.title.bold().to_string()
        };

        let mut line = format!(
            "{} {} {}  {}",
            format!("#{}", task.id).dimmed(),
            check_icon(task.completed),
            name,
            priority_label(task.priority)
        );

        if let Some(category) = &task.category {
            line.push_str(&format!("  {}", category.dimmed()));
        }

        if let Some(deadline) = task.deadline {
            let due = deadline.to_string();
            if task.is_overdue(today) {
                line.push_str(&format!("  {}", due.red()));
            } else {
                line.push_str(&format!("  {}", due.yellow()));
            }
        }

        if task.sessions > 0 {
            line.push_str(&format!("  {}", format!("{}🍅", task.sessions).magenta()));
        }

        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a single task as pretty output
pub fn format_task_pretty(task: &Task) -> String {
    let mut output = format!("{} {}\n", check_icon(task.completed), task.title.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), task.id));
    output.push_str(&format!("  {}: {}\n", "Priority".dimmed(), task.priority));

    if let Some(description) = &task.description {
        output.push_str(&format!("  {}: {}\n", "Description".dimmed(), description));
    }

    if let Some(category) = &task.category {
        output.push_str(&format!("  {}: {}\n", "Category".dimmed(), category));
    }

    if let Some(deadline) = task.deadline {
        output.push_str(&format!("  {}: {}\n", "Deadline".dimmed(), deadline));
    }

    if let Some(url) = &task.playlist_url {
        output.push_str(&format!("  {}: {}\n", "Playlist".dimmed(), url));
    }

    output.push_str(&format!("  {}: {}\n", "Sessions".dimmed(), task.sessions));
    output.push_str(&format!(
        "  {}: {}\n",
        "Created".dimmed(),
        task.created.format("%Y-%m-%d %H:%M")
    ));

    if let Some(updated) = task.updated {
        output.push_str(&format!(
            "  {}: {}\n",
            "Updated".dimmed(),
            updated.format("%Y-%m-%d %H:%M")
        ));
    }

    output
}

fn urgency_label(goal: &Goal, now: DateTime<Utc>) -> ColoredString {
    match goal.urgency(now) {
        Urgency::Done => "done".green(),
        Urgency::Due => "due today".red().bold(),
        Urgency::Soon => format!("{}d left", goal.days_remaining(now)).yellow(),
        Urgency::OnTrack => format!("{}d left", goal.days_remaining(now)).normal(),
    }
}

/// Format a list of goals as pretty output
pub fn format_goals_pretty(goals: &[Goal], now: DateTime<Utc>) -> String {
    if goals.is_empty() {
        return "Goals (0)\n  No goals".to_string();
    }

    let mut output = format!("Goals ({})\n", goals.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for goal in goals {
        let icon = if goal.completed { "✓".green() } else { "▸".white() };
        let mut line = format!(
            "{} {} {}  {}%  {}",
            format!("#{}", goal.id).dimmed(),
            icon,
            goal.title.bold(),
            goal.progress,
            urgency_label(goal, now)
        );

        if !goal.milestones.is_empty() {
            let done = goal.milestones.iter().filter(|m| m.completed).count();
            line.push_str(&format!(
                "  {}",
                format!("{done}/{} milestones", goal.milestones.len()).dimmed()
            ));
        }

        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a single goal with its milestones
pub fn format_goal_pretty(goal: &Goal, now: DateTime<Utc>) -> String {
    let icon = if goal.completed { "✓".green() } else { "▸".white() };
    let mut output = format!("{} {}\n", icon, goal.title.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), goal.id));
    output.push_str(&format!("  {}: {}%\n", "Progress".dimmed(), goal.progress));
    output.push_str(&format!(
        "  {}: {} ({})\n",
        "Target".dimmed(),
        goal.target_date.format("%Y-%m-%d"),
        urgency_label(goal, now)
    ));

    if let Some(description) = &goal.description {
        output.push_str(&format!("  {}: {}\n", "Description".dimmed(), description));
    }

    if let Some(category) = &goal.category {
        output.push_str(&format!("  {}: {}\n", "Category".dimmed(), category));
    }

    if !goal.milestones.is_empty() {
        output.push_str(&format!("  {}:\n", "Milestones".dimmed()));
        for milestone in &goal.milestones {
            output.push_str(&format!(
                "    {} {} {}\n",
                check_icon(milestone.completed),
                milestone.title,
                format!("(#{})", milestone.id).dimmed()
            ));
        }
    }

    output
}

/// Format a list of notes as pretty output
pub fn format_notes_pretty(notes: &[Note], title: &str) -> String {
    if notes.is_empty() {
        return format!("{title} (0)\n  No notes");
    }

    let mut output = format!("{} ({})\n", title, notes.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for note in notes {
        let mut line = format!(
            "{} {}  {}",
            format!("#{}", note.id).dimmed(),
            note.title.bold(),
            note.last_edited.format("%Y-%m-%d").to_string().dimmed()
        );

        if !note.tags.is_empty() {
            let tags_str = note
                .tags
                .iter()
                .map(|t| format!("#{t}"))
                .collect::<Vec<_>>()
                .join(" ");
            line.push_str(&format!("  {}", tags_str.cyan()));
        }

        output.push_str(&line);
        output.push('\n');

        let preview = note.preview(60);
        if !preview.is_empty() {
            output.push_str(&format!("    {}\n", preview.dimmed()));
        }
    }

    output
}

/// Format a single note as pretty output
pub fn format_note_pretty(note: &Note) -> String {
    let mut output = format!("{}\n", note.title.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), note.id));

    if !note.tags.is_empty() {
        output.push_str(&format!("  {}: {}\n", "Tags".dimmed(), note.tags.join(", ")));
    }

    output.push_str(&format!(
        "  {}: {}\n",
        "Edited".dimmed(),
        note.last_edited.format("%Y-%m-%d %H:%M")
    ));

    if !note.content.is_empty() {
        output.push('\n');
        output.push_str(&note.content);
        output.push('\n');
    }

    output
}

/// Format logged sessions, newest first
pub fn format_sessions_pretty(sessions: &[SessionRecord]) -> String {
    if sessions.is_empty() {
        return "Sessions (0)\n  No sessions logged yet".to_string();
    }

    let mut output = format!("Sessions ({})\n", sessions.len());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    for session in sessions {
        output.push_str(&format!(
            "  {}  {:<6} {}\n",
            session
                .completed_at_local()
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .dimmed(),
            session.kind,
            format_seconds_mmss(session.duration_seconds).cyan()
        ));
    }

    output
}

/// Format timer settings, alert preferences and the work counter
pub fn format_timer_settings_pretty(
    config: &TimerConfig,
    alerts: &AlertPreferences,
    completed_work_sessions: u32,
) -> String {
    let on_off = |enabled: bool| if enabled { "on".green() } else { "off".red() };

    let mut output = format!("{}\n", "Pomodoro Settings".bold());
    output.push_str(&"─".repeat(40));
    output.push('\n');
    output.push_str(&format!(
        "  {}: {} min\n",
        "Work".dimmed(),
        config.work_seconds() / 60
    ));
    output.push_str(&format!(
        "  {}: {} min\n",
        "Short break".dimmed(),
        config.short_break_seconds() / 60
    ));
    output.push_str(&format!(
        "  {}: {} min\n",
        "Long break".dimmed(),
        config.long_break_seconds() / 60
    ));
    output.push_str(&format!(
        "  {}: every {} work sessions\n",
        "Long break".dimmed(),
        config.long_break_interval()
    ));
    output.push_str(&format!("  {}: {}\n", "Sound".dimmed(), on_off(alerts.sound_enabled)));
    output.push_str(&format!(
        "  {}: {}\n",
        "Notifications".dimmed(),
        on_off(alerts.notifications_enabled)
    ));
    output.push_str(&format!("  {}: {}\n", "Cue".dimmed(), alerts.cue));
    output.push_str(&format!(
        "  {}: {}\n",
        "Completed work sessions".dimmed(),
        completed_work_sessions.to_string().magenta()
    ));

    output
}
