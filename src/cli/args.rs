use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::features::goals::GoalFilter;
use crate::features::tasks::{Priority, TaskFilter, TaskSort};

#[derive(Parser)]
#[command(name = "focusdeck")]
#[command(about = "A terminal Pomodoro timer with tasks, goals, notes and focus analytics")]
#[command(long_about = "focusdeck - focus timer and study planner for the terminal

Runs Pomodoro work/break cycles, credits finished work sessions to tasks,
and keeps goals, notes and a session log in a local SQLite database.

QUICK START:
  focusdeck pomodoro run             Start the interactive timer
  focusdeck task add \"Read ch. 3\"    Add a task
  focusdeck stats report             Focus minutes for the last 7 days
  focusdeck countdown 45m            Plain countdown timer
  focusdeck stopwatch                Count up until you stop it

DATA:
  Everything lives under $FOCUSDECK_HOME (default ~/.focusdeck).

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pomodoro timer
    ///
    /// # Subcommands
    ///
    ///   run      Interactive timer screen
    ///   status   Persisted settings and counters
    ///   reset    Zero the completed work counter
    ///   history  Recently logged work sessions
    ///
    /// # Examples
    ///
    ///   focusdeck pomodoro run --task 3
    ///   focusdeck p status -o json
    #[command(alias = "p")]
    Pomodoro(PomodoroArgs),

    /// Timer durations and alert preferences
    ///
    /// # Examples
    ///
    ///   focusdeck settings show
    ///   focusdeck settings set --work 50 --short-break 10
    ///   focusdeck settings alerts --sound off
    Settings(SettingsArgs),

    /// Manage tasks
    ///
    /// # Examples
    ///
    ///   focusdeck task add "Essay draft" --priority high --deadline 2024-05-01
    ///   focusdeck task list --filter pending --sort deadline
    ///   focusdeck task done 4
    #[command(alias = "t")]
    Task(TaskArgs),

    /// Manage goals and milestones
    ///
    /// # Examples
    ///
    ///   focusdeck goal add "Finish course" --days 30 -m "Module 1" -m "Module 2"
    ///   focusdeck goal check 1 2
    ///   focusdeck goal progress 1 80
    #[command(alias = "g")]
    Goal(GoalArgs),

    /// Manage notes
    ///
    /// # Examples
    ///
    ///   focusdeck note new --title "Lecture 4" --tag exam
    ///   focusdeck note search mitochondria
    ///   focusdeck note export
    #[command(alias = "n")]
    Note(NoteArgs),

    /// Focus analytics and calendar
    ///
    /// # Examples
    ///
    ///   focusdeck stats report --period week
    ///   focusdeck stats agenda --month 2024-05
    Stats(StatsArgs),

    /// Run a plain countdown timer
    ///
    /// Accepts a duration string (25, 25m, 1h30m, 90s) or explicit
    /// hours/minutes/seconds fields.
    ///
    /// # Examples
    ///
    ///   focusdeck countdown 10m
    ///   focusdeck countdown --hours 1 --minutes 15
    Countdown(CountdownArgs),

    /// Run a stopwatch in the terminal
    ///
    /// Keys: space starts/stops, r resets, q or Enter finishes and prints
    /// the elapsed time.
    ///
    /// # Examples
    ///
    ///   focusdeck stopwatch
    ///   focusdeck stopwatch --paused
    #[command(alias = "sw")]
    Stopwatch(StopwatchArgs),

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   focusdeck completions zsh > ~/.zsh/completions/_focusdeck
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Arguments for the Pomodoro timer.
#[derive(Args)]
pub struct PomodoroArgs {
    #[command(subcommand)]
    pub command: PomodoroCommands,
}

/// Pomodoro subcommands.
#[derive(Subcommand)]
pub enum PomodoroCommands {
    /// Open the interactive timer
    ///
    /// Keys: space start/pause, s skip, r reset, j/k select task,
    /// Enter attach task, q quit.
    Run {
        /// Task credited for completed work sessions
        #[arg(long, short = 't')]
        task: Option<i64>,

        /// Start counting immediately
        #[arg(long)]
        start: bool,
    },

    /// Show settings and the completed work counter
    Status,

    /// Zero the completed work counter
    Reset,

    /// Show recently logged work sessions
    History {
        /// Number of sessions to show
        #[arg(long, short = 'n', default_value = "10")]
        limit: usize,
    },
}

/// Arguments for settings.
#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommands,
}

/// Settings subcommands.
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show timer durations and alert preferences
    Show,

    /// Change timer durations (minutes)
    Set {
        /// Work duration in minutes
        #[arg(long)]
        work: Option<u32>,

        /// Short break duration in minutes
        #[arg(long)]
        short_break: Option<u32>,

        /// Long break duration in minutes
        #[arg(long)]
        long_break: Option<u32>,

        /// Work sessions between long breaks (at least 2)
        #[arg(long)]
        interval: Option<u32>,
    },

    /// Change sound and notification preferences
    Alerts {
        /// Play a cue when a phase ends
        #[arg(long, value_enum)]
        sound: Option<Toggle>,

        /// Show a desktop notification when a phase ends
        #[arg(long, value_enum)]
        notifications: Option<Toggle>,

        /// Cue to play: alarm, chime, bell, or a path to an audio file
        #[arg(long)]
        cue: Option<String>,
    },
}

/// On/off switch.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
}

impl From<Toggle> for bool {
    fn from(toggle: Toggle) -> Self {
        toggle == Toggle::On
    }
}

/// Arguments for tasks.
#[derive(Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommands,
}

/// Task subcommands.
#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task
    Add {
        /// Task title
        title: String,

        /// Longer description
        #[arg(long, short = 'd')]
        description: Option<String>,

        /// Priority (high, medium, low)
        #[arg(long, short = 'p', value_enum)]
        priority: Option<PriorityArg>,

        /// Category
        #[arg(long, short = 'c')]
        category: Option<String>,

        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<String>,

        /// Playlist or resource URL for this task
        #[arg(long)]
        playlist: Option<String>,
    },

    /// List tasks
    #[command(alias = "ls")]
    List {
        /// Which tasks to show
        #[arg(long, short = 'f', value_enum, default_value = "all")]
        filter: TaskFilterArg,

        /// Sort order (defaults to `tasks.default_sort` from config)
        #[arg(long, short = 's', value_enum)]
        sort: Option<TaskSortArg>,
    },

    /// Show one task
    Show {
        /// Task ID
        id: i64,
    },

    /// Edit a task
    Edit {
        /// Task ID
        id: i64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long, short = 'd')]
        description: Option<String>,

        /// New priority
        #[arg(long, short = 'p', value_enum)]
        priority: Option<PriorityArg>,

        /// New category
        #[arg(long, short = 'c')]
        category: Option<String>,

        /// New deadline (YYYY-MM-DD), or "none" to clear
        #[arg(long)]
        deadline: Option<String>,

        /// New playlist URL, or "none" to clear
        #[arg(long)]
        playlist: Option<String>,
    },

    /// Toggle a task's completed flag
    Done {
        /// Task ID
        id: i64,
    },

    /// Delete a task
    #[command(alias = "rm")]
    Delete {
        /// Task ID
        id: i64,
    },
}

/// Priority as a CLI value.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriorityArg {
    High,
    Medium,
    Low,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::High => Self::High,
            PriorityArg::Medium => Self::Medium,
            PriorityArg::Low => Self::Low,
        }
    }
}

/// Task filter as a CLI value.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskFilterArg {
    All,
    Pending,
    Completed,
}

impl From<TaskFilterArg> for TaskFilter {
    fn from(arg: TaskFilterArg) -> Self {
        match arg {
            TaskFilterArg::All => Self::All,
            TaskFilterArg::Pending => Self::Pending,
            TaskFilterArg::Completed => Self::Completed,
        }
    }
}

/// Task sort as a CLI value.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskSortArg {
    Priority,
    Deadline,
    Sessions,
}

impl From<TaskSortArg> for TaskSort {
    fn from(arg: TaskSortArg) -> Self {
        match arg {
            TaskSortArg::Priority => Self::Priority,
            TaskSortArg::Deadline => Self::Deadline,
            TaskSortArg::Sessions => Self::Sessions,
        }
    }
}

/// Arguments for goals.
#[derive(Args)]
pub struct GoalArgs {
    #[command(subcommand)]
    pub command: GoalCommands,
}

/// Goal subcommands.
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Add a goal
    Add {
        /// Goal title
        title: String,

        /// Longer description
        #[arg(long, short = 'd')]
        description: Option<String>,

        /// Category
        #[arg(long, short = 'c')]
        category: Option<String>,

        /// Days until the target date (defaults to `goals.default_duration_days`)
        #[arg(long)]
        days: Option<u32>,

        /// Milestone (repeatable)
        #[arg(long = "milestone", short = 'm')]
        milestones: Vec<String>,
    },

    /// List goals
    #[command(alias = "ls")]
    List {
        /// Which goals to show
        #[arg(long, short = 'f', value_enum, default_value = "all")]
        filter: GoalFilterArg,
    },

    /// Show one goal with its milestones
    Show {
        /// Goal ID
        id: i64,
    },

    /// Set progress directly (0-100); 100 completes the goal
    Progress {
        /// Goal ID
        id: i64,

        /// Percent complete
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        percent: u8,
    },

    /// Toggle a goal's completed flag
    Done {
        /// Goal ID
        id: i64,
    },

    /// Add a milestone to a goal
    Milestone {
        /// Goal ID
        id: i64,

        /// Milestone title
        title: String,
    },

    /// Toggle a milestone; progress follows the milestones
    Check {
        /// Goal ID
        id: i64,

        /// Milestone ID
        milestone: i64,
    },

    /// Delete a goal
    #[command(alias = "rm")]
    Delete {
        /// Goal ID
        id: i64,
    },
}

/// Goal filter as a CLI value.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoalFilterArg {
    All,
    Active,
    Completed,
}

impl From<GoalFilterArg> for GoalFilter {
    fn from(arg: GoalFilterArg) -> Self {
        match arg {
            GoalFilterArg::All => Self::All,
            GoalFilterArg::Active => Self::Active,
            GoalFilterArg::Completed => Self::Completed,
        }
    }
}

/// Arguments for notes.
#[derive(Args)]
pub struct NoteArgs {
    #[command(subcommand)]
    pub command: NoteCommands,
}

/// Note subcommands.
#[derive(Subcommand)]
pub enum NoteCommands {
    /// Create a note
    New {
        /// Title (defaults to "Untitled Note")
        #[arg(long, short = 't')]
        title: Option<String>,

        /// Content
        #[arg(long, short = 'c', default_value = "")]
        content: String,

        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// List notes, most recently edited first
    #[command(alias = "ls")]
    List,

    /// Show one note
    Show {
        /// Note ID
        id: i64,
    },

    /// Edit a note's title or content
    Edit {
        /// Note ID
        id: i64,

        /// New title
        #[arg(long, short = 't')]
        title: Option<String>,

        /// New content
        #[arg(long, short = 'c')]
        content: Option<String>,
    },

    /// Search titles, content and tags
    Search {
        /// Search term (case-insensitive)
        term: String,
    },

    /// Add a tag to a note
    Tag {
        /// Note ID
        id: i64,

        /// Tag
        tag: String,
    },

    /// Remove a tag from a note
    Untag {
        /// Note ID
        id: i64,

        /// Tag
        tag: String,
    },

    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        /// Note ID
        id: i64,
    },

    /// Export all notes as JSON
    Export {
        /// Directory to write to (defaults to the exports directory)
        #[arg(long)]
        dir: Option<std::path::PathBuf>,
    },
}

/// Arguments for statistics.
#[derive(Args)]
pub struct StatsArgs {
    #[command(subcommand)]
    pub command: Option<StatsCommands>,
}

/// Statistics subcommands.
#[derive(Subcommand)]
pub enum StatsCommands {
    /// Focus minutes per day, totals and tasks by priority
    Report {
        /// Time period (today, week, month, all)
        #[arg(long, short = 'p', default_value = "all")]
        period: String,
    },

    /// Task deadlines and sessions for a month
    Agenda {
        /// Month as YYYY-MM (defaults to the current month)
        #[arg(long, short = 'm')]
        month: Option<String>,
    },
}

/// Arguments for the countdown timer.
#[derive(Args)]
pub struct CountdownArgs {
    /// Duration (e.g., 25, 25m, 1h30m, 90s)
    #[arg(conflicts_with_all = ["hours", "minutes", "seconds"])]
    pub duration: Option<String>,

    /// Hours (0-99)
    #[arg(long = "hours", short = 'H')]
    pub hours: Option<u32>,

    /// Minutes (0-59)
    #[arg(long = "minutes", short = 'M')]
    pub minutes: Option<u32>,

    /// Seconds (0-59)
    #[arg(long = "seconds", short = 'S')]
    pub seconds: Option<u32>,

    /// Skip the sound and notification at the end
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Arguments for the stopwatch.
#[derive(Args)]
pub struct StopwatchArgs {
    /// Wait for space before counting
    #[arg(long)]
    pub paused: bool,
}
