//! UI rendering for the timer screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::features::countdown::format_seconds_mmss;
use crate::features::pomodoro::{Phase, TimerSnapshot};
use crate::features::tasks::Priority;
use crate::tui::app::App;

const fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Work => Color::Red,
        Phase::ShortBreak => Color::Green,
        Phase::LongBreak => Color::Blue,
    }
}

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let snapshot = app.snapshot();

    // Header, clock, progress, quote, task list, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, &snapshot, chunks[0]);
    render_clock(frame, app, &snapshot, chunks[1]);
    render_progress(frame, &snapshot, chunks[2]);
    render_quote(frame, &snapshot, chunks[3]);
    render_tasks(frame, app, &snapshot, chunks[4]);
    render_status_bar(frame, app, chunks[5]);
}

fn render_header(frame: &mut Frame<'_>, snapshot: &TimerSnapshot, area: Rect) {
    let color = phase_color(snapshot.state.phase);
    let title = format!(
        " {}  ·  {} completed  ·  long break every {} ",
        snapshot.state.phase,
        snapshot.state.completed_work_sessions,
        snapshot.config.long_break_interval()
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );

    frame.render_widget(header, area);
}

fn render_clock(frame: &mut Frame<'_>, app: &App, snapshot: &TimerSnapshot, area: Rect) {
    let state_label = if snapshot.state.is_running {
        Span::styled("running", Style::default().fg(Color::Green))
    } else {
        Span::styled("paused", Style::default().fg(Color::Yellow))
    };

    let mut spans = vec![
        Span::styled(
            format_seconds_mmss(snapshot.state.remaining_seconds),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        state_label,
    ];

    if let Some(title) = app.active_task_title() {
        spans.push(Span::styled(
            format!("  ▸ {title}"),
            Style::default().fg(Color::Cyan),
        ));
    }

    let clock = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(clock, area);
}

fn render_progress(frame: &mut Frame<'_>, snapshot: &TimerSnapshot, area: Rect) {
    let progress = snapshot.progress().clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(phase_color(snapshot.state.phase)))
        .ratio(progress)
        .label(format!("{:.0}%", progress * 100.0));

    frame.render_widget(gauge, area);
}

fn render_quote(frame: &mut Frame<'_>, snapshot: &TimerSnapshot, area: Rect) {
    let quote = Paragraph::new(snapshot.quote.unwrap_or_default())
        .style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::ITALIC),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(quote, area);
}

fn render_tasks(frame: &mut Frame<'_>, app: &App, snapshot: &TimerSnapshot, area: Rect) {
    let items: Vec<ListItem<'_>> = app
        .tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let is_selected = i == app.selected;
            let is_active = snapshot.active_task == Some(task.id);

            let mut spans = vec![
                Span::styled(
                    if is_active { "▸ " } else { "  " },
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    &task.title,
                    Style::default().add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
                ),
                Span::styled(
                    format!("  {}", task.priority.as_str()),
                    Style::default().fg(match task.priority {
                        Priority::High => Color::Red,
                        Priority::Medium => Color::Yellow,
                        Priority::Low => Color::Green,
                    }),
                ),
            ];

            if let Some(deadline) = task.deadline {
                spans.push(Span::styled(
                    format!("  {deadline}"),
                    Style::default().fg(Color::Yellow),
                ));
            }

            if task.sessions > 0 {
                spans.push(Span::styled(
                    format!("  {} sessions", task.sessions),
                    Style::default().fg(Color::DarkGray),
                ));
            }

            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" Tasks ({}) ", app.tasks.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    if !app.tasks.is_empty() {
        state.select(Some(app.selected));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_text = app
        .status
        .as_deref()
        .unwrap_or("space:start/pause | s:skip | r:reset | ?:help | q:quit");

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
