//! UI rendering for the exercise TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::features::exercise::Phase;
use crate::features::session::{
    AbortReason, NoticeLevel, RunStatus, SessionLifecycle, DISCLAIMER,
};
use crate::tui::app::App;

const HELP: &str = "space:pause | +/-:rounds | e:end | x:stop | q:quit";

/// Render the application UI.
pub fn render<L: SessionLifecycle>(frame: &mut Frame<'_>, app: &App<L>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(7),    // Phase
            Constraint::Length(3), // Progress
            Constraint::Length(3), // Notices
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_body(frame, app, chunks[1]);
    render_progress(frame, app, chunks[2]);
    render_notices(frame, app, chunks[3]);
    render_status_bar(frame, app, chunks[4]);
}

fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Inhale => Color::Cyan,
        Phase::Hold => Color::Yellow,
        Phase::Exhale => Color::Green,
        Phase::HoldEmpty => Color::Magenta,
    }
}

fn render_header<L: SessionLifecycle>(frame: &mut Frame<'_>, app: &App<L>, area: Rect) {
    let exercise = app.machine.exercise();
    let title = format!(" {} ({}) ", exercise.name, exercise.pattern.notation());

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

fn render_body<L: SessionLifecycle>(frame: &mut Frame<'_>, app: &App<L>, area: Rect) {
    let state = app.machine.state();
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let lines: Vec<Line<'_>> = match app.machine.status() {
        RunStatus::AwaitingDisclaimer => vec![
            Line::from(Span::styled("Before you begin", bold)),
            Line::from(""),
            Line::from(DISCLAIMER),
            Line::from(""),
            Line::from(Span::styled(
                "y: I understand, start | n: not now",
                Style::default().fg(Color::Yellow),
            )),
        ],
        RunStatus::Idle => vec![Line::from("Press s to start")],
        RunStatus::Countdown { remaining } => vec![
            Line::from("Starting in"),
            Line::from(""),
            Line::from(Span::styled(remaining.to_string(), bold.fg(Color::Cyan))),
        ],
        RunStatus::Running => {
            let color = phase_color(state.phase);
            let mut lines = vec![
                Line::from(Span::styled(state.phase.display_name().to_uppercase(), bold.fg(color))),
                Line::from(""),
                Line::from(Span::styled(
                    app.machine.phase_seconds_remaining().to_string(),
                    bold,
                )),
                Line::from(""),
                Line::from(state.phase.instruction()),
            ];
            if !app.machine.is_breathing() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "PAUSED",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK),
                )));
            }
            lines
        }
        RunStatus::Completed => {
            let mut lines = vec![Line::from(Span::styled(
                "Session complete",
                bold.fg(Color::Green),
            ))];
            if let Some(summary) = app.summary() {
                lines.push(Line::from(""));
                lines.push(Line::from(format!(
                    "{} rounds in {}s",
                    summary.rounds_completed, summary.duration_seconds_elapsed
                )));
            }
            lines
        }
        RunStatus::Aborted { reason } => vec![Line::from(Span::styled(
            match reason {
                AbortReason::EndedByUser => "Session ended early",
                AbortReason::EmergencyStop => "Exercise stopped",
            },
            bold.fg(Color::Yellow),
        ))],
    };

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(body, area);
}

fn render_progress<L: SessionLifecycle>(frame: &mut Frame<'_>, app: &App<L>, area: Rect) {
    let state = app.machine.state();
    let running = app.machine.status() == RunStatus::Running;

    let round = if running {
        state.current_round + 1
    } else {
        state.current_round
    };
    let label = format!("Round {} of {}", round, state.total_rounds);

    let ratio = if running {
        state.phase_progress_fraction.clamp(0.0, 1.0)
    } else if app.machine.status() == RunStatus::Completed {
        1.0
    } else {
        0.0
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(phase_color(state.phase)))
        .ratio(ratio)
        .label(label);

    frame.render_widget(gauge, area);
}

fn render_notices<L: SessionLifecycle>(frame: &mut Frame<'_>, app: &App<L>, area: Rect) {
    let lines: Vec<Line<'_>> = app
        .notices
        .iter()
        .map(|notice| {
            let color = match notice.level {
                NoticeLevel::Info => Color::Blue,
                NoticeLevel::Warning => Color::Yellow,
            };
            Line::from(Span::styled(notice.message.as_str(), Style::default().fg(color)))
        })
        .collect();

    let notices = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(notices, area);
}

fn render_status_bar<L: SessionLifecycle>(frame: &mut Frame<'_>, app: &App<L>, area: Rect) {
    let status_text = app.status.as_deref().unwrap_or(HELP);
    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(status, area);
}
