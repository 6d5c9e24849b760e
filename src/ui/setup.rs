use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::Difficulty;
use crate::quiz::{Phase, QuizSession};

use super::{centered, title_line};

pub fn render<G>(frame: &mut Frame, area: Rect, app: &App<G>) {
    let session = app.session();
    let banner_height = if session.is_paused() { 4 } else { 0 };

    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(banner_height),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    frame.render_widget(
        Paragraph::new(title_line()).alignment(Alignment::Center),
        chunks[0],
    );
    if session.is_paused() {
        render_resume_banner(frame, chunks[1], session);
    }
    render_word_input(frame, chunks[2], session.words_raw());
    render_difficulty(frame, chunks[3], session.difficulty());
    render_status(frame, chunks[4], session);
    render_controls(frame, chunks[5], session.is_paused());

    if let Some(path) = app.image_prompt() {
        render_image_prompt(frame, area, path);
    }
}

fn render_resume_banner(frame: &mut Frame, area: Rect, session: &QuizSession) {
    let detail = match session.paused_from() {
        Some(Phase::Completed) => format!(
            "Finished quiz: {} / {} correct.",
            session.score(),
            session.total()
        ),
        _ => format!(
            "You are at question {} of {}.",
            session.current_index() + 1,
            session.total()
        ),
    };

    let content = vec![
        Line::from(Span::styled(
            "Quiz in progress!",
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(Span::styled(detail, Style::default().fg(Color::Yellow))),
    ];

    let widget = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(Color::Yellow))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_word_input(frame: &mut Frame, area: Rect, words_raw: &str) {
    let mut lines: Vec<Line> = words_raw.split('\n').map(Line::from).collect();
    if let Some(last) = lines.last_mut() {
        last.push_span(Span::styled("_", Style::default().fg(Color::Yellow)));
    }
    if words_raw.is_empty() {
        lines = vec![Line::from(vec![
            Span::styled("_", Style::default().fg(Color::Yellow)),
            Span::styled(
                " e.g. apple, running, beautiful, 快樂, 學校",
                Style::default().fg(Color::DarkGray),
            ),
        ])];
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Vocabulary List ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_difficulty(frame: &mut Frame, area: Rect, selected: Difficulty) {
    let mut spans = Vec::with_capacity(Difficulty::ALL.len() * 2);
    for level in Difficulty::ALL {
        let style = if level == selected {
            Style::default().fg(Color::Cyan).bold().reversed()
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", level.label()), style));
        spans.push(Span::raw("  "));
    }

    let widget = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Level ")
                .title_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(widget, area);
}

fn render_status(frame: &mut Frame, area: Rect, session: &QuizSession) {
    let line = if let Some(error) = session.error() {
        Line::from(vec![
            Span::styled("Error: ", Style::default().fg(Color::Red).bold()),
            Span::styled(error, Style::default().fg(Color::Red)),
        ])
    } else if session.is_extracting() {
        Line::from(Span::styled(
            "Scanning image for vocabulary...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from("")
    };

    frame.render_widget(
        Paragraph::new(line).wrap(Wrap { trim: true }).alignment(Alignment::Center),
        area,
    );
}

fn render_controls(frame: &mut Frame, area: Rect, paused: bool) {
    let text = if paused {
        "enter generate  ·  ←/→ level  ·  ^o scan image  ·  ^r resume  ·  ^d discard  ·  esc quit"
    } else {
        "enter generate  ·  ←/→ level  ·  ^n new line  ·  ^o scan image  ·  esc quit"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_image_prompt(frame: &mut Frame, area: Rect, path: &str) {
    let popup = centered(area, 64, 7);
    frame.render_widget(Clear, popup);

    let content = vec![
        Line::from(Span::styled(
            "Path to a photo (JPEG):",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(path, Style::default().fg(Color::Yellow)),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] scan  ·  [Esc] cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Scan from Image ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, popup);
}
