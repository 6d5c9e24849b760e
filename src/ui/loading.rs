use ratatui::{prelude::*, widgets::Paragraph};

use crate::quiz::QuizSession;

use super::{centered, title_line};

pub fn render(frame: &mut Frame, area: Rect, session: &QuizSession) {
    let area = centered(area, 60, 7);

    let content = vec![
        title_line(),
        Line::from(""),
        Line::from(Span::styled(
            "Generating Quiz...",
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(Span::styled(
            format!("Level: {}", session.difficulty()),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "esc cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(
        Paragraph::new(content).alignment(Alignment::Center),
        area,
    );
}
