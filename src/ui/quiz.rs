use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::QuizItem;
use crate::quiz::{AnswerStatus, QuizSession};

const BLANK: &str = "________";

pub fn render<G>(frame: &mut Frame, area: Rect, app: &App<G>) {
    let session = app.session();
    let Some(item) = session.current_item() else {
        return;
    };
    let status = session.answer_status();

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], session);
    render_original_word(frame, chunks[1], item);
    render_sentence(frame, chunks[2], item, status);
    render_hint(frame, chunks[3], item, app.hint_visible());
    render_input(frame, chunks[4], app.answer_input(), status);
    if let Some(feedback) = app.feedback() {
        render_feedback(frame, chunks[5], &feedback, status);
    }
    render_controls(frame, chunks[6], status);
}

fn render_progress(frame: &mut Frame, area: Rect, session: &QuizSession) {
    let chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let left = Line::from(vec![
        Span::styled(
            format!("Question {}/{}", session.current_index() + 1, session.total()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("  ·  {}", session.difficulty()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(left), chunks[0]);

    let score = Paragraph::new(format!("Score: {}", session.score()))
        .alignment(Alignment::Right)
        .fg(Color::Green);
    frame.render_widget(score, chunks[1]);
}

fn render_original_word(frame: &mut Frame, area: Rect, item: &QuizItem) {
    let line = Line::from(vec![
        Span::styled("Word: ", Style::default().fg(Color::Gray)),
        Span::styled(
            item.original_word.as_str(),
            Style::default().fg(Color::Cyan).bold(),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_sentence(frame: &mut Frame, area: Rect, item: &QuizItem, status: AnswerStatus) {
    let gap = match status {
        AnswerStatus::Correct => Span::styled(
            item.correct_form.as_str(),
            Style::default().fg(Color::Green).bold().underlined(),
        ),
        AnswerStatus::Revealed => Span::styled(
            item.correct_form.as_str(),
            Style::default().fg(Color::Yellow).bold().underlined(),
        ),
        AnswerStatus::Unanswered | AnswerStatus::Incorrect => {
            Span::styled(BLANK, Style::default().fg(Color::Cyan))
        }
    };

    let line = Line::from(vec![
        Span::styled(item.sentence_before.as_str(), Style::default().fg(Color::White)),
        gap,
        Span::styled(item.sentence_after.as_str(), Style::default().fg(Color::White)),
    ]);

    let widget = Paragraph::new(line).wrap(Wrap { trim: true }).bold().block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::uniform(1)),
    );
    frame.render_widget(widget, area);
}

fn render_hint(frame: &mut Frame, area: Rect, item: &QuizItem, visible: bool) {
    let line = match (&item.translation_hint, visible) {
        (Some(hint), true) => Line::from(vec![
            Span::styled("Hint: ", Style::default().fg(Color::Yellow).bold()),
            Span::styled(hint.as_str(), Style::default().fg(Color::Yellow)),
        ]),
        (Some(_), false) => Line::from(Span::styled(
            "tab show translation hint",
            Style::default().fg(Color::DarkGray),
        )),
        (None, _) => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), area);
}

fn render_input(frame: &mut Frame, area: Rect, input: &str, status: AnswerStatus) {
    let border = match status {
        AnswerStatus::Correct => Color::Green,
        AnswerStatus::Incorrect => Color::Red,
        AnswerStatus::Revealed => Color::Yellow,
        AnswerStatus::Unanswered => Color::Cyan,
    };

    let mut spans = vec![Span::styled(input, Style::default().fg(Color::White))];
    if !status.is_resolved() {
        spans.push(Span::styled("_", Style::default().fg(Color::Cyan)));
    }

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Your answer ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_feedback(frame: &mut Frame, area: Rect, feedback: &str, status: AnswerStatus) {
    let color = match status {
        AnswerStatus::Correct => Color::Green,
        AnswerStatus::Revealed => Color::Yellow,
        _ => Color::Red,
    };
    let widget = Paragraph::new(feedback)
        .alignment(Alignment::Center)
        .fg(color)
        .bold();
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, status: AnswerStatus) {
    let text = if status.is_resolved() {
        "enter next question  ·  esc home"
    } else {
        "enter check  ·  tab hint  ·  ^l first letter  ·  ^a show answer  ·  esc home"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
