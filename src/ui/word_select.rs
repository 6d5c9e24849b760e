use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Padding, Paragraph},
};

use crate::quiz::WordSelection;

use super::centered;

/// Overlay listing the words found in a photo, each with a checkbox.
pub fn render(frame: &mut Frame, area: Rect, selection: &WordSelection) {
    let height = (selection.len() as u16).saturating_add(6).min(20);
    let popup = centered(area, 48, height);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Color::Cyan)
        .title(" Select Words ")
        .title_style(Style::default().fg(Color::Cyan).bold())
        .padding(Padding::horizontal(1));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(inner);

    let lines: Vec<Line> = selection
        .words()
        .iter()
        .enumerate()
        .map(|(index, word)| {
            let at_cursor = index == selection.cursor();
            let checkbox = if selection.is_selected(index) { "[x]" } else { "[ ]" };
            let style = if at_cursor {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::Gray)
            };
            let marker = if at_cursor { ">" } else { " " };
            Line::from(vec![
                Span::styled(format!("{} {} ", marker, checkbox), style),
                Span::styled(word.as_str(), style),
            ])
        })
        .collect();

    // Keep the cursor row on screen for long lists.
    let visible = chunks[0].height as usize;
    let scroll = selection.cursor().saturating_sub(visible.saturating_sub(1));
    frame.render_widget(Paragraph::new(lines).scroll((scroll as u16, 0)), chunks[0]);

    let count = selection.selected_count();
    let confirm = Paragraph::new(format!("Add {} Words", count))
        .alignment(Alignment::Center)
        .fg(if count > 0 { Color::Green } else { Color::DarkGray })
        .bold();
    frame.render_widget(confirm, chunks[1]);

    let controls = Paragraph::new("↑/↓ move  ·  space toggle  ·  enter add  ·  esc cancel")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(controls, chunks[2]);
}
