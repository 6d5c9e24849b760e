mod loading;
mod quiz;
mod result;
mod setup;
mod word_select;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::quiz::Phase;

const TITLE: &str = "SMART VOCAB MASTER";

pub fn render<G>(frame: &mut Frame, app: &App<G>) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let session = app.session();
    match session.phase() {
        Phase::Setup => {
            setup::render(frame, area, app);
            if let Some(selection) = session.selection() {
                word_select::render(frame, area, selection);
            }
        }
        Phase::Loading => loading::render(frame, area, session),
        Phase::InProgress => quiz::render(frame, area, app),
        Phase::Completed => result::render(frame, area, app),
    }
}

/// A centered rectangle of the given size, clamped to `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn title_line() -> Line<'static> {
    Line::from(Span::styled(TITLE, Style::default().fg(Color::Cyan).bold()))
}
