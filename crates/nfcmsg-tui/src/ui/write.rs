//! Write screen
//!
//! Draft input with cursor, the deep-link preview and the write button.

use nfcmsg_app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::InputState;

const INPUT_HEIGHT: u16 = 3;
const HINT_HEIGHT: u16 = 1;
const BORDER_SIZE: u16 = 1; // left border, top border

/// Render the write screen.
pub fn render(frame: &mut Frame, app: &App, input: &InputState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(HINT_HEIGHT),
        ])
        .split(area);

    let [input_area, preview_area, hint_area] = chunks.as_ref() else {
        return;
    };

    let draft = Paragraph::new(app.draft().to_owned())
        .style(Style::default().fg(Color::White))
        .block(Block::default().borders(Borders::ALL).title(" Message "));
    frame.render_widget(draft, *input_area);

    let preview = Paragraph::new(app.deep_link().to_owned())
        .style(Style::default().fg(Color::Cyan))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Deep link "));
    frame.render_widget(preview, *preview_area);

    let hint = super::action_hint(
        app,
        app.is_writing(),
        " [Enter] Write to tag",
        "Writing... hold the tag near the reader",
    );
    frame.render_widget(Paragraph::new(hint), *hint_area);

    let max_offset = input_area.width.saturating_sub(BORDER_SIZE * 2);
    let cursor_offset = u16::try_from(input.cursor()).unwrap_or(u16::MAX).min(max_offset);
    let cursor_x = input_area.x.saturating_add(BORDER_SIZE).saturating_add(cursor_offset);
    let cursor_y = input_area.y.saturating_add(BORDER_SIZE);
    frame.set_cursor_position((cursor_x, cursor_y));
}
