//! Read screen

use nfcmsg_app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render the read screen.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let [message_area, hint_area] = chunks.as_ref() else {
        return;
    };

    let message = app.last_read().map_or_else(
        || Line::from(Span::styled("No message read yet", Style::default().fg(Color::DarkGray))),
        |text| {
            Line::from(Span::styled(
                text.to_owned(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ))
        },
    );

    let paragraph = Paragraph::new(message)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Last message "));
    frame.render_widget(paragraph, *message_area);

    let hint = super::action_hint(
        app,
        app.is_reading(),
        " [Enter] Read tag",
        "Reading... hold the tag near the reader",
    );
    frame.render_widget(Paragraph::new(hint), *hint_area);
}
