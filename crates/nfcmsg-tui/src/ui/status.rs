//! Status bar
//!
//! Shows the notice when there is one, otherwise the link profile, the
//! simulated tag, the busy flags and the tag keys.

use nfcmsg_app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::TagStatus;

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, tag: TagStatus, area: Rect) {
    let line = match app.notice() {
        Some(notice) => {
            let color = if notice.is_failure() { Color::Red } else { Color::Green };
            Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    notice.text().to_owned(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" (Esc)", Style::default().fg(Color::Gray)),
            ])
        },
        None => {
            let presence = if tag.present {
                Span::styled("present", Style::default().fg(Color::Green))
            } else {
                Span::styled("away", Style::default().fg(Color::Red))
            };
            let busy = Style::default().fg(Color::Yellow);
            let mut spans = vec![
                Span::raw(" "),
                Span::raw(app.codec().prefix()),
                Span::raw(" | tag: "),
                presence,
                Span::raw(format!(" ({} B)", tag.capacity)),
            ];
            if app.is_writing() {
                spans.push(Span::raw(" | "));
                spans.push(Span::styled("writing", busy));
            }
            if app.is_reading() {
                spans.push(Span::raw(" | "));
                spans.push(Span::styled("reading", busy));
            }
            spans.push(Span::styled(
                " | F2 tap  F3 tag in/out  Esc quit",
                Style::default().fg(Color::Gray),
            ));
            Line::from(spans)
        },
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(paragraph, area);
}
