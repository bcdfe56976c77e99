//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod read;
mod status;
mod write;

use nfcmsg_app::{App, Screen};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::InputState;

/// Spinner frames shown while a tag operation is in flight.
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// What the status bar shows about the simulated tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagStatus {
    /// Tag is in the field.
    pub present: bool,
    /// Tag capacity in bytes.
    pub capacity: usize,
}

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App, input: &InputState, tag: TagStatus) {
    const TABS_HEIGHT: u16 = 1;
    const MAIN_AREA_MIN_HEIGHT: u16 = 6;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TABS_HEIGHT),
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [tabs_area, main_area, status_area] = chunks.as_ref() else {
        return;
    };

    frame.render_widget(tabs(app.screen()), *tabs_area);
    match app.screen() {
        Screen::Write => write::render(frame, app, input, *main_area),
        Screen::Read => read::render(frame, app, *main_area),
    }
    status::render(frame, app, tag, *status_area);
}

fn tabs(current: Screen) -> Paragraph<'static> {
    let tab = |screen: Screen, label: &'static str| {
        if screen == current {
            let style = Style::default().fg(Color::Black).bg(Color::Cyan);
            Span::styled(label, style.add_modifier(Modifier::BOLD))
        } else {
            Span::styled(label, Style::default().fg(Color::Gray))
        }
    };

    Paragraph::new(Line::from(vec![
        Span::raw(" "),
        tab(Screen::Write, " Write "),
        Span::raw(" "),
        tab(Screen::Read, " Read "),
        Span::styled("   Tab: switch", Style::default().fg(Color::DarkGray)),
    ]))
}

/// Hint for the screen's button, with a spinner while `busy`.
fn action_hint(app: &App, busy: bool, idle: &'static str, working: &'static str) -> Line<'static> {
    if busy {
        let frame = SPINNER[usize::try_from(app.busy_ticks() % 4).unwrap_or_default()];
        Line::from(Span::styled(format!("{frame} {working}"), Style::default().fg(Color::Yellow)))
    } else {
        Line::from(Span::styled(idle, Style::default().fg(Color::Cyan)))
    }
}
