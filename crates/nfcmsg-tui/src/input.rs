//! Input state and key handling for the TUI.
//!
//! This module owns the draft editing state (buffer, cursor) and maps keys to
//! App API calls. Every edit pushes the buffer into the App so the deep-link
//! preview follows each keystroke.

use nfcmsg_app::{App, AppAction, KeyInput, Screen};

/// Input state for the TUI.
///
/// Manages the draft buffer and cursor position. The cursor counts
/// characters, not bytes.
#[derive(Debug, Default)]
pub struct InputState {
    /// Text buffer for the draft.
    buffer: String,
    /// Cursor position within the buffer, in characters.
    cursor: usize,
}

impl InputState {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text in the input buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Current cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Handle a key input event.
    ///
    /// Editing keys only apply on the write screen. Function keys are left to
    /// the driver and produce no actions here.
    pub fn handle_key(&mut self, key: KeyInput, app: &mut App) -> Vec<AppAction> {
        match key {
            KeyInput::Tab => app.switch_screen(),
            KeyInput::Enter => app.trigger(),
            KeyInput::Esc => {
                if app.notice().is_some() {
                    app.dismiss_notice()
                } else {
                    app.quit()
                }
            },
            KeyInput::F(_) => vec![],
            edit if app.screen() == Screen::Write => self.handle_edit(edit, app),
            _ => vec![],
        }
    }

    fn handle_edit(&mut self, key: KeyInput, app: &mut App) -> Vec<AppAction> {
        let len = self.buffer.chars().count();
        match key {
            KeyInput::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.buffer.insert(at, c);
                self.cursor = self.cursor.saturating_add(1);
                app.set_draft(self.buffer.clone())
            },
            KeyInput::Backspace => {
                if self.cursor == 0 {
                    return vec![];
                }
                self.cursor -= 1;
                let at = self.byte_offset(self.cursor);
                self.buffer.remove(at);
                app.set_draft(self.buffer.clone())
            },
            KeyInput::Delete => {
                if self.cursor >= len {
                    return vec![];
                }
                let at = self.byte_offset(self.cursor);
                self.buffer.remove(at);
                app.set_draft(self.buffer.clone())
            },
            KeyInput::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                vec![AppAction::Render]
            },
            KeyInput::Right => {
                self.cursor = self.cursor.saturating_add(1).min(len);
                vec![AppAction::Render]
            },
            KeyInput::Home => {
                self.cursor = 0;
                vec![AppAction::Render]
            },
            KeyInput::End => {
                self.cursor = len;
                vec![AppAction::Render]
            },
            KeyInput::Enter | KeyInput::Tab | KeyInput::Esc | KeyInput::F(_) => vec![],
        }
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.buffer.char_indices().nth(chars).map_or(self.buffer.len(), |(at, _)| at)
    }
}

#[cfg(test)]
mod tests {
    use nfcmsg_app::Notice;

    use super::*;

    fn type_str(input: &mut InputState, app: &mut App, text: &str) {
        for c in text.chars() {
            let _ = input.handle_key(KeyInput::Char(c), app);
        }
    }

    #[test]
    fn typing_updates_draft_and_link() {
        let mut input = InputState::new();
        let mut app = App::default();

        type_str(&mut input, &mut app, "hi you");

        assert_eq!(input.buffer(), "hi you");
        assert_eq!(input.cursor(), 6);
        assert_eq!(app.draft(), "hi you");
        assert_eq!(app.deep_link(), "nfcmsg://read?m=hi%20you");
    }

    #[test]
    fn backspace_removes_char() {
        let mut input = InputState::new();
        let mut app = App::default();

        type_str(&mut input, &mut app, "ab");
        let _ = input.handle_key(KeyInput::Backspace, &mut app);

        assert_eq!(input.buffer(), "a");
        assert_eq!(input.cursor(), 1);
        assert_eq!(app.draft(), "a");
    }

    #[test]
    fn multibyte_editing() {
        let mut input = InputState::new();
        let mut app = App::default();

        type_str(&mut input, &mut app, "héé");
        let _ = input.handle_key(KeyInput::Left, &mut app);
        let _ = input.handle_key(KeyInput::Backspace, &mut app);
        let _ = input.handle_key(KeyInput::Char('y'), &mut app);

        assert_eq!(input.buffer(), "hyé");
        assert_eq!(app.draft(), "hyé");
    }

    #[test]
    fn cursor_movement() {
        let mut input = InputState::new();
        let mut app = App::default();

        type_str(&mut input, &mut app, "abc");

        let _ = input.handle_key(KeyInput::Home, &mut app);
        assert_eq!(input.cursor(), 0);
        let _ = input.handle_key(KeyInput::Delete, &mut app);
        assert_eq!(input.buffer(), "bc");

        let _ = input.handle_key(KeyInput::End, &mut app);
        assert_eq!(input.cursor(), 2);

        let _ = input.handle_key(KeyInput::Right, &mut app);
        assert_eq!(input.cursor(), 2);

        let _ = input.handle_key(KeyInput::Left, &mut app);
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn enter_writes_on_write_screen() {
        let mut input = InputState::new();
        let mut app = App::default();
        type_str(&mut input, &mut app, "x");

        let actions = input.handle_key(KeyInput::Enter, &mut app);

        assert!(matches!(actions.first(), Some(AppAction::WriteTag { uri }) if uri == "nfcmsg://read?m=x"));
        // The draft stays for another write.
        assert_eq!(input.buffer(), "x");
    }

    #[test]
    fn read_screen_ignores_typing() {
        let mut input = InputState::new();
        let mut app = App::default();
        let _ = input.handle_key(KeyInput::Tab, &mut app);

        type_str(&mut input, &mut app, "zz");
        assert_eq!(app.draft(), "");

        let actions = input.handle_key(KeyInput::Enter, &mut app);
        assert_eq!(actions.first(), Some(&AppAction::ReadTag));
    }

    #[test]
    fn esc_dismisses_before_quitting() {
        let mut input = InputState::new();
        let mut app = App::default();
        let _ = app.handle(nfcmsg_app::AppEvent::TagWritten);
        assert!(matches!(app.notice(), Some(Notice::Success(_))));

        assert_eq!(input.handle_key(KeyInput::Esc, &mut app), vec![AppAction::Render]);
        assert_eq!(input.handle_key(KeyInput::Esc, &mut app), vec![AppAction::Quit]);
    }

    #[test]
    fn function_keys_are_not_text() {
        let mut input = InputState::new();
        let mut app = App::default();

        assert!(input.handle_key(KeyInput::F(2), &mut app).is_empty());
        assert_eq!(input.buffer(), "");
    }
}
