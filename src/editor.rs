use crossterm::event::KeyEvent;
use ratatui::style::Style;
use tui_textarea::{Input, Key, TextArea};

/// Single-line search box for the network filter.
pub struct FilterInput<'a> {
    pub textarea: TextArea<'a>,
    pub active: bool,
}

impl<'a> FilterInput<'a> {
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_cursor_line_style(Style::default());
        textarea.set_placeholder_text("Search requests (method, status, URL)");
        Self {
            textarea,
            active: false,
        }
    }

    pub fn text(&self) -> String {
        self.textarea.lines().join("")
    }

    pub fn is_empty(&self) -> bool {
        self.textarea.lines().iter().all(|l| l.is_empty())
    }

    /// Feed a key while editing. Newlines are swallowed to keep one line.
    /// Returns true if the text changed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        let input = Input::from(key);
        if matches!(input.key, Key::Enter) {
            return false;
        }
        self.textarea.input(input)
    }

    pub fn clear(&mut self) {
        self.textarea.select_all();
        self.textarea.cut();
    }
}

impl Default for FilterInput<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_and_clearing() {
        let mut filter = FilterInput::new();
        assert!(filter.is_empty());
        for c in "api".chars() {
            assert!(filter.input(key(KeyCode::Char(c))));
        }
        assert!(!filter.input(key(KeyCode::Enter)));
        assert_eq!(filter.text(), "api");

        filter.clear();
        assert!(filter.is_empty());
        assert_eq!(filter.text(), "");
    }
}
