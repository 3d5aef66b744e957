//! Small shared widgets.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::ui::UiFrame;

/// Single-line editable text field with a cursor, used by the terminal
/// prompt, editor prompts and dialogs. Cursor position is a char index.
#[derive(Debug, Default, Clone)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn new(initial: &str) -> Self {
        Self {
            value: initial.to_string(),
            cursor: initial.chars().count(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.chars().count();
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Apply a key to the field. Returns true when the key was handled.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => {
                let at = self.byte_index();
                self.value.insert(at, c);
                self.cursor += 1;
                true
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index();
                    self.value.remove(at);
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < self.value.chars().count() {
                    let at = self.byte_index();
                    self.value.remove(at);
                }
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.value.chars().count());
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.value.chars().count();
                true
            }
            _ => false,
        }
    }

    /// Render into a single row, scrolled so the cursor stays visible. The
    /// cursor cell is drawn reversed when `focused`.
    pub fn render(&self, frame: &mut UiFrame<'_>, area: Rect, style: Style, focused: bool) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let width = area.width as usize;
        let skip = (self.cursor + 1).saturating_sub(width);
        let visible: String = self.value.chars().skip(skip).take(width).collect();
        frame.set_string(area.x, area.y, &" ".repeat(width), style);
        frame.set_string(area.x, area.y, &visible, style);
        if focused {
            let cursor_x = area.x + (self.cursor - skip) as u16;
            let under: String = self
                .value
                .chars()
                .nth(self.cursor)
                .map(|c| c.to_string())
                .unwrap_or_else(|| " ".to_string());
            frame.set_string(cursor_x, area.y, &under, style.add_modifier(Modifier::REVERSED));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut TextInput, code: KeyCode) {
        input.handle_key(&KeyEvent::from(code));
    }

    fn type_str(input: &mut TextInput, text: &str) {
        for c in text.chars() {
            press(input, KeyCode::Char(c));
        }
    }

    #[test]
    fn typing_and_editing() {
        let mut input = TextInput::default();
        type_str(&mut input, "hello");
        assert_eq!(input.value(), "hello");
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.value(), "hell");
        press(&mut input, KeyCode::Home);
        press(&mut input, KeyCode::Delete);
        assert_eq!(input.value(), "ell");
        press(&mut input, KeyCode::End);
        type_str(&mut input, "o");
        assert_eq!(input.value(), "ello");
    }

    #[test]
    fn insert_in_the_middle() {
        let mut input = TextInput::new("ac");
        press(&mut input, KeyCode::Left);
        type_str(&mut input, "b");
        assert_eq!(input.value(), "abc");
    }

    #[test]
    fn control_chords_are_not_swallowed() {
        let mut input = TextInput::new("x");
        let chord = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(!input.handle_key(&chord));
        assert_eq!(input.value(), "x");
    }
}
