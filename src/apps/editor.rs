//! Plain text editor over the virtual filesystem.
//!
//! A line buffer with a cursor, a status row, and inline prompts for open
//! and save-as. The window title tracks the file name and a `*` marker for
//! unsaved changes.

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::component::{Component, EventCtx};
use crate::theme;
use crate::ui::UiFrame;
use crate::vfs::VirtualFs;
use crate::widgets::TextInput;
use crate::window::{WindowId, WindowManager, WindowOptions};

pub fn launch(
    wm: &mut WindowManager,
    vfs: &Rc<RefCell<VirtualFs>>,
    file: Option<String>,
) -> WindowId {
    let editor = EditorComponent::new(vfs.clone(), file);
    let title = editor.window_title();
    wm.create_window(&title, 55, 14, WindowOptions::default(), move |content, _| {
        content.set_component(Box::new(editor));
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptKind {
    Open,
    SaveAs,
}

pub struct EditorComponent {
    vfs: Rc<RefCell<VirtualFs>>,
    lines: Vec<String>,
    cursor: (usize, usize),
    scroll: usize,
    file: Option<String>,
    modified: bool,
    status: String,
    prompt: Option<(PromptKind, TextInput)>,
}

impl EditorComponent {
    pub fn new(vfs: Rc<RefCell<VirtualFs>>, file: Option<String>) -> Self {
        let mut editor = Self {
            vfs,
            lines: vec![String::new()],
            cursor: (0, 0),
            scroll: 0,
            file: None,
            modified: false,
            status: "Ctrl+S save  Ctrl+O open  Ctrl+N new".to_string(),
            prompt: None,
        };
        if let Some(path) = file {
            editor.open(&path);
        }
        editor
    }

    fn file_name(&self) -> &str {
        self.file
            .as_deref()
            .and_then(|p| p.rsplit('/').next())
            .unwrap_or("Untitled")
    }

    pub fn window_title(&self) -> String {
        format!(
            "Text Editor - {}{}",
            self.file_name(),
            if self.modified { " *" } else { "" }
        )
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_string).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.cursor = (0, 0);
        self.scroll = 0;
    }

    fn open(&mut self, path: &str) {
        let resolved = self.vfs.borrow().resolve_path(path);
        let result = self.vfs.borrow().read_file(&resolved);
        match result {
            Ok(content) => {
                self.set_text(&content);
                self.file = Some(resolved.clone());
                self.modified = false;
                self.status = format!("Opened {resolved}");
            }
            Err(err) => {
                self.status = format!("{path}: {err}");
            }
        }
    }

    fn save(&mut self, path: &str) {
        let resolved = self.vfs.borrow().resolve_path(path);
        let text = self.text();
        match self.vfs.borrow_mut().write_file(&resolved, &text) {
            Ok(()) => {
                self.file = Some(resolved.clone());
                self.modified = false;
                self.status = format!("Saved {resolved}");
            }
            Err(err) => {
                self.status = format!("{path}: {err}");
            }
        }
    }

    fn mark_modified(&mut self, ctx: &mut EventCtx<'_>) {
        if !self.modified {
            self.modified = true;
            ctx.set_title(self.window_title());
        }
    }

    fn current_line(&mut self) -> &mut String {
        &mut self.lines[self.cursor.0]
    }

    fn clamp_col(&mut self) {
        let len = self.lines[self.cursor.0].chars().count();
        self.cursor.1 = self.cursor.1.min(len);
    }

    fn byte_col(line: &str, col: usize) -> usize {
        line.char_indices().nth(col).map(|(i, _)| i).unwrap_or(line.len())
    }

    fn insert_char(&mut self, c: char) {
        let col = self.cursor.1;
        let line = self.current_line();
        let at = Self::byte_col(line, col);
        line.insert(at, c);
        self.cursor.1 += 1;
    }

    fn insert_newline(&mut self) {
        let (row, col) = self.cursor;
        let line = &mut self.lines[row];
        let at = Self::byte_col(line, col);
        let rest = line.split_off(at);
        self.lines.insert(row + 1, rest);
        self.cursor = (row + 1, 0);
    }

    fn backspace(&mut self) -> bool {
        let (row, col) = self.cursor;
        if col > 0 {
            let line = &mut self.lines[row];
            let at = Self::byte_col(line, col - 1);
            line.remove(at);
            self.cursor.1 -= 1;
            true
        } else if row > 0 {
            let tail = self.lines.remove(row);
            let prev = &mut self.lines[row - 1];
            let new_col = prev.chars().count();
            prev.push_str(&tail);
            self.cursor = (row - 1, new_col);
            true
        } else {
            false
        }
    }

    fn handle_prompt_key(&mut self, key: &KeyEvent, ctx: &mut EventCtx<'_>) -> bool {
        let Some((kind, input)) = self.prompt.as_mut() else {
            return false;
        };
        match key.code {
            KeyCode::Enter => {
                let kind = *kind;
                let path = input.value().trim().to_string();
                self.prompt = None;
                if path.is_empty() {
                    self.status = "Cancelled".to_string();
                } else {
                    match kind {
                        PromptKind::Open => self.open(&path),
                        PromptKind::SaveAs => self.save(&path),
                    }
                    ctx.set_title(self.window_title());
                }
                true
            }
            KeyCode::Esc => {
                self.prompt = None;
                self.status = "Cancelled".to_string();
                true
            }
            _ => input.handle_key(key),
        }
    }

    fn handle_edit_key(&mut self, key: &KeyEvent, ctx: &mut EventCtx<'_>) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => {
                    match self.file.clone() {
                        Some(path) => {
                            self.save(&path);
                            ctx.set_title(self.window_title());
                        }
                        None => {
                            self.prompt =
                                Some((PromptKind::SaveAs, TextInput::new(self.file_name())));
                        }
                    }
                    return true;
                }
                KeyCode::Char('a') => {
                    self.prompt = Some((
                        PromptKind::SaveAs,
                        TextInput::new(self.file.clone().as_deref().unwrap_or("")),
                    ));
                    return true;
                }
                KeyCode::Char('o') => {
                    self.prompt = Some((PromptKind::Open, TextInput::default()));
                    return true;
                }
                KeyCode::Char('n') => {
                    self.set_text("");
                    self.file = None;
                    self.modified = false;
                    self.status = "New file".to_string();
                    ctx.set_title(self.window_title());
                    return true;
                }
                _ => return false,
            }
        }
        match key.code {
            KeyCode::Char(c) => {
                self.insert_char(c);
                self.mark_modified(ctx);
                true
            }
            KeyCode::Enter => {
                self.insert_newline();
                self.mark_modified(ctx);
                true
            }
            KeyCode::Backspace => {
                if self.backspace() {
                    self.mark_modified(ctx);
                }
                true
            }
            KeyCode::Up => {
                self.cursor.0 = self.cursor.0.saturating_sub(1);
                self.clamp_col();
                true
            }
            KeyCode::Down => {
                self.cursor.0 = (self.cursor.0 + 1).min(self.lines.len() - 1);
                self.clamp_col();
                true
            }
            KeyCode::Left => {
                if self.cursor.1 > 0 {
                    self.cursor.1 -= 1;
                } else if self.cursor.0 > 0 {
                    self.cursor.0 -= 1;
                    self.cursor.1 = self.lines[self.cursor.0].chars().count();
                }
                true
            }
            KeyCode::Right => {
                let len = self.lines[self.cursor.0].chars().count();
                if self.cursor.1 < len {
                    self.cursor.1 += 1;
                } else if self.cursor.0 + 1 < self.lines.len() {
                    self.cursor = (self.cursor.0 + 1, 0);
                }
                true
            }
            KeyCode::Home => {
                self.cursor.1 = 0;
                true
            }
            KeyCode::End => {
                self.cursor.1 = self.lines[self.cursor.0].chars().count();
                true
            }
            _ => false,
        }
    }
}

impl Component for EditorComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool) {
        if area.height < 2 || area.width == 0 {
            return;
        }
        let base = Style::default().bg(theme::window_bg()).fg(theme::window_fg());
        frame.fill(area, " ", base);
        let text_rows = (area.height - 1) as usize;
        if self.cursor.0 < self.scroll {
            self.scroll = self.cursor.0;
        } else if self.cursor.0 >= self.scroll + text_rows {
            self.scroll = self.cursor.0 - text_rows + 1;
        }
        for (i, line) in self
            .lines
            .iter()
            .skip(self.scroll)
            .take(text_rows)
            .enumerate()
        {
            frame.set_string(area.x, area.y + i as u16, line, base);
        }
        if focused && self.prompt.is_none() {
            let row = self.cursor.0 - self.scroll;
            if (self.cursor.1 as u16) < area.width {
                let under: String = self.lines[self.cursor.0]
                    .chars()
                    .nth(self.cursor.1)
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| " ".to_string());
                frame.set_string(
                    area.x + self.cursor.1 as u16,
                    area.y + row as u16,
                    &under,
                    base.add_modifier(Modifier::REVERSED),
                );
            }
        }
        let status_row = area.y + area.height - 1;
        let status_style = Style::default().bg(theme::status_bg()).fg(theme::status_fg());
        frame.fill(
            Rect {
                x: area.x,
                y: status_row,
                width: area.width,
                height: 1,
            },
            " ",
            status_style,
        );
        match &self.prompt {
            Some((kind, input)) => {
                let label = match kind {
                    PromptKind::Open => "Open: ",
                    PromptKind::SaveAs => "Save as: ",
                };
                frame.set_string(area.x, status_row, label, status_style);
                let label_len = label.chars().count() as u16;
                let input_area = Rect {
                    x: area.x + label_len,
                    y: status_row,
                    width: area.width.saturating_sub(label_len),
                    height: 1,
                };
                input.render(frame, input_area, status_style, focused);
            }
            None => {
                let pos = format!("{}:{}", self.cursor.0 + 1, self.cursor.1 + 1);
                frame.set_string(area.x + 1, status_row, &self.status, status_style);
                let pos_len = pos.chars().count() as u16 + 1;
                if area.width > pos_len {
                    frame.set_string(area.x + area.width - pos_len, status_row, &pos, status_style);
                }
            }
        }
    }

    fn handle_event(&mut self, event: &Event, ctx: &mut EventCtx<'_>) -> bool {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if self.prompt.is_some() {
                    self.handle_prompt_key(key, ctx)
                } else {
                    self.handle_edit_key(key, ctx)
                }
            }
            _ => false,
        }
    }
}
