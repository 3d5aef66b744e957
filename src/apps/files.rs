//! File manager: browse the tree, open files in the editor, create and
//! delete entries.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::component::{Component, EventCtx};
use crate::constants::DOUBLE_CLICK_MS;
use crate::theme;
use crate::ui::UiFrame;
use crate::vfs::{DirEntry, VirtualFs};
use crate::widgets::TextInput;
use crate::window::{WindowId, WindowManager, WindowOptions};

pub fn launch(wm: &mut WindowManager, vfs: &Rc<RefCell<VirtualFs>>) -> WindowId {
    let vfs = vfs.clone();
    wm.create_window("Files", 50, 14, WindowOptions::default(), move |content, _| {
        content.set_component(Box::new(FilesComponent::new(vfs)));
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilesPrompt {
    NewFolder,
    NewFile,
}

/// A row in the listing. `..` is synthesized for every directory except the
/// root.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Row {
    Parent,
    Entry(DirEntry),
}

pub struct FilesComponent {
    vfs: Rc<RefCell<VirtualFs>>,
    path: String,
    rows: Vec<Row>,
    selected: usize,
    scroll: usize,
    status: String,
    prompt: Option<(FilesPrompt, TextInput)>,
    pending_delete: Option<String>,
    last_click: Option<(usize, Instant)>,
    list_area: Rect,
}

impl FilesComponent {
    pub fn new(vfs: Rc<RefCell<VirtualFs>>) -> Self {
        let path = vfs.borrow().current_path().to_string();
        let mut files = Self {
            vfs,
            path,
            rows: Vec::new(),
            selected: 0,
            scroll: 0,
            status: String::new(),
            prompt: None,
            pending_delete: None,
            last_click: None,
            list_area: Rect::default(),
        };
        files.reload();
        files
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Rebuild the listing: `..`, then directories, then files, each block
    /// name-sorted.
    fn reload(&mut self) {
        let entries = match self.vfs.borrow().list_directory(&self.path) {
            Ok(entries) => entries,
            Err(err) => {
                // the directory may have been removed under us; fall back home
                self.status = format!("{}: {err}", self.path);
                self.path = crate::vfs::HOME_DIR.to_string();
                self.vfs
                    .borrow()
                    .list_directory(&self.path)
                    .unwrap_or_default()
            }
        };
        let mut dirs: Vec<DirEntry> = entries.iter().filter(|e| e.is_dir).cloned().collect();
        let mut files: Vec<DirEntry> = entries.iter().filter(|e| !e.is_dir).cloned().collect();
        dirs.sort_by(|a, b| a.name.cmp(&b.name));
        files.sort_by(|a, b| a.name.cmp(&b.name));
        self.rows = Vec::new();
        if self.path != "/" {
            self.rows.push(Row::Parent);
        }
        self.rows.extend(dirs.into_iter().map(Row::Entry));
        self.rows.extend(files.into_iter().map(Row::Entry));
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
        self.scroll = 0;
        let count = self
            .rows
            .iter()
            .filter(|r| matches!(r, Row::Entry(_)))
            .count();
        self.status = format!("{count} items");
    }

    fn join(&self, name: &str) -> String {
        if self.path == "/" {
            format!("/{name}")
        } else {
            format!("{}/{name}", self.path)
        }
    }

    fn parent_path(&self) -> String {
        let mut parts: Vec<&str> = self.path.split('/').filter(|p| !p.is_empty()).collect();
        parts.pop();
        format!("/{}", parts.join("/"))
    }

    fn enter_directory(&mut self, path: String) {
        // keep the shared working directory in step with the view
        if self.vfs.borrow_mut().change_directory(&path).is_ok() {
            self.path = path;
            self.selected = 0;
            self.reload();
        }
    }

    fn activate(&mut self, ctx: &mut EventCtx<'_>) {
        match self.rows.get(self.selected).cloned() {
            Some(Row::Parent) => self.enter_directory(self.parent_path()),
            Some(Row::Entry(entry)) if entry.is_dir => {
                let path = self.join(&entry.name);
                self.enter_directory(path);
            }
            Some(Row::Entry(entry)) => ctx.open_file(self.join(&entry.name)),
            None => {}
        }
    }

    fn selected_name(&self) -> Option<&str> {
        match self.rows.get(self.selected) {
            Some(Row::Entry(entry)) => Some(&entry.name),
            _ => None,
        }
    }

    fn handle_prompt_key(&mut self, key: &KeyEvent) -> bool {
        let Some((kind, input)) = self.prompt.as_mut() else {
            return false;
        };
        match key.code {
            KeyCode::Enter => {
                let kind = *kind;
                let name = input.value().trim().to_string();
                self.prompt = None;
                if name.is_empty() {
                    self.status = "Cancelled".to_string();
                    return true;
                }
                let path = self.join(&name);
                let result = match kind {
                    FilesPrompt::NewFolder => self.vfs.borrow_mut().create_directory(&path),
                    FilesPrompt::NewFile => self.vfs.borrow_mut().write_file(&path, ""),
                };
                match result {
                    Ok(()) => self.reload(),
                    Err(err) => self.status = format!("{name}: {err}"),
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

    fn handle_key(&mut self, key: &KeyEvent, ctx: &mut EventCtx<'_>) -> bool {
        if self.prompt.is_some() {
            return self.handle_prompt_key(key);
        }
        if let Some(name) = self.pending_delete.clone() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    let path = self.join(&name);
                    let result = self.vfs.borrow_mut().remove(&path);
                    match result {
                        Ok(()) => self.reload(),
                        Err(err) => self.status = format!("{name}: {err}"),
                    }
                    self.pending_delete = None;
                }
                _ => {
                    self.pending_delete = None;
                    self.status = "Cancelled".to_string();
                }
            }
            return true;
        }
        match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                true
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1).min(self.rows.len().saturating_sub(1));
                true
            }
            KeyCode::Enter => {
                self.activate(ctx);
                true
            }
            KeyCode::Backspace => {
                if self.path != "/" {
                    self.enter_directory(self.parent_path());
                }
                true
            }
            KeyCode::Char('n') => {
                self.prompt = Some((FilesPrompt::NewFolder, TextInput::new("New Folder")));
                true
            }
            KeyCode::Char('f') => {
                self.prompt = Some((FilesPrompt::NewFile, TextInput::new("New File.txt")));
                true
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(name) = self.selected_name().map(str::to_string) {
                    self.status = format!("Delete {name}? (y/n)");
                    self.pending_delete = Some(name);
                }
                true
            }
            KeyCode::Char('r') => {
                self.reload();
                true
            }
            _ => false,
        }
    }

    fn row_label(&self, row: &Row) -> String {
        match row {
            Row::Parent => "▸ ..".to_string(),
            Row::Entry(entry) if entry.is_dir => format!("▸ {}/", entry.name),
            Row::Entry(entry) => format!("  {}  ({} B)", entry.name, entry.size),
        }
    }
}

impl Component for FilesComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool) {
        if area.height < 3 || area.width == 0 {
            return;
        }
        let base = Style::default().bg(theme::window_bg()).fg(theme::window_fg());
        frame.fill(area, " ", base);
        let header = Style::default().bg(theme::status_bg()).fg(theme::status_fg());
        frame.fill(
            Rect {
                x: area.x,
                y: area.y,
                width: area.width,
                height: 1,
            },
            " ",
            header,
        );
        frame.set_string(area.x + 1, area.y, &self.path, header);

        self.list_area = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height - 2,
        };
        let list_rows = (area.height - 2) as usize;
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + list_rows {
            self.scroll = self.selected - list_rows + 1;
        }
        for (i, row) in self
            .rows
            .iter()
            .skip(self.scroll)
            .take(list_rows)
            .enumerate()
        {
            let index = self.scroll + i;
            let style = if index == self.selected && focused {
                base.add_modifier(Modifier::REVERSED)
            } else {
                base
            };
            frame.set_string(area.x + 1, area.y + 1 + i as u16, &self.row_label(row), style);
        }

        let status_row = area.y + area.height - 1;
        frame.fill(
            Rect {
                x: area.x,
                y: status_row,
                width: area.width,
                height: 1,
            },
            " ",
            header,
        );
        match &self.prompt {
            Some((kind, input)) => {
                let label = match kind {
                    FilesPrompt::NewFolder => "New folder: ",
                    FilesPrompt::NewFile => "New file: ",
                };
                frame.set_string(area.x, status_row, label, header);
                let label_len = label.chars().count() as u16;
                let input_area = Rect {
                    x: area.x + label_len,
                    y: status_row,
                    width: area.width.saturating_sub(label_len),
                    height: 1,
                };
                input.render(frame, input_area, header, focused);
            }
            None => frame.set_string(area.x + 1, status_row, &self.status, header),
        }
    }

    fn handle_event(&mut self, event: &Event, ctx: &mut EventCtx<'_>) -> bool {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key, ctx),
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                // hit rows against the listing painted last frame
                if crate::ui::rect_contains(self.list_area, mouse.column, mouse.row) {
                    let index = self.scroll + (mouse.row - self.list_area.y) as usize;
                    if index < self.rows.len() {
                        self.selected = index;
                        let now = Instant::now();
                        if let Some((last, at)) = self.last_click
                            && last == index
                            && now.duration_since(at) <= Duration::from_millis(DOUBLE_CLICK_MS)
                        {
                            self.last_click = None;
                            self.activate(ctx);
                        } else {
                            self.last_click = Some((index, now));
                        }
                    }
                }
                true
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => {
                    self.selected = self.selected.saturating_sub(1);
                    true
                }
                MouseEventKind::ScrollDown => {
                    self.selected = (self.selected + 1).min(self.rows.len().saturating_sub(1));
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }
}
