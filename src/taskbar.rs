//! Bottom taskbar strip: apps button, one entry per open window, info line.
//!
//! Entries are resynced from the registry after every mutating operation, so
//! the strip always mirrors it one-to-one, minimized windows included. Hit
//! rectangles are recorded while rendering and consumed by the manager on the
//! next pointer event.

use chrono::Local;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::theme;
use crate::ui::{UiFrame, rect_contains};
use crate::window::{WindowId, WindowRegistry};

const APPS_LABEL: &str = " ≡ Apps ";
const MAX_ENTRY_WIDTH: u16 = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarEntry {
    pub id: WindowId,
    pub title: String,
    pub minimized: bool,
    pub active: bool,
}

pub struct Taskbar {
    entries: Vec<TaskbarEntry>,
    hits: Vec<(WindowId, Rect)>,
    apps_rect: Rect,
    area: Rect,
    hostname: String,
}

impl Default for Taskbar {
    fn default() -> Self {
        Self::new()
    }
}

impl Taskbar {
    pub fn new() -> Self {
        let hostname = hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "localhost".to_string());
        Self {
            entries: Vec::new(),
            hits: Vec::new(),
            apps_rect: Rect::default(),
            area: Rect::default(),
            hostname,
        }
    }

    /// Rebuild the entry list from the registry, in creation order. A window
    /// shows as active only while it is both active and visible.
    pub fn sync(&mut self, registry: &WindowRegistry) {
        let active = registry.active();
        self.entries = registry
            .iter()
            .map(|record| TaskbarEntry {
                id: record.id,
                title: record.title.clone(),
                minimized: record.minimized,
                active: active == Some(record.id) && !record.minimized,
            })
            .collect();
    }

    pub fn entries(&self) -> &[TaskbarEntry] {
        &self.entries
    }

    /// Whether the point lies inside the strip rendered last frame.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        rect_contains(self.area, column, row)
    }

    pub fn hit_apps(&self, column: u16, row: u16) -> bool {
        rect_contains(self.apps_rect, column, row)
    }

    pub fn hit_entry(&self, column: u16, row: u16) -> Option<WindowId> {
        self.hits
            .iter()
            .find(|(_, rect)| rect_contains(*rect, column, row))
            .map(|(id, _)| *id)
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        self.area = area;
        self.hits.clear();
        self.apps_rect = Rect::default();
        if area.height == 0 || area.width == 0 {
            return;
        }
        let base = Style::default()
            .bg(theme::taskbar_bg())
            .fg(theme::taskbar_fg());
        frame.fill(area, " ", base);

        let row = area.y;
        self.apps_rect = Rect {
            x: area.x,
            y: row,
            width: (APPS_LABEL.chars().count() as u16).min(area.width),
            height: 1,
        };
        frame.set_string(
            self.apps_rect.x,
            row,
            APPS_LABEL,
            base.add_modifier(Modifier::BOLD),
        );

        let mut x = self.apps_rect.x + self.apps_rect.width + 1;
        for entry in &self.entries {
            let label = format!(" {} ", entry.title);
            let width = (label.chars().count() as u16).min(MAX_ENTRY_WIDTH);
            if x + width > area.x + area.width {
                break;
            }
            let style = if entry.active {
                Style::default()
                    .bg(theme::taskbar_active_bg())
                    .fg(theme::taskbar_active_fg())
            } else if entry.minimized {
                base.add_modifier(Modifier::DIM)
            } else {
                base
            };
            let rect = Rect {
                x,
                y: row,
                width,
                height: 1,
            };
            frame.fill(rect, " ", style);
            frame.set_string(x, row, &label.chars().take(width as usize).collect::<String>(), style);
            self.hits.push((entry.id, rect));
            x += width + 1;
        }

        if area.height > 1 {
            let info_row = area.y + 1;
            let left = format!(
                " {} {}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            );
            frame.set_string(area.x, info_row, &left, base);
            let right = format!(
                "{}@{} {} ",
                "user",
                self.hostname,
                Local::now().format("%H:%M")
            );
            let right_len = right.chars().count() as u16;
            if area.width > right_len {
                frame.set_string(area.x + area.width - right_len, info_row, &right, base);
            }
        }
    }
}
