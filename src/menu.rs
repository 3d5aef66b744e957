//! Pop-up context menu shared by the desktop, the apps button and the window
//! system menu. One menu is open at most at any time; the shell owns it.

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::apps::AppId;
use crate::theme;
use crate::ui::{UiFrame, rect_contains};
use crate::window::{WindowId, WindowOp};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    Window(WindowOp, WindowId),
    Launch(AppId),
    NewFolder,
    NewFile,
    Quit,
}

#[derive(Debug, Clone)]
pub enum MenuEntry {
    Item {
        label: String,
        action: MenuAction,
        disabled: bool,
    },
    Separator,
}

impl MenuEntry {
    pub fn item(label: impl Into<String>, action: MenuAction) -> Self {
        MenuEntry::Item {
            label: label.into(),
            action,
            disabled: false,
        }
    }

    pub fn disabled(label: impl Into<String>, action: MenuAction) -> Self {
        MenuEntry::Item {
            label: label.into(),
            action,
            disabled: true,
        }
    }

    pub fn separator() -> Self {
        MenuEntry::Separator
    }

    fn selectable(&self) -> bool {
        matches!(self, MenuEntry::Item { disabled: false, .. })
    }
}

#[derive(Default)]
pub struct ContextMenu {
    entries: Vec<MenuEntry>,
    origin: (u16, u16),
    rect: Rect,
    selected: usize,
    open: bool,
}

impl ContextMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open at `(column, row)`. The rectangle is finalized against the
    /// viewport at render time so the menu can flip away from the edges.
    pub fn show(&mut self, entries: Vec<MenuEntry>, column: u16, row: u16) {
        self.selected = entries
            .iter()
            .position(MenuEntry::selectable)
            .unwrap_or(0);
        self.entries = entries;
        self.origin = (column, row);
        self.rect = Rect::default();
        self.open = true;
    }

    pub fn hide(&mut self) {
        self.open = false;
        self.entries.clear();
    }

    fn desired_size(&self) -> (u16, u16) {
        let label_width = self
            .entries
            .iter()
            .map(|entry| match entry {
                MenuEntry::Item { label, .. } => label.chars().count(),
                MenuEntry::Separator => 0,
            })
            .max()
            .unwrap_or(0) as u16;
        (label_width + 4, self.entries.len() as u16 + 2)
    }

    /// Placement with edge flipping: when the menu would overflow right or
    /// bottom, it opens leftwards/upwards from the origin instead.
    fn layout(&self, viewport: Rect) -> Rect {
        let (width, height) = self.desired_size();
        let (ox, oy) = self.origin;
        let mut x = ox;
        let mut y = oy;
        if x + width > viewport.width {
            x = ox.saturating_sub(width);
        }
        if y + height > viewport.height {
            y = oy.saturating_sub(height);
        }
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    fn entry_at(&self, column: u16, row: u16) -> Option<usize> {
        if !rect_contains(self.rect, column, row) {
            return None;
        }
        let index = row.checked_sub(self.rect.y + 1)? as usize;
        if index >= self.entries.len() || column <= self.rect.x || column >= self.rect.x + self.rect.width - 1 {
            return None;
        }
        Some(index)
    }

    fn select_next(&mut self, step: isize) {
        if self.entries.iter().filter(|e| e.selectable()).count() == 0 {
            return;
        }
        let len = self.entries.len() as isize;
        let mut index = self.selected as isize;
        loop {
            index = (index + step).rem_euclid(len);
            if self.entries[index as usize].selectable() {
                self.selected = index as usize;
                return;
            }
        }
    }

    fn action_at(&self, index: usize) -> Option<MenuAction> {
        match self.entries.get(index) {
            Some(MenuEntry::Item {
                action,
                disabled: false,
                ..
            }) => Some(action.clone()),
            _ => None,
        }
    }

    /// Handle an event while open. Returns the chosen action, closing the
    /// menu on selection, escape or an outside click.
    pub fn handle_event(&mut self, event: &Event) -> Option<MenuAction> {
        if !self.open {
            return None;
        }
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                KeyCode::Up => {
                    self.select_next(-1);
                    None
                }
                KeyCode::Down => {
                    self.select_next(1);
                    None
                }
                KeyCode::Enter => {
                    let action = self.action_at(self.selected);
                    self.hide();
                    action
                }
                KeyCode::Esc => {
                    self.hide();
                    None
                }
                _ => None,
            },
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                if let Some(index) = self.entry_at(*column, *row) {
                    let action = self.action_at(index);
                    if action.is_some() {
                        self.hide();
                    }
                    action
                } else {
                    self.hide();
                    None
                }
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Moved,
                column,
                row,
                ..
            }) => {
                if let Some(index) = self.entry_at(*column, *row)
                    && self.entries[index].selectable()
                {
                    self.selected = index;
                }
                None
            }
            _ => None,
        }
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        if !self.open {
            return;
        }
        self.rect = self.layout(frame.area());
        let rect = self.rect;
        let base = Style::default().bg(theme::menu_bg()).fg(theme::menu_fg());
        let border = Style::default()
            .bg(theme::menu_bg())
            .fg(theme::menu_fg());
        frame.fill(rect, " ", base);
        let right = rect.x + rect.width - 1;
        let bottom = rect.y + rect.height - 1;
        for x in rect.x + 1..right {
            frame.set_string(x, rect.y, "─", border);
            frame.set_string(x, bottom, "─", border);
        }
        for y in rect.y + 1..bottom {
            frame.set_string(rect.x, y, "│", border);
            frame.set_string(right, y, "│", border);
        }
        frame.set_string(rect.x, rect.y, "┌", border);
        frame.set_string(right, rect.y, "┐", border);
        frame.set_string(rect.x, bottom, "└", border);
        frame.set_string(right, bottom, "┘", border);

        for (i, entry) in self.entries.iter().enumerate() {
            let y = rect.y + 1 + i as u16;
            match entry {
                MenuEntry::Separator => {
                    for x in rect.x + 1..right {
                        frame.set_string(x, y, "─", border);
                    }
                }
                MenuEntry::Item {
                    label, disabled, ..
                } => {
                    let style = if *disabled {
                        base.fg(theme::menu_disabled_fg())
                    } else if i == self.selected {
                        Style::default()
                            .bg(theme::menu_selected_bg())
                            .fg(theme::menu_selected_fg())
                    } else {
                        base
                    };
                    let width = rect.width.saturating_sub(2) as usize;
                    frame.set_string(rect.x + 1, y, &" ".repeat(width), style);
                    frame.set_string(rect.x + 2, y, label, style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use ratatui::buffer::Buffer;

    fn entries() -> Vec<MenuEntry> {
        vec![
            MenuEntry::item("First", MenuAction::NewFolder),
            MenuEntry::separator(),
            MenuEntry::disabled("Second", MenuAction::NewFile),
            MenuEntry::item("Third", MenuAction::Quit),
        ]
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::from(code))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn render(menu: &mut ContextMenu) -> Buffer {
        let area = Rect::new(0, 0, 40, 20);
        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);
        menu.render(&mut ui);
        buf
    }

    #[test]
    fn keyboard_navigation_skips_separators_and_disabled() {
        let mut menu = ContextMenu::new();
        menu.show(entries(), 2, 2);
        assert_eq!(menu.selected, 0);
        menu.handle_event(&key(KeyCode::Down));
        // separator and the disabled entry are skipped
        assert_eq!(menu.selected, 3);
        menu.handle_event(&key(KeyCode::Down));
        assert_eq!(menu.selected, 0);
        menu.handle_event(&key(KeyCode::Up));
        assert_eq!(menu.selected, 3);
        let action = menu.handle_event(&key(KeyCode::Enter));
        assert_eq!(action, Some(MenuAction::Quit));
        assert!(!menu.is_open());
    }

    #[test]
    fn escape_closes_without_an_action() {
        let mut menu = ContextMenu::new();
        menu.show(entries(), 2, 2);
        assert_eq!(menu.handle_event(&key(KeyCode::Esc)), None);
        assert!(!menu.is_open());
    }

    #[test]
    fn click_selects_and_outside_click_dismisses() {
        let mut menu = ContextMenu::new();
        menu.show(entries(), 2, 2);
        render(&mut menu);
        // first item row is origin row + 1
        let action = menu.handle_event(&click(4, 3));
        assert_eq!(action, Some(MenuAction::NewFolder));
        menu.show(entries(), 2, 2);
        render(&mut menu);
        // disabled entry: menu stays open, no action
        assert_eq!(menu.handle_event(&click(4, 5)), None);
        assert!(menu.is_open());
        assert_eq!(menu.handle_event(&click(30, 15)), None);
        assert!(!menu.is_open());
    }

    #[test]
    fn layout_flips_near_the_edges() {
        let mut menu = ContextMenu::new();
        menu.show(entries(), 38, 18);
        let rect = menu.layout(Rect::new(0, 0, 40, 20));
        assert!(rect.x + rect.width <= 40);
        assert!(rect.y + rect.height <= 20);
        assert!(rect.x < 38);
        assert!(rect.y < 18);
    }

    #[test]
    fn render_draws_labels_and_selection() {
        let mut menu = ContextMenu::new();
        menu.show(entries(), 2, 2);
        let buf = render(&mut menu);
        assert_eq!(buf.cell((2, 2)).unwrap().symbol(), "┌");
        assert_eq!(buf.cell((4, 3)).unwrap().symbol(), "F");
        // separator row
        assert_eq!(buf.cell((4, 4)).unwrap().symbol(), "─");
    }
}
