//! Desktop shell: owns the window manager, the shared filesystem, the
//! context menu and the desktop icons, and routes every input event.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::apps::{self, AppId, dialogs, editor};
use crate::constants::DOUBLE_CLICK_MS;
use crate::menu::{ContextMenu, MenuAction, MenuEntry};
use crate::theme;
use crate::ui::{UiFrame, rect_contains};
use crate::vfs::VirtualFs;
use crate::window::{ShellRequest, WindowId, WindowManager, WindowOp};

pub struct DesktopShell {
    wm: WindowManager,
    vfs: Rc<RefCell<VirtualFs>>,
    menu: ContextMenu,
    icon_hits: Vec<(AppId, Rect)>,
    selected_icon: Option<AppId>,
    last_icon_click: Option<(AppId, Instant)>,
    should_quit: bool,
}

impl Default for DesktopShell {
    fn default() -> Self {
        Self::new(false)
    }
}

impl DesktopShell {
    pub fn new(focus_follows_mouse: bool) -> Self {
        let mut wm = WindowManager::new();
        wm.set_focus_follows_mouse(focus_follows_mouse);
        Self {
            wm,
            vfs: Rc::new(RefCell::new(VirtualFs::new())),
            menu: ContextMenu::new(),
            icon_hits: Vec::new(),
            selected_icon: None,
            last_icon_click: None,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn window_manager(&self) -> &WindowManager {
        &self.wm
    }

    pub fn window_manager_mut(&mut self) -> &mut WindowManager {
        &mut self.wm
    }

    pub fn vfs(&self) -> &Rc<RefCell<VirtualFs>> {
        &self.vfs
    }

    pub fn launch(&mut self, app: AppId) -> WindowId {
        apps::launch(app, &mut self.wm, &self.vfs)
    }

    pub fn handle_event(&mut self, event: &Event) {
        if let Event::Key(key) = event
            && key.kind != KeyEventKind::Release
            && key.code == KeyCode::Char('q')
            && key.modifiers.contains(KeyModifiers::CONTROL)
        {
            self.should_quit = true;
            return;
        }
        if let Event::Resize(width, height) = event {
            self.wm.apply_viewport(Rect::new(0, 0, *width, *height));
            return;
        }
        if self.menu.is_open() {
            if let Some(action) = self.menu.handle_event(event) {
                self.perform(action);
            }
            return;
        }
        let consumed = self.wm.handle_event(event);
        self.drain_requests();
        if !consumed {
            self.handle_desktop_event(event);
        }
    }

    fn handle_desktop_event(&mut self, event: &Event) {
        let Event::Mouse(mouse) = event else {
            return;
        };
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = self
                    .icon_hits
                    .iter()
                    .find(|(_, rect)| rect_contains(*rect, mouse.column, mouse.row))
                    .map(|(app, _)| *app);
                match hit {
                    Some(app) => {
                        self.selected_icon = Some(app);
                        let now = Instant::now();
                        let double = self.last_icon_click.is_some_and(|(last, at)| {
                            last == app
                                && now.duration_since(at)
                                    <= Duration::from_millis(DOUBLE_CLICK_MS)
                        });
                        if double {
                            self.last_icon_click = None;
                            self.launch(app);
                        } else {
                            self.last_icon_click = Some((app, now));
                        }
                    }
                    None => self.selected_icon = None,
                }
            }
            MouseEventKind::Down(MouseButton::Right) => {
                self.menu
                    .show(self.desktop_menu_entries(), mouse.column, mouse.row);
            }
            _ => {}
        }
    }

    fn drain_requests(&mut self) {
        for request in self.wm.take_shell_requests() {
            match request {
                ShellRequest::WindowMenu {
                    window,
                    column,
                    row,
                } => {
                    self.menu
                        .show(self.window_menu_entries(window), column, row);
                }
                ShellRequest::AppsMenu { column, row } => {
                    self.menu.show(self.apps_menu_entries(), column, row);
                }
                ShellRequest::OpenFile(path) => {
                    editor::launch(&mut self.wm, &self.vfs, Some(path));
                }
                ShellRequest::Launch(app) => {
                    self.launch(app);
                }
                ShellRequest::Alert { title, message } => {
                    dialogs::alert(&mut self.wm, &title, &message);
                }
            }
        }
    }

    fn window_menu_entries(&self, id: WindowId) -> Vec<MenuEntry> {
        let minimized = self.wm.is_minimized(id);
        let options = self.wm.options(id).unwrap_or_default();
        let item = |label: &str, op: WindowOp, enabled: bool| {
            if enabled {
                MenuEntry::item(label, MenuAction::Window(op, id))
            } else {
                MenuEntry::disabled(label, MenuAction::Window(op, id))
            }
        };
        vec![
            item("Restore", WindowOp::Restore, minimized),
            item(
                "Minimize",
                WindowOp::Minimize,
                !minimized && !options.no_minimize,
            ),
            item("Maximize", WindowOp::Maximize, !options.no_maximize),
            MenuEntry::separator(),
            item("Close", WindowOp::Close, true),
        ]
    }

    fn apps_menu_entries(&self) -> Vec<MenuEntry> {
        let mut entries: Vec<MenuEntry> = AppId::ALL
            .iter()
            .map(|app| MenuEntry::item(app.label(), MenuAction::Launch(*app)))
            .collect();
        entries.push(MenuEntry::separator());
        entries.push(MenuEntry::item("Quit", MenuAction::Quit));
        entries
    }

    fn desktop_menu_entries(&self) -> Vec<MenuEntry> {
        vec![
            MenuEntry::item("Terminal", MenuAction::Launch(AppId::Terminal)),
            MenuEntry::item("Files", MenuAction::Launch(AppId::Files)),
            MenuEntry::item("Text Editor", MenuAction::Launch(AppId::Editor)),
            MenuEntry::separator(),
            MenuEntry::item("New Folder...", MenuAction::NewFolder),
            MenuEntry::item("New File...", MenuAction::NewFile),
            MenuEntry::separator(),
            MenuEntry::item("About", MenuAction::Launch(AppId::About)),
        ]
    }

    fn perform(&mut self, action: MenuAction) {
        match action {
            MenuAction::Window(op, id) => self.wm.apply_window_op(op, id),
            MenuAction::Launch(app) => {
                self.launch(app);
            }
            MenuAction::NewFolder => {
                let vfs = self.vfs.clone();
                dialogs::prompt(
                    &mut self.wm,
                    "New Folder",
                    "Folder name:",
                    "New Folder",
                    Box::new(move |name, ctx| {
                        if let Err(err) = vfs.borrow_mut().create_directory(name) {
                            ctx.alert("Error", format!("{name}: {err}"));
                        }
                    }),
                );
            }
            MenuAction::NewFile => {
                let vfs = self.vfs.clone();
                dialogs::prompt(
                    &mut self.wm,
                    "New File",
                    "File name:",
                    "New File.txt",
                    Box::new(move |name, ctx| {
                        if let Err(err) = vfs.borrow_mut().write_file(name, "") {
                            ctx.alert("Error", format!("{name}: {err}"));
                        }
                    }),
                );
            }
            MenuAction::Quit => self.should_quit = true,
        }
    }

    fn render_icons(&mut self, ui: &mut UiFrame<'_>) {
        self.icon_hits.clear();
        let base = Style::default()
            .bg(theme::desktop_bg())
            .fg(theme::desktop_fg());
        let mut y = 1;
        for app in AppId::ALL {
            let label = app.label();
            let width = label.chars().count().max(2) as u16;
            let rect = Rect {
                x: 2,
                y,
                width,
                height: 2,
            };
            let style = if self.selected_icon == Some(app) {
                base.add_modifier(Modifier::REVERSED)
            } else {
                base
            };
            ui.set_string(rect.x, rect.y, app.glyph(), style.add_modifier(Modifier::BOLD));
            ui.set_string(rect.x, rect.y + 1, label, style);
            self.icon_hits.push((app, rect));
            y += 3;
        }
    }

    /// Paint one frame: desktop, icons, windows, taskbar, then the menu.
    pub fn draw(&mut self, frame: &mut Frame<'_>) {
        let mut ui = UiFrame::new(frame);
        self.draw_ui(&mut ui);
    }

    pub fn draw_ui(&mut self, ui: &mut UiFrame<'_>) {
        let area = ui.area();
        ui.fill(
            area,
            " ",
            Style::default()
                .bg(theme::desktop_bg())
                .fg(theme::desktop_fg()),
        );
        self.render_icons(ui);
        self.wm.render(ui);
        self.menu.render(ui);
    }
}
