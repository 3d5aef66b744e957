//! The window manager: lifecycle, focus, geometry and event routing.
//!
//! All window state lives in the registry; content components live in a
//! side table keyed by window id. Pointer interaction is a small state
//! machine: a press on the titlebar or resize handle arms a drag, subsequent
//! drag events apply pure geometry transforms, release disarms.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crossterm::event::{Event, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::apps::AppId;
use crate::component::{AppRequest, Component, EventCtx};
use crate::constants::{
    CASCADE_ORIGIN_X, CASCADE_ORIGIN_Y, CASCADE_SPAN, CASCADE_STEP, CONTENT_TOP_INSET,
    DOUBLE_CLICK_MS, DRAG_KEEP_COLS, TASKBAR_HEIGHT,
};
use crate::taskbar::Taskbar;
use crate::ui::UiFrame;
use crate::window::chrome::{self, HitRegion};
use crate::window::{
    DragState, ResizeState, WindowId, WindowOptions, WindowRegistry, apply_drag, apply_resize,
};

/// Handed to a content builder during window creation; the builder installs
/// the component that owns the window's interior from then on.
#[derive(Default)]
pub struct ContentArea {
    component: Option<Box<dyn Component>>,
}

impl ContentArea {
    pub fn set_component(&mut self, component: Box<dyn Component>) {
        self.component = Some(component);
    }
}

/// Operations the window system menu offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowOp {
    Restore,
    Minimize,
    Maximize,
    Close,
}

/// Work the manager cannot finish on its own, drained by the desktop shell
/// once per dispatched event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellRequest {
    WindowMenu {
        window: WindowId,
        column: u16,
        row: u16,
    },
    AppsMenu {
        column: u16,
        row: u16,
    },
    OpenFile(String),
    Launch(AppId),
    Alert {
        title: String,
        message: String,
    },
}

pub struct WindowManager {
    registry: WindowRegistry,
    surfaces: BTreeMap<WindowId, Box<dyn Component>>,
    taskbar: Taskbar,
    viewport: Rect,
    focus_follows_mouse: bool,
    drag: Option<DragState>,
    resize: Option<ResizeState>,
    last_sysmenu_click: Option<(WindowId, Instant)>,
    app_requests: Vec<AppRequest>,
    shell_requests: Vec<ShellRequest>,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowManager {
    pub fn new() -> Self {
        Self {
            registry: WindowRegistry::new(),
            surfaces: BTreeMap::new(),
            taskbar: Taskbar::new(),
            // Placeholder until the first frame or resize event arrives;
            // keeps geometry deterministic for headless use.
            viewport: Rect::new(0, 0, 80, 24),
            focus_follows_mouse: false,
            drag: None,
            resize: None,
            last_sysmenu_click: None,
            app_requests: Vec::new(),
            shell_requests: Vec::new(),
        }
    }

    /// Desktop area: the viewport minus the taskbar strip.
    pub fn desktop_area(&self) -> Rect {
        Rect {
            x: self.viewport.x,
            y: self.viewport.y,
            width: self.viewport.width,
            height: self.viewport.height.saturating_sub(TASKBAR_HEIGHT),
        }
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn set_focus_follows_mouse(&mut self, enabled: bool) {
        self.focus_follows_mouse = enabled;
    }

    pub fn focus_follows_mouse(&self) -> bool {
        self.focus_follows_mouse
    }

    pub fn window_count(&self) -> usize {
        self.registry.len()
    }

    pub fn active_window(&self) -> Option<WindowId> {
        self.registry.active()
    }

    pub fn bounds(&self, id: WindowId) -> Option<Rect> {
        self.registry.get(id).map(|r| r.bounds)
    }

    pub fn title(&self, id: WindowId) -> Option<&str> {
        self.registry.get(id).map(|r| r.title.as_str())
    }

    pub fn is_minimized(&self, id: WindowId) -> bool {
        self.registry.get(id).is_some_and(|r| r.minimized)
    }

    pub fn is_maximized(&self, id: WindowId) -> bool {
        self.registry.get(id).is_some_and(|r| r.maximized)
    }

    pub fn options(&self, id: WindowId) -> Option<WindowOptions> {
        self.registry.get(id).map(|r| r.options)
    }

    pub fn ordered_by_z(&self) -> Vec<WindowId> {
        self.registry.ordered_by_z()
    }

    pub fn taskbar(&self) -> &Taskbar {
        &self.taskbar
    }

    pub fn take_shell_requests(&mut self) -> Vec<ShellRequest> {
        std::mem::take(&mut self.shell_requests)
    }

    /// Create a window at the next cascade slot and focus it. The builder
    /// runs synchronously and installs the content component; a panic inside
    /// it propagates to the caller with the registry already updated.
    pub fn create_window(
        &mut self,
        title: &str,
        width: u16,
        height: u16,
        options: WindowOptions,
        builder: impl FnOnce(&mut ContentArea, WindowId),
    ) -> WindowId {
        let offset = (self.registry.created_count() as u16 * CASCADE_STEP) % CASCADE_SPAN;
        let bounds = Rect {
            x: CASCADE_ORIGIN_X + offset,
            y: CASCADE_ORIGIN_Y + offset,
            width,
            height,
        };
        let id = self.registry.allocate(title.to_string(), bounds, options);
        let mut content = ContentArea::default();
        builder(&mut content, id);
        if let Some(component) = content.component {
            self.surfaces.insert(id, component);
        }
        self.focus_window(id);
        tracing::debug!(window = %id, title, ?bounds, "window created");
        id
    }

    /// Raise and activate. Minimized and unknown windows are skipped: a
    /// minimized window must be restored through the taskbar or system menu
    /// first.
    pub fn focus_window(&mut self, id: WindowId) {
        let focusable = self
            .registry
            .get(id)
            .is_some_and(|record| !record.minimized);
        if !focusable {
            return;
        }
        self.registry.raise(id);
        self.sync_taskbar();
    }

    /// Remove the window and its component. Unknown ids are ignored, so a
    /// stale close request after the user already closed the window is
    /// harmless. Focus is not transferred to another window.
    pub fn close_window(&mut self, id: WindowId) {
        if self.registry.remove(id).is_none() {
            return;
        }
        self.surfaces.remove(&id);
        if self.drag.is_some_and(|d| d.id == id) {
            self.drag = None;
        }
        if self.resize.is_some_and(|r| r.id == id) {
            self.resize = None;
        }
        if self.last_sysmenu_click.is_some_and(|(last, _)| last == id) {
            self.last_sysmenu_click = None;
        }
        self.sync_taskbar();
        tracing::debug!(window = %id, "window closed");
    }

    /// Hide the window, keeping its geometry, z value and maximized flag
    /// intact for restore. Clears the active pointer when it was active.
    pub fn minimize_window(&mut self, id: WindowId) {
        let Some(record) = self.registry.get_mut(id) else {
            return;
        };
        if record.minimized {
            return;
        }
        record.minimized = true;
        self.registry.clear_active(id);
        self.sync_taskbar();
        tracing::debug!(window = %id, "window minimized");
    }

    /// Unhide and focus. A no-op for windows that are not minimized.
    pub fn restore_window(&mut self, id: WindowId) {
        let Some(record) = self.registry.get_mut(id) else {
            return;
        };
        if !record.minimized {
            return;
        }
        record.minimized = false;
        self.focus_window(id);
        tracing::debug!(window = %id, "window restored");
    }

    /// Toggle between the normal rectangle and the full desktop area.
    pub fn maximize_window(&mut self, id: WindowId) {
        let desktop = self.desktop_area();
        let Some(record) = self.registry.get_mut(id) else {
            return;
        };
        if record.options.no_maximize {
            return;
        }
        if record.maximized {
            record.bounds = record.bounds_normal.take().unwrap_or(record.bounds);
            record.maximized = false;
        } else {
            record.bounds_normal = Some(record.bounds);
            record.bounds = desktop;
            record.maximized = true;
        }
        let maximized = record.maximized;
        self.sync_taskbar();
        tracing::debug!(window = %id, maximized, "window maximize toggled");
    }

    pub fn set_window_title(&mut self, id: WindowId, title: String) {
        let Some(record) = self.registry.get_mut(id) else {
            return;
        };
        record.title = title;
        self.sync_taskbar();
    }

    pub fn apply_window_op(&mut self, op: WindowOp, id: WindowId) {
        match op {
            WindowOp::Restore => self.restore_window(id),
            WindowOp::Minimize => self.minimize_window(id),
            WindowOp::Maximize => self.maximize_window(id),
            WindowOp::Close => self.close_window(id),
        }
    }

    /// Adopt a new viewport: maximized windows track the desktop area, the
    /// rest are pulled back inside reach of the pointer.
    pub fn apply_viewport(&mut self, area: Rect) {
        if area == self.viewport {
            return;
        }
        self.viewport = area;
        let desktop = self.desktop_area();
        let max_x = desktop.width.saturating_sub(DRAG_KEEP_COLS);
        let max_y = desktop.height.saturating_sub(CONTENT_TOP_INSET);
        for record in self.registry.iter_mut() {
            if record.maximized {
                record.bounds = desktop;
            } else {
                record.bounds.x = record.bounds.x.min(max_x);
                record.bounds.y = record.bounds.y.min(max_y);
            }
        }
    }

    /// Topmost visible window under the pointer, if any.
    pub fn topmost_at(&self, column: u16, row: u16) -> Option<WindowId> {
        self.registry
            .ordered_by_z()
            .into_iter()
            .rev()
            .find(|&id| {
                self.registry.get(id).is_some_and(|record| {
                    !record.minimized && crate::ui::rect_contains(record.bounds, column, row)
                })
            })
    }

    /// Route an input event. Returns true when the event was consumed by a
    /// window or the taskbar; unconsumed events fall through to the desktop.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(_) => {
                if let Some(id) = self.registry.active() {
                    self.dispatch_to_component(id, event)
                } else {
                    false
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            Event::Resize(width, height) => {
                self.apply_viewport(Rect::new(0, 0, *width, *height));
                false
            }
            _ => false,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        if let Some(state) = self.drag {
            match mouse.kind {
                MouseEventKind::Drag(MouseButton::Left) => {
                    // The window may have been closed mid-drag by a request.
                    if self.registry.contains(state.id) {
                        let (x, y) =
                            apply_drag(&state, self.desktop_area(), mouse.column, mouse.row);
                        if let Some(record) = self.registry.get_mut(state.id) {
                            record.bounds.x = x;
                            record.bounds.y = y;
                        }
                    } else {
                        self.drag = None;
                    }
                    return true;
                }
                MouseEventKind::Up(_) => {
                    self.drag = None;
                    return true;
                }
                _ => {}
            }
        }
        if let Some(state) = self.resize {
            match mouse.kind {
                MouseEventKind::Drag(MouseButton::Left) => {
                    if self.registry.contains(state.id) {
                        let (width, height) = apply_resize(&state, mouse.column, mouse.row);
                        if let Some(record) = self.registry.get_mut(state.id) {
                            record.bounds.width = width;
                            record.bounds.height = height;
                        }
                    } else {
                        self.resize = None;
                    }
                    return true;
                }
                MouseEventKind::Up(_) => {
                    self.resize = None;
                    return true;
                }
                _ => {}
            }
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_left_down(mouse),
            MouseEventKind::Down(MouseButton::Right) => {
                if let Some(id) = self.topmost_at(mouse.column, mouse.row) {
                    self.focus_window(id);
                    true
                } else {
                    false
                }
            }
            MouseEventKind::Moved => {
                if self.focus_follows_mouse
                    && let Some(id) = self.topmost_at(mouse.column, mouse.row)
                    && self.registry.active() != Some(id)
                {
                    self.focus_window(id);
                }
                false
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                if let Some(id) = self.topmost_at(mouse.column, mouse.row) {
                    self.dispatch_to_component(id, &Event::Mouse(mouse))
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    fn handle_left_down(&mut self, mouse: MouseEvent) -> bool {
        let (column, row) = (mouse.column, mouse.row);
        if self.taskbar.contains(column, row) {
            if self.taskbar.hit_apps(column, row) {
                self.shell_requests
                    .push(ShellRequest::AppsMenu { column, row });
            } else if let Some(id) = self.taskbar.hit_entry(column, row) {
                self.taskbar_entry_clicked(id);
            }
            return true;
        }
        let Some(id) = self.topmost_at(column, row) else {
            return false;
        };
        self.focus_window(id);
        let Some(record) = self.registry.get(id).cloned() else {
            return true;
        };
        match chrome::hit_test(&record, column, row) {
            Some(HitRegion::SysMenu) => self.sysmenu_clicked(id, record.bounds),
            Some(HitRegion::Minimize) => self.minimize_window(id),
            Some(HitRegion::Maximize) => self.maximize_window(id),
            Some(HitRegion::Close) => self.close_window(id),
            Some(HitRegion::Titlebar) => {
                if !record.maximized {
                    self.drag = Some(DragState {
                        id,
                        start: (column, row),
                        origin: (record.bounds.x, record.bounds.y),
                    });
                }
            }
            Some(HitRegion::ResizeHandle) => {
                self.resize = Some(ResizeState {
                    id,
                    start: (column, row),
                    size: (record.bounds.width, record.bounds.height),
                });
            }
            Some(HitRegion::Content) => {
                self.dispatch_to_component(id, &Event::Mouse(mouse));
            }
            _ => {}
        }
        true
    }

    fn sysmenu_clicked(&mut self, id: WindowId, bounds: Rect) {
        let now = Instant::now();
        let double = self
            .last_sysmenu_click
            .is_some_and(|(last, at)| last == id && now.duration_since(at) <= Duration::from_millis(DOUBLE_CLICK_MS));
        if double {
            self.last_sysmenu_click = None;
            self.close_window(id);
        } else {
            self.last_sysmenu_click = Some((id, now));
            let cell = chrome::sysmenu_cell(bounds);
            self.shell_requests.push(ShellRequest::WindowMenu {
                window: id,
                column: cell.x,
                row: cell.y + 1,
            });
        }
    }

    fn taskbar_entry_clicked(&mut self, id: WindowId) {
        if self.is_minimized(id) {
            self.restore_window(id);
        } else if self.registry.active() == Some(id) {
            self.minimize_window(id);
        } else {
            self.focus_window(id);
        }
    }

    fn dispatch_to_component(&mut self, id: WindowId, event: &Event) -> bool {
        let consumed = match self.surfaces.get_mut(&id) {
            Some(component) => {
                let mut ctx = EventCtx::new(id, &mut self.app_requests);
                component.handle_event(event, &mut ctx)
            }
            None => false,
        };
        self.drain_app_requests();
        consumed
    }

    fn drain_app_requests(&mut self) {
        let requests: Vec<AppRequest> = self.app_requests.drain(..).collect();
        for request in requests {
            match request {
                AppRequest::SetTitle { window, title } => self.set_window_title(window, title),
                AppRequest::CloseWindow(window) => self.close_window(window),
                AppRequest::OpenFile(path) => {
                    self.shell_requests.push(ShellRequest::OpenFile(path));
                }
                AppRequest::Launch(app) => {
                    self.shell_requests.push(ShellRequest::Launch(app));
                }
                AppRequest::Alert { title, message } => {
                    self.shell_requests.push(ShellRequest::Alert { title, message });
                }
            }
        }
    }

    fn sync_taskbar(&mut self) {
        self.taskbar.sync(&self.registry);
    }

    /// Paint all visible windows back to front, then the taskbar on top.
    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        self.apply_viewport(frame.area());
        let active = self.registry.active();
        for id in self.registry.ordered_by_z() {
            let Some(record) = self.registry.get(id).cloned() else {
                continue;
            };
            if record.minimized {
                continue;
            }
            let focused = active == Some(id);
            chrome::render(frame, &record, focused);
            if let Some(component) = self.surfaces.get_mut(&id) {
                component.render(frame, chrome::content_rect(record.bounds), focused);
            }
        }
        let area = frame.area();
        if area.height >= TASKBAR_HEIGHT {
            let bar = Rect {
                x: area.x,
                y: area.y + area.height - TASKBAR_HEIGHT,
                width: area.width,
                height: TASKBAR_HEIGHT,
            };
            self.taskbar.render(frame, bar);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::buffer::Buffer;

    use crate::constants::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};

    struct Probe {
        events: std::rc::Rc<std::cell::RefCell<Vec<Event>>>,
    }

    impl Component for Probe {
        fn render(&mut self, _frame: &mut UiFrame<'_>, _area: Rect, _focused: bool) {}

        fn handle_event(&mut self, event: &Event, _ctx: &mut EventCtx<'_>) -> bool {
            self.events.borrow_mut().push(event.clone());
            true
        }
    }

    fn plain(wm: &mut WindowManager, title: &str) -> WindowId {
        wm.create_window(title, 30, 10, WindowOptions::default(), |_, _| {})
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn left_down(column: u16, row: u16) -> Event {
        mouse(MouseEventKind::Down(MouseButton::Left), column, row)
    }

    #[test]
    fn windows_cascade_from_a_fixed_origin() {
        let mut wm = WindowManager::new();
        let a = plain(&mut wm, "a");
        let b = plain(&mut wm, "b");
        let c = plain(&mut wm, "c");
        assert_eq!(wm.bounds(a).unwrap(), Rect::new(4, 2, 30, 10));
        assert_eq!(wm.bounds(b).unwrap(), Rect::new(6, 4, 30, 10));
        assert_eq!(wm.bounds(c).unwrap(), Rect::new(8, 6, 30, 10));
    }

    #[test]
    fn cascade_wraps_after_the_span() {
        let mut wm = WindowManager::new();
        let mut last = plain(&mut wm, "w");
        for _ in 0..8 {
            last = plain(&mut wm, "w");
        }
        // ninth window: offset (8 * 2) % 16 == 0, back at the origin
        assert_eq!(wm.bounds(last).unwrap().x, 4);
        assert_eq!(wm.bounds(last).unwrap().y, 2);
    }

    #[test]
    fn create_focuses_the_new_window() {
        let mut wm = WindowManager::new();
        let a = plain(&mut wm, "a");
        assert_eq!(wm.active_window(), Some(a));
        let b = plain(&mut wm, "b");
        assert_eq!(wm.active_window(), Some(b));
        assert_eq!(wm.ordered_by_z(), vec![a, b]);
        wm.focus_window(a);
        assert_eq!(wm.ordered_by_z(), vec![b, a]);
    }

    #[test]
    fn minimize_hides_and_clears_active() {
        let mut wm = WindowManager::new();
        let a = plain(&mut wm, "a");
        wm.minimize_window(a);
        assert!(wm.is_minimized(a));
        assert_eq!(wm.active_window(), None);
        assert_eq!(wm.topmost_at(10, 5), None);
        // taskbar still lists it
        assert_eq!(wm.taskbar().entries().len(), 1);
        // focusing a minimized window is a no-op
        wm.focus_window(a);
        assert_eq!(wm.active_window(), None);
        // minimizing again is a no-op
        wm.minimize_window(a);
        assert!(wm.is_minimized(a));
    }

    #[test]
    fn restore_unhides_and_refocuses() {
        let mut wm = WindowManager::new();
        let a = plain(&mut wm, "a");
        let b = plain(&mut wm, "b");
        wm.minimize_window(a);
        wm.restore_window(a);
        assert!(!wm.is_minimized(a));
        assert_eq!(wm.active_window(), Some(a));
        assert_eq!(wm.ordered_by_z(), vec![b, a]);
        // restoring a visible window changes nothing
        wm.restore_window(b);
        assert_eq!(wm.active_window(), Some(a));
    }

    #[test]
    fn maximize_toggles_and_restores_exact_bounds() {
        let mut wm = WindowManager::new();
        let a = plain(&mut wm, "a");
        let normal = wm.bounds(a).unwrap();
        wm.maximize_window(a);
        assert!(wm.is_maximized(a));
        assert_eq!(wm.bounds(a).unwrap(), wm.desktop_area());
        wm.maximize_window(a);
        assert!(!wm.is_maximized(a));
        assert_eq!(wm.bounds(a).unwrap(), normal);
    }

    #[test]
    fn maximize_respects_window_options() {
        let mut wm = WindowManager::new();
        let a = wm.create_window("dlg", 30, 10, WindowOptions::dialog(), |_, _| {});
        let before = wm.bounds(a).unwrap();
        wm.maximize_window(a);
        assert!(!wm.is_maximized(a));
        assert_eq!(wm.bounds(a).unwrap(), before);
    }

    #[test]
    fn minimize_preserves_the_maximized_state() {
        let mut wm = WindowManager::new();
        let a = plain(&mut wm, "a");
        wm.maximize_window(a);
        wm.minimize_window(a);
        assert!(wm.is_maximized(a));
        wm.restore_window(a);
        assert!(wm.is_maximized(a));
        assert_eq!(wm.bounds(a).unwrap(), wm.desktop_area());
    }

    #[test]
    fn close_does_not_transfer_focus() {
        let mut wm = WindowManager::new();
        let a = plain(&mut wm, "a");
        let b = plain(&mut wm, "b");
        wm.close_window(b);
        assert_eq!(wm.active_window(), None);
        assert_eq!(wm.window_count(), 1);
        assert!(wm.bounds(a).is_some());
        // closing an unknown id is silently ignored
        wm.close_window(b);
        assert_eq!(wm.window_count(), 1);
    }

    #[test]
    fn set_window_title_updates_the_taskbar() {
        let mut wm = WindowManager::new();
        let a = plain(&mut wm, "before");
        wm.set_window_title(a, "after".into());
        assert_eq!(wm.title(a), Some("after"));
        assert_eq!(wm.taskbar().entries()[0].title, "after");
    }

    #[test]
    fn clicking_the_titlebar_starts_a_drag() {
        let mut wm = WindowManager::new();
        let a = plain(&mut wm, "a");
        // titlebar row is bounds.y + 1 == 3
        assert!(wm.handle_event(&left_down(12, 3)));
        wm.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 17, 8));
        assert_eq!(wm.bounds(a).unwrap(), Rect::new(9, 7, 30, 10));
        wm.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 17, 8));
        // a later drag event without a press does nothing
        wm.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 30, 12));
        assert_eq!(wm.bounds(a).unwrap(), Rect::new(9, 7, 30, 10));
    }

    #[test]
    fn closing_mid_drag_cancels_the_drag() {
        let mut wm = WindowManager::new();
        let a = plain(&mut wm, "a");
        wm.handle_event(&left_down(12, 3));
        wm.close_window(a);
        // must not panic or resurrect the window
        wm.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 17, 8));
        assert_eq!(wm.window_count(), 0);
    }

    #[test]
    fn resize_from_the_corner_clamps_at_minimums() {
        let mut wm = WindowManager::new();
        let a = plain(&mut wm, "a");
        // corner cell of Rect::new(4, 2, 30, 10)
        assert!(wm.handle_event(&left_down(33, 11)));
        wm.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 43, 15));
        assert_eq!(wm.bounds(a).unwrap(), Rect::new(4, 2, 40, 14));
        wm.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 0, 0));
        assert_eq!(
            wm.bounds(a).unwrap(),
            Rect::new(4, 2, MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)
        );
        wm.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 0, 0));
    }

    #[test]
    fn fixed_size_windows_ignore_the_resize_corner() {
        let mut wm = WindowManager::new();
        let a = wm.create_window(
            "dlg",
            30,
            10,
            WindowOptions {
                no_resize: true,
                ..Default::default()
            },
            |_, _| {},
        );
        wm.handle_event(&left_down(33, 11));
        wm.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 43, 15));
        assert_eq!(wm.bounds(a).unwrap(), Rect::new(4, 2, 30, 10));
    }

    #[test]
    fn titlebar_buttons_minimize_maximize_close() {
        let mut wm = WindowManager::new();
        let a = plain(&mut wm, "a");
        // buttons sit at columns 30..=32 on row 3
        wm.handle_event(&left_down(30, 3));
        assert!(wm.is_minimized(a));
        wm.restore_window(a);
        wm.handle_event(&left_down(31, 3));
        assert!(wm.is_maximized(a));
        // maximized bounds moved the buttons; recompute from desktop area
        let bounds = wm.bounds(a).unwrap();
        let close_x = bounds.x + bounds.width - 2;
        wm.handle_event(&left_down(close_x, bounds.y + 1));
        assert_eq!(wm.window_count(), 0);
    }

    #[test]
    fn sysmenu_single_click_requests_a_menu_double_click_closes() {
        let mut wm = WindowManager::new();
        let a = plain(&mut wm, "a");
        wm.handle_event(&left_down(5, 3));
        let requests = wm.take_shell_requests();
        assert_eq!(
            requests,
            vec![ShellRequest::WindowMenu {
                window: a,
                column: 5,
                row: 4
            }]
        );
        // second click within the double-click window closes
        wm.handle_event(&left_down(5, 3));
        assert_eq!(wm.window_count(), 0);
        assert!(wm.take_shell_requests().is_empty());
    }

    #[test]
    fn content_clicks_reach_the_component_button_clicks_do_not() {
        let events = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut wm = WindowManager::new();
        let probe = events.clone();
        wm.create_window("a", 30, 10, WindowOptions::default(), move |content, _| {
            content.set_component(Box::new(Probe { events: probe }));
        });
        wm.handle_event(&left_down(10, 6));
        assert_eq!(events.borrow().len(), 1);
        wm.handle_event(&left_down(30, 3));
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn key_events_go_to_the_active_window_only() {
        use crossterm::event::{KeyCode, KeyEvent};
        let events = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut wm = WindowManager::new();
        let probe = events.clone();
        let a = wm.create_window("a", 30, 10, WindowOptions::default(), move |content, _| {
            content.set_component(Box::new(Probe { events: probe }));
        });
        let key = Event::Key(KeyEvent::from(KeyCode::Char('x')));
        assert!(wm.handle_event(&key));
        assert_eq!(events.borrow().len(), 1);
        wm.minimize_window(a);
        assert!(!wm.handle_event(&key));
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn focus_follows_mouse_on_hover() {
        let mut wm = WindowManager::new();
        let a = plain(&mut wm, "a");
        let _b = plain(&mut wm, "b");
        wm.set_focus_follows_mouse(true);
        // hover over a cell only window a covers
        wm.handle_event(&mouse(MouseEventKind::Moved, 4, 2));
        assert_eq!(wm.active_window(), Some(a));
    }

    #[test]
    fn hover_without_the_flag_does_not_focus() {
        let mut wm = WindowManager::new();
        let a = plain(&mut wm, "a");
        let b = plain(&mut wm, "b");
        wm.handle_event(&mouse(MouseEventKind::Moved, 4, 2));
        assert_eq!(wm.active_window(), Some(b));
        let _ = a;
    }

    #[test]
    fn viewport_change_tracks_maximized_windows() {
        let mut wm = WindowManager::new();
        let a = plain(&mut wm, "a");
        wm.maximize_window(a);
        wm.apply_viewport(Rect::new(0, 0, 100, 40));
        assert_eq!(wm.bounds(a).unwrap(), Rect::new(0, 0, 100, 38));
    }

    #[test]
    fn render_paints_back_to_front_with_taskbar_on_top() {
        let mut wm = WindowManager::new();
        let a = plain(&mut wm, "a");
        let b = plain(&mut wm, "b");
        wm.focus_window(a);
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);
        wm.render(&mut ui);
        // a overlaps b where their bounds intersect; a's corner wins
        assert_eq!(buf.cell((4, 2)).unwrap().symbol(), "┌");
        let _ = b;
        // taskbar occupies the bottom strip
        assert!(wm.taskbar().contains(0, 22));
        assert!(wm.taskbar().contains(79, 23));
        assert!(!wm.taskbar().contains(0, 21));
    }
}
