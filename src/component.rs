//! Window content components.
//!
//! A content builder installs one `Component` per window at creation time;
//! the manager renders it into the content area every frame and forwards
//! events to it while the window is alive. Coordinates are absolute frame
//! cells; components keep hit rectangles from their last render.

use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::apps::AppId;
use crate::ui::UiFrame;
use crate::window::WindowId;

pub trait Component {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool);

    /// Handle an event routed to this window. Returns true when consumed.
    /// Side effects that reach outside the window go through `ctx`.
    fn handle_event(&mut self, _event: &Event, _ctx: &mut EventCtx<'_>) -> bool {
        false
    }
}

/// Effects a component may request from its host. Drained by the window
/// manager after dispatch; title and close requests are applied there, the
/// rest bubble up to the desktop shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRequest {
    SetTitle { window: WindowId, title: String },
    CloseWindow(WindowId),
    OpenFile(String),
    Launch(AppId),
    Alert { title: String, message: String },
}

pub struct EventCtx<'a> {
    window: WindowId,
    requests: &'a mut Vec<AppRequest>,
}

impl<'a> EventCtx<'a> {
    pub fn new(window: WindowId, requests: &'a mut Vec<AppRequest>) -> Self {
        Self { window, requests }
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    /// Retitle the component's own window.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.requests.push(AppRequest::SetTitle {
            window: self.window,
            title: title.into(),
        });
    }

    /// Close the component's own window.
    pub fn close_window(&mut self) {
        self.requests.push(AppRequest::CloseWindow(self.window));
    }

    /// Ask the shell to open `path` in a text editor window.
    pub fn open_file(&mut self, path: impl Into<String>) {
        self.requests.push(AppRequest::OpenFile(path.into()));
    }

    /// Ask the shell to launch another application.
    pub fn launch(&mut self, app: AppId) {
        self.requests.push(AppRequest::Launch(app));
    }

    /// Ask the shell to raise a message dialog.
    pub fn alert(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.requests.push(AppRequest::Alert {
            title: title.into(),
            message: message.into(),
        });
    }
}
