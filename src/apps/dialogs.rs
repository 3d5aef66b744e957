//! Alert and prompt dialogs, built as ordinary windows with restrictive
//! options rather than a separate modal layer.

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::component::{Component, EventCtx};
use crate::theme;
use crate::ui::{UiFrame, rect_contains};
use crate::widgets::TextInput;
use crate::window::{WindowId, WindowManager, WindowOptions};

/// Callback invoked with the submitted prompt text.
pub type PromptSubmit = Box<dyn FnMut(&str, &mut EventCtx<'_>)>;

pub fn alert(wm: &mut WindowManager, title: &str, message: &str) -> WindowId {
    let message = message.to_string();
    let height = (message.lines().count() as u16 + 6).max(7);
    wm.create_window(title, 40, height, WindowOptions::dialog(), move |content, _| {
        content.set_component(Box::new(AlertComponent::new(message)));
    })
}

pub fn prompt(
    wm: &mut WindowManager,
    title: &str,
    label: &str,
    initial: &str,
    on_submit: PromptSubmit,
) -> WindowId {
    let component = PromptComponent::new(label, initial, on_submit);
    wm.create_window(title, 40, 8, WindowOptions::dialog(), move |content, _| {
        content.set_component(Box::new(component));
    })
}

pub struct AlertComponent {
    message: String,
    ok_rect: Rect,
}

impl AlertComponent {
    pub fn new(message: String) -> Self {
        Self {
            message,
            ok_rect: Rect::default(),
        }
    }
}

impl Component for AlertComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool) {
        if area.height < 3 || area.width == 0 {
            return;
        }
        let base = Style::default().bg(theme::window_bg()).fg(theme::window_fg());
        frame.fill(area, " ", base);
        for (i, line) in self.message.lines().enumerate() {
            frame.set_string(area.x + 2, area.y + 1 + i as u16, line, base);
        }
        let label = "[ OK ]";
        let width = label.chars().count() as u16;
        self.ok_rect = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + area.height - 2,
            width,
            height: 1,
        };
        let style = if focused {
            base.add_modifier(Modifier::REVERSED)
        } else {
            base
        };
        frame.set_string(self.ok_rect.x, self.ok_rect.y, label, style);
    }

    fn handle_event(&mut self, event: &Event, ctx: &mut EventCtx<'_>) -> bool {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                KeyCode::Enter | KeyCode::Esc => {
                    ctx.close_window();
                    true
                }
                _ => false,
            },
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                if rect_contains(self.ok_rect, mouse.column, mouse.row) {
                    ctx.close_window();
                }
                true
            }
            _ => false,
        }
    }
}

pub struct PromptComponent {
    label: String,
    input: TextInput,
    on_submit: PromptSubmit,
}

impl PromptComponent {
    pub fn new(label: &str, initial: &str, on_submit: PromptSubmit) -> Self {
        Self {
            label: label.to_string(),
            input: TextInput::new(initial),
            on_submit,
        }
    }
}

impl Component for PromptComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool) {
        if area.height < 4 || area.width < 6 {
            return;
        }
        let base = Style::default().bg(theme::window_bg()).fg(theme::window_fg());
        frame.fill(area, " ", base);
        frame.set_string(area.x + 2, area.y + 1, &self.label, base);
        let field_style = Style::default().bg(theme::status_bg()).fg(theme::status_fg());
        let field = Rect {
            x: area.x + 2,
            y: area.y + 2,
            width: area.width - 4,
            height: 1,
        };
        self.input.render(frame, field, field_style, focused);
        frame.set_string(
            area.x + 2,
            area.y + area.height - 1,
            "Enter: accept   Esc: cancel",
            base.add_modifier(Modifier::DIM),
        );
    }

    fn handle_event(&mut self, event: &Event, ctx: &mut EventCtx<'_>) -> bool {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                KeyCode::Enter => {
                    let value = self.input.value().trim().to_string();
                    if !value.is_empty() {
                        (self.on_submit)(&value, ctx);
                    }
                    ctx.close_window();
                    true
                }
                KeyCode::Esc => {
                    ctx.close_window();
                    true
                }
                _ => self.input.handle_key(key),
            },
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::AppRequest;
    use crossterm::event::KeyEvent;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ctx_pair() -> (crate::window::WindowId, Vec<AppRequest>) {
        let mut reg = crate::window::WindowRegistry::new();
        let id = reg.allocate("d".into(), Rect::new(0, 0, 40, 8), WindowOptions::dialog());
        (id, Vec::new())
    }

    #[test]
    fn prompt_submits_trimmed_text_then_closes() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut prompt = PromptComponent::new(
            "Name:",
            "  draft  ",
            Box::new(move |value, _| sink.borrow_mut().push(value.to_string())),
        );
        let (id, mut requests) = ctx_pair();
        let mut ctx = EventCtx::new(id, &mut requests);
        prompt.handle_event(&Event::Key(KeyEvent::from(KeyCode::Enter)), &mut ctx);
        assert_eq!(seen.borrow().as_slice(), ["draft"]);
        assert_eq!(requests, vec![AppRequest::CloseWindow(id)]);
    }

    #[test]
    fn prompt_escape_closes_without_submitting() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut prompt = PromptComponent::new(
            "Name:",
            "x",
            Box::new(move |value, _| sink.borrow_mut().push(value.to_string())),
        );
        let (id, mut requests) = ctx_pair();
        let mut ctx = EventCtx::new(id, &mut requests);
        prompt.handle_event(&Event::Key(KeyEvent::from(KeyCode::Esc)), &mut ctx);
        assert!(seen.borrow().is_empty());
        assert_eq!(requests, vec![AppRequest::CloseWindow(id)]);
    }

    #[test]
    fn alert_closes_on_enter() {
        let mut alert = AlertComponent::new("something happened".to_string());
        let (id, mut requests) = ctx_pair();
        let mut ctx = EventCtx::new(id, &mut requests);
        alert.handle_event(&Event::Key(KeyEvent::from(KeyCode::Enter)), &mut ctx);
        assert_eq!(requests, vec![AppRequest::CloseWindow(id)]);
    }
}
