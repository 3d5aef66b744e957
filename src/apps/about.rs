//! About dialog.

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use indoc::formatdoc;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::component::{Component, EventCtx};
use crate::theme;
use crate::ui::{UiFrame, rect_contains};
use crate::window::{WindowId, WindowManager, WindowOptions};

pub fn launch(wm: &mut WindowManager) -> WindowId {
    wm.create_window("About", 44, 13, WindowOptions::dialog(), |content, _| {
        content.set_component(Box::new(AboutComponent::new()));
    })
}

pub struct AboutComponent {
    text: String,
    ok_rect: Rect,
}

impl Default for AboutComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl AboutComponent {
    pub fn new() -> Self {
        let hostname = hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "localhost".to_string());
        let text = formatdoc! {"
            {name} {version}

            {description}

            Host:     {hostname}
            Platform: {os}
            ",
            name = env!("CARGO_PKG_NAME"),
            version = env!("CARGO_PKG_VERSION"),
            description = env!("CARGO_PKG_DESCRIPTION"),
            hostname = hostname,
            os = std::env::consts::OS,
        };
        Self {
            text,
            ok_rect: Rect::default(),
        }
    }
}

impl Component for AboutComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool) {
        if area.height < 3 || area.width == 0 {
            return;
        }
        let base = Style::default().bg(theme::window_bg()).fg(theme::window_fg());
        frame.fill(area, " ", base);
        for (i, line) in self.text.lines().enumerate() {
            let style = if i == 0 {
                base.add_modifier(Modifier::BOLD)
            } else {
                base
            };
            frame.set_string(area.x + 2, area.y + 1 + i as u16, line, style);
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
