//! Wall clock. Redraws every frame; the shell's tick interval keeps the
//! seconds moving without input.

use chrono::Local;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::component::Component;
use crate::theme;
use crate::ui::UiFrame;
use crate::window::{WindowId, WindowManager, WindowOptions};

pub fn launch(wm: &mut WindowManager) -> WindowId {
    wm.create_window(
        "Clock",
        30,
        9,
        WindowOptions {
            no_resize: true,
            ..Default::default()
        },
        |content, _| {
            content.set_component(Box::new(ClockComponent));
        },
    )
}

pub struct ClockComponent;

impl Component for ClockComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _focused: bool) {
        if area.height < 3 || area.width == 0 {
            return;
        }
        let base = Style::default().bg(theme::window_bg()).fg(theme::window_fg());
        frame.fill(area, " ", base);
        let now = Local::now();
        let time = now.format("%H:%M:%S").to_string();
        let date = now.format("%A, %B %e, %Y").to_string();
        let mid = area.y + area.height / 2;
        let center = |text: &str| {
            area.x + (area.width.saturating_sub(text.chars().count() as u16)) / 2
        };
        frame.set_string(
            center(&time),
            mid.saturating_sub(1),
            &time,
            base.add_modifier(Modifier::BOLD),
        );
        frame.set_string(center(&date), mid + 1, &date, base);
    }
}
