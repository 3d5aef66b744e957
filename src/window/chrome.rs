//! Window chrome: frame geometry, hit testing and painting.
//!
//! The same geometry functions feed both the renderer and the hit tester, so
//! what is drawn and what is clickable cannot drift apart.

use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::constants::{CONTENT_BOTTOM_INSET, CONTENT_SIDE_INSET, CONTENT_TOP_INSET, TITLEBAR_ROW};
use crate::theme;
use crate::ui::{UiFrame, rect_contains};
use crate::window::{WindowOptions, WindowRecord};

const SYSMENU_GLYPH: &str = "≡";
const MINIMIZE_GLYPH: &str = "_";
const MAXIMIZE_GLYPH: &str = "□";
const CLOSE_GLYPH: &str = "X";
const RESIZE_GLYPH: &str = "◢";

/// Where inside a window's bounds a pointer event landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRegion {
    SysMenu,
    Minimize,
    Maximize,
    Close,
    /// Titlebar outside the system menu and buttons; the drag grip.
    Titlebar,
    ResizeHandle,
    Content,
    Border,
}

pub fn titlebar_rect(bounds: Rect) -> Rect {
    Rect {
        x: bounds.x.saturating_add(1),
        y: bounds.y.saturating_add(TITLEBAR_ROW),
        width: bounds.width.saturating_sub(2),
        height: 1,
    }
}

pub fn sysmenu_cell(bounds: Rect) -> Rect {
    Rect {
        x: bounds.x.saturating_add(1),
        y: bounds.y.saturating_add(TITLEBAR_ROW),
        width: 1,
        height: 1,
    }
}

/// Titlebar buttons, left to right, each one cell. Close is always present;
/// minimize and maximize are dropped when the window options disable them.
pub fn buttons(bounds: Rect, options: WindowOptions) -> Vec<(HitRegion, Rect)> {
    let row = bounds.y.saturating_add(TITLEBAR_ROW);
    let mut kinds = Vec::new();
    if !options.no_minimize {
        kinds.push(HitRegion::Minimize);
    }
    if !options.no_maximize {
        kinds.push(HitRegion::Maximize);
    }
    kinds.push(HitRegion::Close);
    let right = bounds.x.saturating_add(bounds.width.saturating_sub(2));
    let count = kinds.len() as u16;
    kinds
        .into_iter()
        .enumerate()
        .map(|(i, kind)| {
            let x = right.saturating_sub(count - 1 - i as u16);
            (kind, Rect { x, y: row, width: 1, height: 1 })
        })
        .collect()
}

pub fn resize_cell(bounds: Rect) -> Rect {
    Rect {
        x: bounds.x.saturating_add(bounds.width.saturating_sub(1)),
        y: bounds.y.saturating_add(bounds.height.saturating_sub(1)),
        width: 1,
        height: 1,
    }
}

/// Interior rectangle handed to the window's content component.
pub fn content_rect(bounds: Rect) -> Rect {
    Rect {
        x: bounds.x.saturating_add(CONTENT_SIDE_INSET),
        y: bounds.y.saturating_add(CONTENT_TOP_INSET),
        width: bounds.width.saturating_sub(CONTENT_SIDE_INSET * 2),
        height: bounds
            .height
            .saturating_sub(CONTENT_TOP_INSET + CONTENT_BOTTOM_INSET),
    }
}

/// Classify a pointer position against a window. Returns `None` when the
/// point is outside the window entirely.
pub fn hit_test(record: &WindowRecord, column: u16, row: u16) -> Option<HitRegion> {
    let bounds = record.bounds;
    if !rect_contains(bounds, column, row) {
        return None;
    }
    if !record.options.no_resize
        && !record.maximized
        && rect_contains(resize_cell(bounds), column, row)
    {
        return Some(HitRegion::ResizeHandle);
    }
    if rect_contains(titlebar_rect(bounds), column, row) {
        if rect_contains(sysmenu_cell(bounds), column, row) {
            return Some(HitRegion::SysMenu);
        }
        for (kind, rect) in buttons(bounds, record.options) {
            if rect_contains(rect, column, row) {
                return Some(kind);
            }
        }
        return Some(HitRegion::Titlebar);
    }
    if rect_contains(content_rect(bounds), column, row) {
        return Some(HitRegion::Content);
    }
    Some(HitRegion::Border)
}

/// Paint the frame, titlebar and content background. The content component
/// renders afterwards into `content_rect`.
pub fn render(frame: &mut UiFrame<'_>, record: &WindowRecord, focused: bool) {
    let bounds = record.bounds;
    if bounds.width < 2 || bounds.height < 2 {
        return;
    }
    let border = Style::default()
        .fg(theme::window_border())
        .bg(theme::window_bg());
    frame.fill(bounds, " ", Style::default().bg(theme::window_bg()));

    let right = bounds.x + bounds.width - 1;
    let bottom = bounds.y + bounds.height - 1;
    for x in bounds.x + 1..right {
        frame.set_string(x, bounds.y, "─", border);
        frame.set_string(x, bottom, "─", border);
    }
    for y in bounds.y + 1..bottom {
        frame.set_string(bounds.x, y, "│", border);
        frame.set_string(right, y, "│", border);
    }
    frame.set_string(bounds.x, bounds.y, "┌", border);
    frame.set_string(right, bounds.y, "┐", border);
    frame.set_string(bounds.x, bottom, "└", border);
    frame.set_string(right, bottom, "┘", border);

    let (bar_bg, bar_fg) = if focused {
        (theme::titlebar_active_bg(), theme::titlebar_active_fg())
    } else {
        (theme::titlebar_inactive_bg(), theme::titlebar_inactive_fg())
    };
    let bar_style = Style::default().bg(bar_bg).fg(bar_fg);
    let bar = titlebar_rect(bounds);
    frame.fill(bar, " ", bar_style);

    let menu_cell = sysmenu_cell(bounds);
    frame.set_string(menu_cell.x, menu_cell.y, SYSMENU_GLYPH, bar_style);

    let button_rects = buttons(bounds, record.options);
    let buttons_start = button_rects
        .first()
        .map(|(_, r)| r.x)
        .unwrap_or(bar.x + bar.width);
    let title_x = menu_cell.x + 2;
    if buttons_start > title_x {
        let avail = (buttons_start - title_x).saturating_sub(1) as usize;
        let title: String = record.title.chars().take(avail).collect();
        frame.set_string(title_x, bar.y, &title, bar_style);
    }
    for (kind, rect) in &button_rects {
        let glyph = match kind {
            HitRegion::Minimize => MINIMIZE_GLYPH,
            HitRegion::Maximize => MAXIMIZE_GLYPH,
            _ => CLOSE_GLYPH,
        };
        frame.set_string(rect.x, rect.y, glyph, bar_style);
    }

    if !record.options.no_resize && !record.maximized {
        let cell = resize_cell(bounds);
        frame.set_string(cell.x, cell.y, RESIZE_GLYPH, border);
    }
}
