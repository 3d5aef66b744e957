//! Drawing helpers shared by the window chrome, taskbar, menus and apps.
//!
//! `UiFrame` wraps the frame buffer and clamps every write to the visible
//! area, so components can compute rectangles that drift partially off-screen
//! (mid-drag, cascade near the edge) without corrupting the buffer.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Construct a `UiFrame` directly from an area and buffer. Powers the
    /// offscreen rendering used by tests.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    /// Write `text` starting at `(x, y)`, truncated to the frame area.
    pub fn set_string(&mut self, x: u16, y: u16, text: &str, style: Style) {
        let bounds = self.area;
        safe_set_string(self.buffer, bounds, x, y, text, style);
    }

    /// Fill every cell of `rect` (clipped to the frame) with `symbol`.
    pub fn fill(&mut self, rect: Rect, symbol: &str, style: Style) {
        let clipped = rect.intersection(self.area);
        for y in clipped.y..clipped.y.saturating_add(clipped.height) {
            for x in clipped.x..clipped.x.saturating_add(clipped.width) {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.set_symbol(symbol);
                    cell.set_style(style);
                }
            }
        }
    }
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    if available == 0 {
        return;
    }
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_edges() {
        let rect = Rect {
            x: 2,
            y: 3,
            width: 4,
            height: 2,
        };
        assert!(rect_contains(rect, 2, 3));
        assert!(rect_contains(rect, 5, 4));
        assert!(!rect_contains(rect, 6, 3));
        assert!(!rect_contains(rect, 2, 5));
    }

    #[test]
    fn truncate_to_width_short_and_long() {
        assert_eq!(truncate_to_width("abc", 5), "abc");
        assert_eq!(truncate_to_width("abcdef", 3), "abc");
    }

    #[test]
    fn set_string_clips_to_area() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 5,
            height: 1,
        };
        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);
        ui.set_string(3, 0, "hello", Style::default());
        assert_eq!(buf.cell((3, 0)).unwrap().symbol(), "h");
        assert_eq!(buf.cell((4, 0)).unwrap().symbol(), "e");
        // out-of-bounds writes are ignored, never panic
        let mut ui = UiFrame::from_parts(area, &mut buf);
        ui.set_string(9, 9, "x", Style::default());
    }

    #[test]
    fn fill_clips_to_area() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 4,
            height: 2,
        };
        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);
        ui.fill(
            Rect {
                x: 2,
                y: 1,
                width: 10,
                height: 10,
            },
            "#",
            Style::default(),
        );
        assert_eq!(buf.cell((2, 1)).unwrap().symbol(), "#");
        assert_eq!(buf.cell((3, 1)).unwrap().symbol(), "#");
        assert_eq!(buf.cell((1, 1)).unwrap().symbol(), " ");
    }
}
