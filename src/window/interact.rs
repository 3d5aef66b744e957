//! Pointer interaction state and the pure geometry transforms behind it.
//!
//! Drag and resize are modelled as small state structs captured on pointer
//! down plus pure functions applied on every subsequent drag event, so the
//! clamping rules are testable without a terminal.

use ratatui::layout::Rect;

use crate::constants::{CONTENT_TOP_INSET, DRAG_KEEP_COLS, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};
use crate::window::WindowId;

/// Captured on titlebar pointer-down; deltas are measured from `start`, not
/// from the previous event, so intermediate events can be dropped freely.
#[derive(Debug, Clone, Copy)]
pub struct DragState {
    pub id: WindowId,
    pub start: (u16, u16),
    pub origin: (u16, u16),
}

/// Captured on resize-handle pointer-down.
#[derive(Debug, Clone, Copy)]
pub struct ResizeState {
    pub id: WindowId,
    pub start: (u16, u16),
    pub size: (u16, u16),
}

/// New top-left for a dragged window. The left edge may not leave the desktop
/// and at least `DRAG_KEEP_COLS` columns stay reachable on the right; the top
/// stays above the taskbar with the titlebar visible.
pub fn apply_drag(state: &DragState, desktop: Rect, column: u16, row: u16) -> (u16, u16) {
    let dx = i32::from(column) - i32::from(state.start.0);
    let dy = i32::from(row) - i32::from(state.start.1);
    let max_x = i32::from(desktop.width.saturating_sub(DRAG_KEEP_COLS));
    let max_y = i32::from(desktop.height.saturating_sub(CONTENT_TOP_INSET));
    let x = (i32::from(state.origin.0) + dx).clamp(0, max_x.max(0));
    let y = (i32::from(state.origin.1) + dy).clamp(0, max_y.max(0));
    (x as u16, y as u16)
}

/// New size for a resized window. The top-left corner is fixed; both
/// dimensions clamp at the minimums and never go negative.
pub fn apply_resize(state: &ResizeState, column: u16, row: u16) -> (u16, u16) {
    let dx = i32::from(column) - i32::from(state.start.0);
    let dy = i32::from(row) - i32::from(state.start.1);
    let width = (i32::from(state.size.0) + dx).max(i32::from(MIN_WINDOW_WIDTH));
    let height = (i32::from(state.size.1) + dy).max(i32::from(MIN_WINDOW_HEIGHT));
    (width as u16, height as u16)
}
