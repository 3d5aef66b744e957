//! Shared crate-wide constants.

/// Fixed origin of the window cascade, in desktop cells.
pub const CASCADE_ORIGIN_X: u16 = 4;
pub const CASCADE_ORIGIN_Y: u16 = 2;

/// Stagger applied per created window so successive windows don't fully
/// overlap.
pub const CASCADE_STEP: u16 = 2;

/// The cascade offset wraps after this many cells.
pub const CASCADE_SPAN: u16 = 16;

/// Minimum window dimensions enforced by the resize interaction. Resizing
/// below these clamps silently.
pub const MIN_WINDOW_WIDTH: u16 = 20;
pub const MIN_WINDOW_HEIGHT: u16 = 6;

/// Number of columns of a window that must stay inside the desktop when
/// dragging, so the user can grab its chrome again.
pub const DRAG_KEEP_COLS: u16 = 10;

/// Rows reserved at the bottom of the viewport for the taskbar strip.
pub const TASKBAR_HEIGHT: u16 = 2;

/// Chrome metrics: one border row above the titlebar, the titlebar row, one
/// border row/column on each remaining side.
pub const TITLEBAR_ROW: u16 = 1;
pub const CONTENT_TOP_INSET: u16 = 2;
pub const CONTENT_SIDE_INSET: u16 = 1;
pub const CONTENT_BOTTOM_INSET: u16 = 1;

/// Two pointer-downs on the same target within this window count as a
/// double-click (system-menu close, icon launch, file open).
pub const DOUBLE_CLICK_MS: u64 = 500;
