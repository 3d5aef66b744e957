use ratatui::style::Color;

// Centralized theme colors. Small helpers rather than constants so the
// palette can later be mapped through terminal capability detection.

pub fn desktop_bg() -> Color {
    Color::Rgb(0x2e, 0x6e, 0x8e)
}

pub fn desktop_fg() -> Color {
    Color::White
}

// Window chrome
pub fn titlebar_active_bg() -> Color {
    Color::Rgb(0x5f, 0x87, 0xaf)
}
pub fn titlebar_active_fg() -> Color {
    Color::White
}
pub fn titlebar_inactive_bg() -> Color {
    Color::DarkGray
}
pub fn titlebar_inactive_fg() -> Color {
    Color::Gray
}
pub fn window_border() -> Color {
    Color::Gray
}
pub fn window_bg() -> Color {
    Color::Black
}
pub fn window_fg() -> Color {
    Color::White
}

// Taskbar
pub fn taskbar_bg() -> Color {
    Color::Rgb(0x3a, 0x3a, 0x3a)
}
pub fn taskbar_fg() -> Color {
    Color::Gray
}
pub fn taskbar_active_bg() -> Color {
    Color::Gray
}
pub fn taskbar_active_fg() -> Color {
    Color::Black
}

// Menus
pub fn menu_bg() -> Color {
    Color::Rgb(0x4a, 0x4a, 0x4a)
}
pub fn menu_fg() -> Color {
    Color::White
}
pub fn menu_selected_bg() -> Color {
    Color::Gray
}
pub fn menu_selected_fg() -> Color {
    Color::Black
}
pub fn menu_disabled_fg() -> Color {
    Color::DarkGray
}

// App accents
pub fn terminal_prompt_fg() -> Color {
    Color::Green
}
pub fn error_fg() -> Color {
    Color::Red
}
pub fn status_bg() -> Color {
    Color::DarkGray
}
pub fn status_fg() -> Color {
    Color::White
}
pub fn display_bg() -> Color {
    Color::Rgb(0xa0, 0xd8, 0xa0)
}
pub fn display_fg() -> Color {
    Color::Black
}
