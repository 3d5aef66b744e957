pub mod apps;
pub mod component;
pub mod constants;
pub mod menu;
pub mod shell;
pub mod taskbar;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod vfs;
pub mod widgets;
pub mod window;
