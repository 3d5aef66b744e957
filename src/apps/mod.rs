//! Built-in applications and their launchers.

pub mod about;
pub mod calculator;
pub mod clock;
pub mod dialogs;
pub mod editor;
pub mod files;
pub mod terminal;

use std::cell::RefCell;
use std::rc::Rc;

use crate::vfs::VirtualFs;
use crate::window::{WindowId, WindowManager};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppId {
    Terminal,
    Editor,
    Files,
    Calculator,
    Clock,
    About,
}

impl AppId {
    pub const ALL: [AppId; 6] = [
        AppId::Terminal,
        AppId::Editor,
        AppId::Files,
        AppId::Calculator,
        AppId::Clock,
        AppId::About,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AppId::Terminal => "Terminal",
            AppId::Editor => "Text Editor",
            AppId::Files => "Files",
            AppId::Calculator => "Calculator",
            AppId::Clock => "Clock",
            AppId::About => "About",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            AppId::Terminal => ">_",
            AppId::Editor => "✎ ",
            AppId::Files => "▤ ",
            AppId::Calculator => "± ",
            AppId::Clock => "◷ ",
            AppId::About => "? ",
        }
    }
}

pub fn launch(app: AppId, wm: &mut WindowManager, vfs: &Rc<RefCell<VirtualFs>>) -> WindowId {
    match app {
        AppId::Terminal => terminal::launch(wm, vfs),
        AppId::Editor => editor::launch(wm, vfs, None),
        AppId::Files => files::launch(wm, vfs),
        AppId::Calculator => calculator::launch(wm),
        AppId::Clock => clock::launch(wm),
        AppId::About => about::launch(wm),
    }
}
