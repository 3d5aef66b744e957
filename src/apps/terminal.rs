//! Terminal emulator over the virtual filesystem.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Local;
use crossterm::event::{Event, KeyCode, KeyEventKind, MouseEventKind};
use indoc::indoc;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::component::{Component, EventCtx};
use crate::theme;
use crate::ui::UiFrame;
use crate::vfs::{HOME_DIR, VirtualFs};
use crate::widgets::TextInput;
use crate::window::{WindowId, WindowManager, WindowOptions};

const USER: &str = "user";
const HOST: &str = "term-desk";

pub fn launch(wm: &mut WindowManager, vfs: &Rc<RefCell<VirtualFs>>) -> WindowId {
    let vfs = vfs.clone();
    wm.create_window("Terminal", 60, 16, WindowOptions::default(), move |content, _| {
        content.set_component(Box::new(TerminalComponent::new(vfs)));
    })
}

/// Result of one command: output text (possibly multi-line), whether it is
/// an error, and whether the scrollback should be wiped first.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub error: bool,
    pub clear: bool,
}

impl CommandOutput {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    fn err(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            error: true,
            clear: false,
        }
    }
}

/// Run one command line against the filesystem. Free function so the whole
/// command table is testable without a window.
pub fn execute_command(vfs: &mut VirtualFs, line: &str) -> CommandOutput {
    let words = match shell_words::split(line) {
        Ok(words) => words,
        Err(err) => return CommandOutput::err(format!("syntax error: {err}")),
    };
    let Some((cmd, args)) = words.split_first() else {
        return CommandOutput::default();
    };
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match cmd.as_str() {
        "help" => CommandOutput::ok(indoc! {"
            Available commands:
              help            show this help
              ls [path]       list directory contents
              cd [path]       change the working directory
              pwd             print the working directory
              cat <file>      print file contents
              echo [text]     print text
              mkdir <dir>     create a directory
              touch <file>    create an empty file
              rm <path>       remove a file or directory
              env             print environment variables
              date            print the current date and time
              whoami          print the current user
              uname [-a]      print system information
              clear           clear the screen"}),
        "ls" => {
            let path = args.first().copied().unwrap_or(".");
            match vfs.list_directory(path) {
                Ok(entries) => {
                    let mut dirs: Vec<_> = entries.iter().filter(|e| e.is_dir).collect();
                    let mut files: Vec<_> = entries.iter().filter(|e| !e.is_dir).collect();
                    dirs.sort_by(|a, b| a.name.cmp(&b.name));
                    files.sort_by(|a, b| a.name.cmp(&b.name));
                    let lines: Vec<String> = dirs
                        .into_iter()
                        .map(|e| format!("drwxr-xr-x  {:>6}  {}/", "-", e.name))
                        .chain(
                            files
                                .into_iter()
                                .map(|e| format!("-rw-r--r--  {:>6}  {}", e.size, e.name)),
                        )
                        .collect();
                    CommandOutput::ok(lines.join("\n"))
                }
                Err(err) => CommandOutput::err(format!("ls: {path}: {err}")),
            }
        }
        "cd" => {
            let path = args.first().copied().unwrap_or("~");
            match vfs.change_directory(path) {
                Ok(_) => CommandOutput::default(),
                Err(err) => CommandOutput::err(format!("cd: {path}: {err}")),
            }
        }
        "pwd" => CommandOutput::ok(vfs.current_path()),
        "cat" => match args.first() {
            None => CommandOutput::err("cat: missing operand"),
            Some(path) => match vfs.read_file(path) {
                Ok(content) => CommandOutput::ok(content),
                Err(err) => CommandOutput::err(format!("cat: {path}: {err}")),
            },
        },
        "echo" => CommandOutput::ok(args.join(" ")),
        "mkdir" => match args.first() {
            None => CommandOutput::err("mkdir: missing operand"),
            Some(path) => match vfs.create_directory(path) {
                Ok(()) => CommandOutput::default(),
                Err(err) => {
                    CommandOutput::err(format!("mkdir: cannot create directory '{path}': {err}"))
                }
            },
        },
        "touch" => match args.first() {
            None => CommandOutput::err("touch: missing operand"),
            Some(path) => {
                // existing files are left untouched
                if vfs.read_file(path).is_ok() {
                    return CommandOutput::default();
                }
                match vfs.write_file(path, "") {
                    Ok(()) => CommandOutput::default(),
                    Err(err) => CommandOutput::err(format!("touch: cannot touch '{path}': {err}")),
                }
            }
        },
        "rm" => match args.first() {
            None => CommandOutput::err("rm: missing operand"),
            Some(path) => match vfs.remove(path) {
                Ok(()) => CommandOutput::default(),
                Err(err) => CommandOutput::err(format!("rm: cannot remove '{path}': {err}")),
            },
        },
        "env" => CommandOutput::ok(format!(
            "HOME={HOME_DIR}\nUSER={USER}\nSHELL=/bin/sh\nPATH=/usr/bin:/bin\nTERM=vt100\nPWD={}",
            vfs.current_path()
        )),
        "date" => CommandOutput::ok(Local::now().format("%a %b %e %H:%M:%S %Y").to_string()),
        "whoami" => CommandOutput::ok(USER),
        "uname" => {
            if args.first() == Some(&"-a") {
                CommandOutput::ok(format!("{HOST} 1.0 simulated x86_64"))
            } else {
                CommandOutput::ok(HOST)
            }
        }
        "clear" => CommandOutput {
            clear: true,
            ..Default::default()
        },
        other => CommandOutput::err(format!("{other}: command not found")),
    }
}

/// Abbreviate the home directory to `~` for the prompt.
fn display_path(path: &str) -> String {
    if path == HOME_DIR {
        "~".to_string()
    } else if let Some(rest) = path.strip_prefix(HOME_DIR) {
        format!("~{rest}")
    } else {
        path.to_string()
    }
}

pub struct TerminalComponent {
    vfs: Rc<RefCell<VirtualFs>>,
    lines: Vec<(String, bool)>,
    input: TextInput,
    history: Vec<String>,
    history_pos: Option<usize>,
    scroll: usize,
}

impl TerminalComponent {
    pub fn new(vfs: Rc<RefCell<VirtualFs>>) -> Self {
        Self {
            vfs,
            lines: vec![
                (
                    format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
                    false,
                ),
                ("Type 'help' for a list of commands.".to_string(), false),
                (String::new(), false),
            ],
            input: TextInput::default(),
            history: Vec::new(),
            history_pos: None,
            scroll: 0,
        }
    }

    fn prompt(&self) -> String {
        format!(
            "{USER}@{HOST}:{}$ ",
            display_path(self.vfs.borrow().current_path())
        )
    }

    fn run_line(&mut self) {
        let line = self.input.value().to_string();
        self.lines.push((format!("{}{line}", self.prompt()), false));
        self.input.clear();
        self.history_pos = None;
        self.scroll = 0;
        if line.trim().is_empty() {
            return;
        }
        self.history.push(line.clone());
        let output = execute_command(&mut self.vfs.borrow_mut(), &line);
        if output.clear {
            self.lines.clear();
            return;
        }
        if !output.text.is_empty() {
            for out in output.text.lines() {
                self.lines.push((out.to_string(), output.error));
            }
        }
    }

    fn history_step(&mut self, back: bool) {
        if self.history.is_empty() {
            return;
        }
        let next = match (self.history_pos, back) {
            (None, true) => Some(self.history.len() - 1),
            (None, false) => None,
            (Some(0), true) => Some(0),
            (Some(i), true) => Some(i - 1),
            (Some(i), false) if i + 1 < self.history.len() => Some(i + 1),
            (Some(_), false) => None,
        };
        self.history_pos = next;
        match next {
            Some(i) => self.input.set_value(&self.history[i]),
            None => self.input.clear(),
        }
    }
}

impl Component for TerminalComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let base = Style::default().bg(theme::window_bg()).fg(theme::window_fg());
        frame.fill(area, " ", base);
        let rows = area.height.saturating_sub(1) as usize;
        let total = self.lines.len();
        self.scroll = self.scroll.min(total.saturating_sub(rows));
        let end = total - self.scroll;
        let start = end.saturating_sub(rows);
        for (i, (line, error)) in self.lines[start..end].iter().enumerate() {
            let style = if *error { base.fg(theme::error_fg()) } else { base };
            frame.set_string(area.x, area.y + i as u16, line, style);
        }
        let prompt = self.prompt();
        let prompt_row = area.y + area.height - 1;
        let prompt_style = base.fg(theme::terminal_prompt_fg());
        frame.set_string(area.x, prompt_row, &prompt, prompt_style);
        let prompt_len = (prompt.chars().count() as u16).min(area.width);
        let input_area = Rect {
            x: area.x + prompt_len,
            y: prompt_row,
            width: area.width.saturating_sub(prompt_len),
            height: 1,
        };
        self.input.render(frame, input_area, base, focused);
    }

    fn handle_event(&mut self, event: &Event, _ctx: &mut EventCtx<'_>) -> bool {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                KeyCode::Enter => {
                    self.run_line();
                    true
                }
                KeyCode::Up => {
                    self.history_step(true);
                    true
                }
                KeyCode::Down => {
                    self.history_step(false);
                    true
                }
                _ => self.input.handle_key(key),
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => {
                    self.scroll += 1;
                    true
                }
                MouseEventKind::ScrollDown => {
                    self.scroll = self.scroll.saturating_sub(1);
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn run(vfs: &mut VirtualFs, line: &str) -> CommandOutput {
        execute_command(vfs, line)
    }

    #[test]
    fn pwd_cd_and_errors() {
        let mut vfs = VirtualFs::new();
        assert_eq!(run(&mut vfs, "pwd").text, HOME_DIR);
        assert_eq!(run(&mut vfs, "cd documents"), CommandOutput::default());
        assert_eq!(run(&mut vfs, "pwd").text, "/home/user/documents");
        let err = run(&mut vfs, "cd nowhere");
        assert!(err.error);
        assert_eq!(err.text, "cd: nowhere: No such file or directory");
        // bare cd goes home
        run(&mut vfs, "cd");
        assert_eq!(run(&mut vfs, "pwd").text, HOME_DIR);
    }

    #[test]
    fn ls_lists_directories_before_files() {
        let mut vfs = VirtualFs::new();
        let out = run(&mut vfs, "ls");
        let lines: Vec<&str> = out.text.lines().collect();
        assert!(lines[0].starts_with("drwxr-xr-x"));
        assert!(lines[0].ends_with("documents/"));
        assert!(lines.last().unwrap().contains(".profile"));
    }

    #[test]
    fn cat_prints_files_and_reports_errors() {
        let mut vfs = VirtualFs::new();
        let out = run(&mut vfs, "cat documents/readme.txt");
        assert!(out.text.starts_with("Welcome!"));
        assert!(run(&mut vfs, "cat documents").error);
        assert_eq!(run(&mut vfs, "cat").text, "cat: missing operand");
    }

    #[test]
    fn echo_joins_arguments_with_quoting() {
        let mut vfs = VirtualFs::new();
        assert_eq!(run(&mut vfs, "echo one two").text, "one two");
        assert_eq!(run(&mut vfs, "echo 'one  two'").text, "one  two");
        assert!(run(&mut vfs, "echo 'unterminated").error);
    }

    #[test]
    fn mkdir_touch_rm_roundtrip() {
        let mut vfs = VirtualFs::new();
        assert_eq!(run(&mut vfs, "mkdir projects"), CommandOutput::default());
        assert!(run(&mut vfs, "mkdir projects").error);
        assert_eq!(run(&mut vfs, "touch projects/a.txt"), CommandOutput::default());
        // touch on an existing file is a no-op
        assert_eq!(run(&mut vfs, "touch projects/a.txt"), CommandOutput::default());
        assert_eq!(run(&mut vfs, "rm projects"), CommandOutput::default());
        assert!(run(&mut vfs, "rm projects").error);
    }

    #[test]
    fn misc_commands() {
        let mut vfs = VirtualFs::new();
        assert_eq!(run(&mut vfs, "whoami").text, "user");
        assert_eq!(run(&mut vfs, "uname").text, HOST);
        assert!(run(&mut vfs, "uname -a").text.contains("x86_64"));
        assert!(!run(&mut vfs, "date").text.is_empty());
        assert!(run(&mut vfs, "env").text.contains("HOME=/home/user"));
        assert!(run(&mut vfs, "clear").clear);
        let unknown = run(&mut vfs, "frobnicate");
        assert!(unknown.error);
        assert_eq!(unknown.text, "frobnicate: command not found");
        assert_eq!(run(&mut vfs, "   "), CommandOutput::default());
    }

    fn press(term: &mut TerminalComponent, code: KeyCode) {
        let mut reg = crate::window::WindowRegistry::new();
        let id = reg.allocate("t".into(), Rect::new(0, 0, 20, 6), WindowOptions::default());
        let mut requests = Vec::new();
        let mut ctx = EventCtx::new(id, &mut requests);
        term.handle_event(&Event::Key(KeyEvent::from(code)), &mut ctx);
    }

    fn type_line(term: &mut TerminalComponent, line: &str) {
        for c in line.chars() {
            press(term, KeyCode::Char(c));
        }
        press(term, KeyCode::Enter);
    }

    #[test]
    fn enter_echoes_prompt_and_output() {
        let vfs = Rc::new(RefCell::new(VirtualFs::new()));
        let mut term = TerminalComponent::new(vfs);
        let before = term.lines.len();
        type_line(&mut term, "pwd");
        assert_eq!(term.lines.len(), before + 2);
        assert_eq!(term.lines[before].0, "user@term-desk:~$ pwd");
        assert_eq!(term.lines[before + 1].0, HOME_DIR);
    }

    #[test]
    fn history_recall_with_arrows() {
        let vfs = Rc::new(RefCell::new(VirtualFs::new()));
        let mut term = TerminalComponent::new(vfs);
        type_line(&mut term, "pwd");
        type_line(&mut term, "whoami");
        press(&mut term, KeyCode::Up);
        assert_eq!(term.input.value(), "whoami");
        press(&mut term, KeyCode::Up);
        assert_eq!(term.input.value(), "pwd");
        press(&mut term, KeyCode::Down);
        assert_eq!(term.input.value(), "whoami");
        press(&mut term, KeyCode::Down);
        assert_eq!(term.input.value(), "");
    }

    #[test]
    fn clear_wipes_the_scrollback() {
        let vfs = Rc::new(RefCell::new(VirtualFs::new()));
        let mut term = TerminalComponent::new(vfs);
        type_line(&mut term, "clear");
        assert!(term.lines.is_empty());
    }
}
