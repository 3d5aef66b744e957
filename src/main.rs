use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use term_desk::shell::DesktopShell;
use term_desk::tracing_sub;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Focus windows on hover instead of click.
    #[arg(long)]
    focus_follows_mouse: bool,

    /// Redraw interval in milliseconds while idle.
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// Append debug logs to this file (also honors TERM_DESK_LOG).
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    tracing_sub::init(cli.log.as_deref());

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run(&mut terminal, &cli);

    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, cli: &Cli) -> io::Result<()> {
    let mut shell = DesktopShell::new(cli.focus_follows_mouse);
    let tick = Duration::from_millis(cli.tick_ms.max(10));
    loop {
        terminal.draw(|frame| shell.draw(frame))?;
        if event::poll(tick)? {
            let event = event::read()?;
            if let Event::Key(key) = &event
                && key.kind == KeyEventKind::Release
            {
                continue;
            }
            shell.handle_event(&event);
        }
        if shell.should_quit() {
            return Ok(());
        }
    }
}
