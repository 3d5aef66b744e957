use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;

/// Environment variable naming the log file. The UI owns the terminal, so
/// there is nowhere sensible to print; without a file target the subscriber
/// is not installed at all.
pub const LOG_ENV: &str = "TERM_DESK_LOG";

/// Initialize the global tracing subscriber, writing to `path` when given,
/// falling back to `TERM_DESK_LOG`. Safe to call multiple times; subsequent
/// calls are no-ops for the global subscriber.
pub fn init(path: Option<&Path>) {
    let target = match path {
        Some(p) => Some(p.to_path_buf()),
        None => std::env::var_os(LOG_ENV).map(Into::into),
    };
    let Some(target) = target else {
        return;
    };
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&target) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
