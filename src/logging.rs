// Structured logging with tracing. The terminal belongs to the TUI, so events
// go to a file under the state directory and never to stderr.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::app_dirs::AppDirs;

pub const DEFAULT_LEVEL: &str = "info";

/// Install the global subscriber writing to the default log file.
/// Returns false when the file could not be opened; the app runs unlogged then.
pub fn init_logging(level: &str) -> bool {
    match AppDirs::log_path() {
        Some(path) => init_logging_to(&path, level).is_ok(),
        None => false,
    }
}

pub fn init_logging_to(path: &Path, level: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // a second init (e.g. across tests) keeps the first subscriber
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
