// Where log lines go while the dashboard owns the terminal

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

pub const LOG_FILE: &str = "docker-dashboard.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// Colored output only makes sense on a stream someone is watching.
    pub fn ansi(&self) -> bool {
        matches!(self, LogTarget::Stderr)
    }
}

/// A terminal stderr is the dashboard's screen, where a log line would land on
/// the status row and scroll the table. Redirected stderr is used as is.
pub fn target(stderr_is_terminal: bool, cache_dir: Option<&Path>) -> LogTarget {
    match cache_dir {
        Some(dir) if stderr_is_terminal => {
            LogTarget::File(dir.join(env!("CARGO_PKG_NAME")).join(LOG_FILE))
        }
        _ => LogTarget::Stderr,
    }
}

/// Opens the target for appending, creating parent directories.
pub fn open(target: &LogTarget) -> io::Result<BoxMakeWriter> {
    match target {
        LogTarget::Stderr => Ok(BoxMakeWriter::new(io::stderr)),
        LogTarget::File(path) => {
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Ok(BoxMakeWriter::new(Mutex::new(file)))
        }
    }
}
