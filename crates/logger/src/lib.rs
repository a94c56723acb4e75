//! Logging infrastructure for Simply Note It.
//!
//! A process-wide logger writing timestamped lines to a file. The screen
//! belongs to the editor, so nothing is ever printed to stdout/stderr from
//! here.

use chrono::Local;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

#[derive(Debug, Clone)]
struct LogEntry {
    /// Local time, `HH:MM:SS`
    timestamp: String,
    level: LogLevel,
    message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.timestamp, self.level, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match s.trim().to_ascii_lowercase().as_str() {
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warn" | "warning" => LogLevel::Warn,
            "error" => LogLevel::Error,
            other => return Err(format!("Unknown log level: {other}")),
        };
        Ok(level)
    }
}

/// Truncate (or create) the log file and write the run header.
fn open_sink(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .ok()?;
    let _ = writeln!(file, "=== Simply Note It Log Start ===");
    Some(file)
}

struct Logger {
    min_level: LogLevel,
    /// `None` when the file could not be opened; entries are then dropped.
    sink: Option<File>,
}

impl Logger {
    fn new(file_path: PathBuf, min_level: LogLevel) -> Self {
        Self {
            min_level,
            sink: open_sink(&file_path),
        }
    }

    fn record(&mut self, level: LogLevel, message: String) {
        if level < self.min_level {
            return;
        }
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        let entry = LogEntry {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            level,
            message,
        };
        let _ = writeln!(sink, "{entry}");
    }
}

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

/// Initialize the global logger.
///
/// Subsequent calls are ignored. Messages logged before initialization are
/// dropped, which keeps library code and unit tests free of setup.
pub fn init(file_path: PathBuf, min_level: LogLevel) {
    LOGGER.get_or_init(|| Mutex::new(Logger::new(file_path, min_level)));
}

fn log(level: LogLevel, message: String) {
    if let Some(logger) = LOGGER.get() {
        if let Ok(mut logger) = logger.lock() {
            logger.record(level, message);
        }
    }
}

pub fn debug(message: impl Into<String>) {
    log(LogLevel::Debug, message.into());
}

pub fn info(message: impl Into<String>) {
    log(LogLevel::Info, message.into());
}

pub fn warn(message: impl Into<String>) {
    log(LogLevel::Warn, message.into());
}

pub fn error(message: impl Into<String>) {
    log(LogLevel::Error, message.into());
}
