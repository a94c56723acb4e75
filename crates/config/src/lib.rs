//! Configuration management for Simply Note It.
//!
//! The editor keeps no state of its own between runs, so configuration is
//! read-only: an optional TOML file is parsed if present and never written
//! back. Missing keys take default values.

mod settings;
mod xdg;

pub use settings::{Config, EditorSettings, GeneralSettings, LoggingSettings};
pub use xdg::{get_cache_dir, get_config_dir};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default values as constants
pub mod defaults {
    pub const THEME_NAME: &str = "light";
    pub const FONT_FAMILY: &str = "Consolas";
    pub const FONT_SIZE: u16 = 12;
    pub const MAX_UNDO: usize = 50;
    pub const TAB_SIZE: usize = 4;
    pub const MIN_LOG_LEVEL: &str = "info";
}

/// Application-wide constants that are not user configurable.
pub mod constants {
    /// Product name used in the window title.
    pub const APP_NAME: &str = "Simply Note It";
    /// Font sizes offered by the toolbar selector.
    pub const FONT_SIZES: [u16; 10] = [8, 9, 10, 11, 12, 14, 16, 18, 20, 24];
    /// Seconds a status message stays before reverting to "Ready".
    pub const STATUS_TIMEOUT_SECS: u64 = 3;
    /// Event polling interval (ms).
    pub const EVENT_HANDLER_INTERVAL_MS: u64 = 50;
    /// Log file name inside the cache directory.
    pub const LOG_FILE_NAME: &str = "simply-note-it.log";
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// A missing file yields defaults; the file is never created.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse config content.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Invalid config: {}", e))
    }

    /// Get path to config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Resolve the log file path: explicit setting or the cache directory.
    pub fn log_file_path(&self) -> PathBuf {
        if let Some(ref path) = self.logging.file_path {
            return PathBuf::from(path);
        }
        get_cache_dir()
            .unwrap_or_else(|_| std::env::temp_dir())
            .join(constants::LOG_FILE_NAME)
    }
}
