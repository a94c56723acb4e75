//! Per-user directories (`$XDG_CONFIG_HOME`, `$XDG_CACHE_HOME` and their
//! platform equivalents).

use anyhow::{anyhow, Result};
use std::path::PathBuf;

const DIR_NAME: &str = "simply-note-it";

fn app_dir(base: Option<PathBuf>, kind: &str) -> Result<PathBuf> {
    base.map(|dir| dir.join(DIR_NAME))
        .ok_or_else(|| anyhow!("No {kind} directory for this user"))
}

/// Where `config.toml` and `themes/` live.
pub fn get_config_dir() -> Result<PathBuf> {
    app_dir(dirs::config_dir(), "config")
}

/// Where the log file goes.
pub fn get_cache_dir() -> Result<PathBuf> {
    app_dir(dirs::cache_dir(), "cache")
}
