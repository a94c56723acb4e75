//! Configuration structures.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General application settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Editor settings
    #[serde(default)]
    pub editor: EditorSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// General application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Selected theme name (light, dark, or a user theme)
    #[serde(default = "default_theme_name")]
    pub theme: String,
}

/// Editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Font family shown in the toolbar and kept across size changes
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Initial font size in points
    #[serde(default = "default_font_size")]
    pub font_size: u16,

    /// Maximum number of undo steps per panel
    #[serde(default = "default_max_undo")]
    pub max_undo: usize,

    /// Tab width in cells when rendering
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (optional)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,
}

// Default value functions for serde
fn default_theme_name() -> String {
    defaults::THEME_NAME.to_string()
}

fn default_font_family() -> String {
    defaults::FONT_FAMILY.to_string()
}

fn default_font_size() -> u16 {
    defaults::FONT_SIZE
}

fn default_max_undo() -> usize {
    defaults::MAX_UNDO
}

fn default_tab_size() -> usize {
    defaults::TAB_SIZE
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
        }
    }
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_size: default_font_size(),
            max_undo: default_max_undo(),
            tab_size: default_tab_size(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
        }
    }
}
