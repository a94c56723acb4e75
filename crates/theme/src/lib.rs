//! Theme system for Simply Note It.
//!
//! Two palettes are built in: `light`, the default, and `dark`. Both are
//! described in TOML and parsed once on first use.

mod colors;
mod loader;

pub use colors::Theme;

use ratatui::style::Color;
use std::sync::OnceLock;

/// Name of the theme used when the configured one is unknown.
pub const DEFAULT_THEME: &str = "light";

const THEME_LIGHT_TOML: &str = r#"
[colors]
bg = "White"
fg = "Black"
accented_bg = "Gray"
accented_fg = "Blue"
selected_bg = "LightBlue"
selected_fg = "Black"
found_bg = "Yellow"
disabled = "DarkGray"
error = "Red"
"#;

const THEME_DARK_TOML: &str = r#"
[colors]
bg = "Black"
fg = "White"
accented_bg = "DarkGray"
accented_fg = "Cyan"
selected_bg = "Blue"
selected_fg = "White"
found_bg = { rgb = [128, 112, 0] }
disabled = "Gray"
error = "LightRed"
"#;

static THEME_LIGHT: OnceLock<Theme> = OnceLock::new();
static THEME_DARK: OnceLock<Theme> = OnceLock::new();

/// Hardcoded fallback in case a built-in theme fails to parse.
fn hardcoded_fallback_theme(name: &'static str) -> Theme {
    Theme {
        name,
        bg: Color::Reset,
        fg: Color::Reset,
        accented_bg: Color::Gray,
        accented_fg: Color::Blue,
        selected_bg: Color::LightBlue,
        selected_fg: Color::Black,
        found_bg: Color::Yellow,
        disabled: Color::DarkGray,
        error: Color::Red,
    }
}

fn load_builtin(content: &str, name: &'static str) -> Theme {
    loader::load_theme_from_str(content, name).unwrap_or_else(|_| hardcoded_fallback_theme(name))
}

fn light_theme() -> &'static Theme {
    THEME_LIGHT.get_or_init(|| load_builtin(THEME_LIGHT_TOML, "light"))
}

fn dark_theme() -> &'static Theme {
    THEME_DARK.get_or_init(|| load_builtin(THEME_DARK_TOML, "dark"))
}

impl Theme {
    /// Get a built-in theme by name. Unknown names fall back to
    /// [`DEFAULT_THEME`].
    pub fn get_by_name(name: &str) -> &'static Theme {
        match name {
            "dark" => dark_theme(),
            _ => light_theme(),
        }
    }
}
