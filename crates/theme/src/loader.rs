//! Theme loading from TOML.

use anyhow::Result;
use ratatui::style::Color;
use serde::Deserialize;

use crate::Theme;

/// Color representation in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TomlColor {
    Named(String),
    Rgb { rgb: [u8; 3] },
}

impl TomlColor {
    fn to_color(&self) -> Color {
        match self {
            TomlColor::Named(name) => name.parse().unwrap_or(Color::Reset),
            TomlColor::Rgb { rgb } => Color::Rgb(rgb[0], rgb[1], rgb[2]),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct TomlColors {
    bg: TomlColor,
    fg: TomlColor,
    accented_bg: TomlColor,
    accented_fg: TomlColor,
    selected_bg: TomlColor,
    selected_fg: TomlColor,
    found_bg: TomlColor,
    disabled: TomlColor,
    error: TomlColor,
}

#[derive(Debug, Clone, Deserialize)]
struct TomlTheme {
    colors: TomlColors,
}

impl TomlTheme {
    fn into_theme(self, name: &'static str) -> Theme {
        let c = self.colors;
        Theme {
            name,
            bg: c.bg.to_color(),
            fg: c.fg.to_color(),
            accented_bg: c.accented_bg.to_color(),
            accented_fg: c.accented_fg.to_color(),
            selected_bg: c.selected_bg.to_color(),
            selected_fg: c.selected_fg.to_color(),
            found_bg: c.found_bg.to_color(),
            disabled: c.disabled.to_color(),
            error: c.error.to_color(),
        }
    }
}

/// Parse a theme from TOML, naming it `name`.
pub fn load_theme_from_str(content: &str, name: &'static str) -> Result<Theme> {
    let toml_theme: TomlTheme = toml::from_str(content)?;
    Ok(toml_theme.into_theme(name))
}
