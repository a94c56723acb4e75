//! Theme color definitions.

use ratatui::style::Color;

/// Application theme with semantic color assignments.
///
/// Besides the base/accent/selection colors every panel needs, the
/// palette carries the two tag colors of the text widget: the selection
/// background and the background of "found" search matches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Theme name for display
    pub name: &'static str,

    // === Base ===
    /// Panel backgrounds
    pub bg: Color,
    /// Main text
    pub fg: Color,

    // === Accented ===
    /// Menu bar, toolbar, status bar background
    pub accented_bg: Color,
    /// Active panel border, menu accelerators
    pub accented_fg: Color,

    // === Selection ===
    /// Menu selection and text selection background
    pub selected_bg: Color,
    /// Selected item text
    pub selected_fg: Color,

    // === Text widget ===
    /// Background of "found" tags
    pub found_bg: Color,

    /// Inactive borders, separators, secondary text
    pub disabled: Color,

    /// Error dialog accents
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        *Self::get_by_name(crate::DEFAULT_THEME)
    }
}
