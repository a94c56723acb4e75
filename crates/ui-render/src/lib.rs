//! Drawing the editor screen.
//!
//! ```text
//! ┌ menu bar ──────────────────────────────┐
//! │ toolbar                                │
//! │ panels (1..=4)                         │
//! └ status bar ────────────────────────────┘
//! ```
//!
//! Functions that draw clickable things also expose the hit areas so mouse
//! handling agrees with what is on screen.

mod menu;
mod panel;
mod status_bar;
mod toolbar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub use menu::{
    dropdown_area, dropdown_entry_at, menu_title_areas, render_dropdown, render_menu_bar,
    MenuBarParams,
};
pub use panel::{render_panel, PanelView};
pub use status_bar::{render_status_bar, StatusBarParams};
pub use toolbar::{render_toolbar, toolbar_item_at, toolbar_layout};

/// Screen split into its fixed bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub menu_bar: Rect,
    pub toolbar: Rect,
    pub content: Rect,
    pub status_bar: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    ScreenLayout {
        menu_bar: chunks[0],
        toolbar: chunks[1],
        content: chunks[2],
        status_bar: chunks[3],
    }
}

#[cfg(test)]
pub(crate) fn buffer_text(buf: &ratatui::buffer::Buffer) -> Vec<String> {
    let area = buf.area;
    (area.y..area.bottom())
        .map(|y| {
            (area.x..area.right())
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect()
        })
        .collect()
}
