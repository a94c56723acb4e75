//! Mouse input: menu bar, toolbar and panels.

use anyhow::Result;
use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Margin, Rect};

use noteit_keyboard::{menus, toolbar, MenuEntry};
use noteit_layout::{arrange, region_at};
use noteit_ui_render::{
    dropdown_area, dropdown_entry_at, menu_title_areas, screen_layout, toolbar_item_at,
    toolbar_layout,
};

use super::App;

const SCROLL_LINES: isize = 3;

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

impl App {
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<()> {
        if self.state.has_modal() {
            self.handle_modal_mouse(mouse)?;
            return Ok(());
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_left_click(mouse),
            MouseEventKind::Drag(MouseButton::Left) => self.handle_drag(mouse),
            MouseEventKind::ScrollUp => self.handle_scroll(mouse, -SCROLL_LINES),
            MouseEventKind::ScrollDown => self.handle_scroll(mouse, SCROLL_LINES),
            _ => {}
        }
        self.after_input();
        Ok(())
    }

    fn handle_left_click(&mut self, mouse: MouseEvent) {
        let (column, row) = (mouse.column, mouse.row);
        let screen_area = self.screen_area();
        let screen = screen_layout(screen_area);
        let menus = menus();

        if contains(screen.menu_bar, column, row) {
            let titles = menu_title_areas(&menus, screen.menu_bar);
            match titles.iter().position(|t| contains(*t, column, row)) {
                Some(idx) if self.state.menu.open == Some(idx) => self.state.close_menu(),
                Some(idx) => self.state.open_menu(idx),
                None => self.state.close_menu(),
            }
            return;
        }

        if let Some(open) = self.state.menu.open {
            let chosen = menus.get(open).and_then(|menu| {
                let anchor = menu_title_areas(&menus, screen.menu_bar).get(open).copied()?;
                let area = dropdown_area(menu, &self.state.keymap, anchor, screen_area);
                match dropdown_entry_at(menu, area, column, row).and_then(|i| menu.entries.get(i)) {
                    Some(MenuEntry::Item(action)) => Some(*action),
                    _ => None,
                }
            });
            match chosen {
                Some(action) => self.execute(action),
                None => self.state.close_menu(),
            }
            return;
        }

        if contains(screen.toolbar, column, row) {
            let layout = toolbar_layout(&toolbar(), screen.toolbar, self.state.font_size());
            if let Some(action) = toolbar_item_at(&layout, column, row) {
                self.execute(action);
            }
            return;
        }

        let regions = arrange(self.state.panels.len(), screen.content);
        if let Some(idx) = region_at(&regions, column, row) {
            self.state.panels.set_active(idx);
            let select = mouse.modifiers.contains(KeyModifiers::SHIFT);
            self.click_in_panel(regions[idx], column, row, select);
        }
    }

    fn handle_drag(&mut self, mouse: MouseEvent) {
        if self.state.is_menu_open() {
            return;
        }
        let screen = screen_layout(self.screen_area());
        let regions = arrange(self.state.panels.len(), screen.content);
        if let Some(&region) = regions.get(self.state.panels.active_index()) {
            self.click_in_panel(region, mouse.column, mouse.row, true);
        }
    }

    fn handle_scroll(&mut self, mouse: MouseEvent, delta: isize) {
        let screen = screen_layout(self.screen_area());
        let regions = arrange(self.state.panels.len(), screen.content);
        if let Some(idx) = region_at(&regions, mouse.column, mouse.row) {
            if let Some(panel) = self.state.panels.get_mut(idx) {
                panel.buffer.scroll_lines(delta);
            }
        }
    }

    /// Place the cursor of the active panel at a screen cell, clamped to
    /// the text area inside the frame.
    fn click_in_panel(&mut self, region: Rect, column: u16, row: u16, select: bool) {
        let inner = region.inner(Margin::new(1, 1));
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let col = column.clamp(inner.x, inner.right() - 1) - inner.x;
        let row = row.clamp(inner.y, inner.bottom() - 1) - inner.y;
        self.state
            .active_panel_mut()
            .buffer
            .click_at(row, col, select);
    }
}
