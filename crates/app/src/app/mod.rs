//! The application controller.
//!
//! Every user command, whether typed as a shortcut, picked from a menu or
//! clicked on the toolbar, becomes a [`noteit_keyboard::Action`] handed to
//! [`App::execute`].

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{execute, terminal::SetTitle};
use ratatui::{backend::Backend, layout::Rect, Frame, Terminal};

use noteit_clipboard::ClipboardProvider;
use noteit_config::constants::{APP_NAME, EVENT_HANDLER_INTERVAL_MS};
use noteit_config::Config;
use noteit_keyboard::{menus, toolbar};
use noteit_layout::arrange;
use noteit_logger as logger;
use noteit_ui_render::{
    dropdown_area, menu_title_areas, render_dropdown, render_menu_bar, render_panel,
    render_status_bar, render_toolbar, screen_layout, MenuBarParams, PanelView, StatusBarParams,
};

use crate::event::{Event, EventHandler};
use crate::file_io;
use crate::state::AppState;

mod actions;
mod key_handler;
mod modal_handler;
mod mouse_handler;

pub struct App {
    state: AppState,
    event_handler: EventHandler,
}

impl App {
    pub fn new(config: Config, clipboard: Box<dyn ClipboardProvider>) -> Self {
        Self {
            state: AppState::new(config, clipboard),
            event_handler: EventHandler::new(Duration::from_millis(EVENT_HANDLER_INTERVAL_MS)),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// `NAME[*] - Simply Note It[ (Panel i/N)]`
    pub fn window_title(&self) -> String {
        let panel = self.state.active_panel();
        let mut title = format!("{} - {}", panel.title(), APP_NAME);
        let count = self.state.panels.len();
        if count > 1 {
            title.push_str(&format!(
                " (Panel {}/{})",
                self.state.panels.active_index() + 1,
                count
            ));
        }
        title
    }

    /// Periodic housekeeping.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.state.expire_status(now)
    }

    /// Main loop. Returns once the user has exited.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let size = terminal.size()?;
        self.state.update_terminal_size(size.width, size.height);

        let mut shown_title = String::new();
        let mut needs_redraw = true;

        while !self.state.should_quit {
            let title = self.window_title();
            if title != shown_title {
                execute!(io::stdout(), SetTitle(&title))?;
                shown_title = title;
            }

            if needs_redraw {
                terminal.draw(|frame| self.render(frame))?;
                needs_redraw = false;
            }

            match self.event_handler.next()? {
                Event::Key(key) => {
                    self.handle_key_event(key)?;
                    needs_redraw = true;
                }
                Event::Mouse(mouse) => {
                    self.handle_mouse_event(mouse)?;
                    needs_redraw = true;
                }
                Event::Resize(width, height) => {
                    self.state.update_terminal_size(width, height);
                    needs_redraw = true;
                }
                Event::Tick => {
                    if self.tick(Instant::now()) {
                        needs_redraw = true;
                    }
                }
            }
        }

        logger::info("Application exiting");
        Ok(())
    }

    /// Sync dirty flags after anything that may have edited text.
    fn after_input(&mut self) {
        for panel in self.state.panels.iter_mut() {
            panel.sync_dirty();
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let title = self.window_title();
        let screen = screen_layout(area);
        let state = &mut self.state;
        let theme = state.theme;
        let menus = menus();
        let font_size = state.font_size();
        let tab_size = state.config.editor.tab_size;
        let active = state.panels.active_index();
        let regions = arrange(state.panels.len(), screen.content);
        let status = state.status_message().to_string();
        let (line, col) = state.active_panel().buffer.cursor_line_col();
        let panel_count = state.panels.len();

        let buf = frame.buffer_mut();
        render_menu_bar(
            buf,
            screen.menu_bar,
            &menus,
            &MenuBarParams {
                theme,
                title: &title,
                open_menu: state.menu.open,
            },
        );
        render_toolbar(buf, screen.toolbar, &toolbar(), font_size, theme);

        let mut cursor = None;
        for (idx, (panel, region)) in state.panels.iter_mut().zip(regions).enumerate() {
            let panel_title = panel.title();
            let font_label = panel.font.label();
            let view = PanelView {
                title: &panel_title,
                font_label: &font_label,
                focused: idx == active,
                tab_size,
            };
            let pos = render_panel(buf, region, &mut panel.buffer, &view, theme);
            if idx == active {
                cursor = pos;
            }
        }

        render_status_bar(
            buf,
            screen.status_bar,
            &StatusBarParams {
                theme,
                message: &status,
                cursor: (line, col),
                panel: (active + 1, panel_count),
            },
        );

        if let Some(open) = state.menu.open {
            if let Some(menu) = menus.get(open) {
                let anchor = menu_title_areas(&menus, screen.menu_bar)
                    .get(open)
                    .copied()
                    .unwrap_or(screen.menu_bar);
                let drop = dropdown_area(menu, &state.keymap, anchor, area);
                render_dropdown(buf, menu, drop, state.menu.highlighted, &state.keymap, theme);
            }
        }

        if let Some(modal) = state.active_modal.as_mut() {
            modal.render(area, buf, theme);
        }

        if !state.has_modal() && !state.is_menu_open() {
            if let Some(pos) = cursor {
                frame.set_cursor_position(pos);
            }
        }
    }

    /// Full screen rectangle at the last known terminal size.
    fn screen_area(&self) -> Rect {
        let (width, height) = self.state.terminal_size;
        Rect::new(0, 0, width, height)
    }

    fn active_name(&self) -> String {
        file_io::display_name(self.state.active_panel().file_path())
    }
}

#[cfg(test)]
mod tests;
