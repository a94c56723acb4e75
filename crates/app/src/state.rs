//! Application state owned by [`App`](crate::App).

use std::time::{Duration, Instant};

use noteit_clipboard::ClipboardProvider;
use noteit_config::constants::STATUS_TIMEOUT_SECS;
use noteit_config::Config;
use noteit_keyboard::Keymap;
use noteit_layout::PanelRegistry;
use noteit_modal::ActiveModal;
use noteit_theme::Theme;

use crate::panel::{Font, Panel};

pub const READY: &str = "Ready";

/// What to do after the user has dealt with unsaved changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    NewFile,
    OpenFile,
    Exit,
}

/// Work waiting on the open modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// "Save ...?" prompt; then carry on.
    SaveChanges(Continuation),
    /// Save picker; `then` runs once the file is written.
    SaveAs { then: Option<Continuation> },
    /// Open picker.
    OpenFile,
    ChooseFontSize,
    Find,
}

/// Menu bar navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    /// Index of the menu whose drop-down is shown.
    pub open: Option<usize>,
    /// Highlighted entry in that drop-down.
    pub highlighted: Option<usize>,
}

pub struct AppState {
    pub should_quit: bool,
    pub panels: PanelRegistry<Panel>,
    pub active_modal: Option<ActiveModal>,
    pub pending_action: Option<PendingAction>,
    pub menu: MenuState,
    pub theme: &'static Theme,
    pub config: Config,
    pub keymap: Keymap,
    pub clipboard: Box<dyn ClipboardProvider>,
    /// Width and height in cells.
    pub terminal_size: (u16, u16),
    status: Option<(String, Instant)>,
}

impl AppState {
    pub fn new(config: Config, clipboard: Box<dyn ClipboardProvider>) -> Self {
        let theme = Theme::get_by_name(&config.general.theme);
        let first = Panel::new(
            config.editor.max_undo,
            Font {
                family: config.editor.font_family.clone(),
                size: config.editor.font_size,
            },
        );
        Self {
            should_quit: false,
            panels: PanelRegistry::new(first),
            active_modal: None,
            pending_action: None,
            menu: MenuState::default(),
            theme,
            config,
            keymap: Keymap::new(),
            clipboard,
            terminal_size: (80, 24),
            status: None,
        }
    }

    /// Empty panel using the current font.
    pub fn new_panel(&self) -> Panel {
        Panel::new(
            self.config.editor.max_undo,
            self.panels.active().font.clone(),
        )
    }

    pub fn active_panel(&self) -> &Panel {
        self.panels.active()
    }

    pub fn active_panel_mut(&mut self) -> &mut Panel {
        self.panels.active_mut()
    }

    pub fn font_size(&self) -> u16 {
        self.panels.active().font.size
    }

    pub fn update_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    // ---- status ----

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.set_status_at(message, Instant::now());
    }

    /// Show `message` until `STATUS_TIMEOUT_SECS` after `now`. A newer
    /// message replaces both the text and the deadline.
    pub fn set_status_at(&mut self, message: impl Into<String>, now: Instant) {
        let deadline = now + Duration::from_secs(STATUS_TIMEOUT_SECS);
        self.status = Some((message.into(), deadline));
    }

    pub fn status_message(&self) -> &str {
        self.status.as_ref().map_or(READY, |(msg, _)| msg.as_str())
    }

    /// Drop an expired message. Returns `true` when something changed.
    pub fn expire_status(&mut self, now: Instant) -> bool {
        match &self.status {
            Some((_, deadline)) if now >= *deadline => {
                self.status = None;
                true
            }
            _ => false,
        }
    }

    // ---- modals ----

    pub fn has_modal(&self) -> bool {
        self.active_modal.is_some()
    }

    pub fn open_modal(&mut self, modal: ActiveModal, action: Option<PendingAction>) {
        self.close_menu();
        self.active_modal = Some(modal);
        self.pending_action = action;
    }

    pub fn close_modal(&mut self) {
        self.active_modal = None;
    }

    pub fn take_pending_action(&mut self) -> Option<PendingAction> {
        self.pending_action.take()
    }

    // ---- menu ----

    pub fn is_menu_open(&self) -> bool {
        self.menu.open.is_some()
    }

    pub fn open_menu(&mut self, index: usize) {
        self.menu = MenuState {
            open: Some(index),
            highlighted: None,
        };
    }

    pub fn close_menu(&mut self) {
        self.menu = MenuState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noteit_clipboard::MemoryClipboard;

    fn state() -> AppState {
        AppState::new(Config::default(), Box::new(MemoryClipboard::new()))
    }

    #[test]
    fn test_status_defaults_to_ready() {
        assert_eq!(state().status_message(), READY);
    }

    #[test]
    fn test_status_reverts_after_timeout() {
        let mut s = state();
        let t0 = Instant::now();
        s.set_status_at("Saved: a.txt", t0);

        assert!(!s.expire_status(t0 + Duration::from_millis(2900)));
        assert_eq!(s.status_message(), "Saved: a.txt");

        assert!(s.expire_status(t0 + Duration::from_secs(3)));
        assert_eq!(s.status_message(), READY);
    }

    #[test]
    fn test_later_message_reschedules_revert() {
        let mut s = state();
        let t0 = Instant::now();
        s.set_status_at("first", t0);
        s.set_status_at("second", t0 + Duration::from_secs(2));

        // the first deadline has passed but the second message is still fresh
        assert!(!s.expire_status(t0 + Duration::from_secs(4)));
        assert_eq!(s.status_message(), "second");
        assert!(s.expire_status(t0 + Duration::from_secs(5)));
        assert_eq!(s.status_message(), READY);
    }

    #[test]
    fn test_first_panel_uses_config_font() {
        let mut config = Config::default();
        config.editor.font_size = 16;
        let s = AppState::new(config, Box::new(MemoryClipboard::new()));
        assert_eq!(s.font_size(), 16);
        assert_eq!(s.new_panel().font.size, 16);
    }
}
