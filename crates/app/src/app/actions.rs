//! `Action` dispatch and the file, edit and view commands behind it.

use std::path::PathBuf;

use noteit_buffer::{TextWidget, FOUND_TAG};
use noteit_config::constants::FONT_SIZES;
use noteit_keyboard::Action;
use noteit_layout::LayoutError;
use noteit_logger as logger;
use noteit_modal::{ActiveModal, ConfirmModal, FileDialogModal, FindModal, InfoModal, SelectModal};

use super::App;
use crate::file_io;
use crate::state::{Continuation, PendingAction};
use crate::AppError;

/// Result of trying to save the active document in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SaveOutcome {
    Saved,
    Failed,
    /// Untitled; the save picker has been opened.
    Picking,
}

impl App {
    /// Single entry point for commands.
    pub fn execute(&mut self, action: Action) {
        logger::debug(format!("Action: {action:?}"));
        self.state.close_menu();

        match action {
            Action::NewFile => self.guard_unsaved(Continuation::NewFile),
            Action::OpenFile => self.guard_unsaved(Continuation::OpenFile),
            Action::SaveFile => {
                self.save_active(None);
            }
            Action::SaveAsFile => self.open_save_picker(None),
            Action::Exit => self.guard_unsaved(Continuation::Exit),

            Action::Undo => {
                self.state.active_panel_mut().buffer.undo();
            }
            Action::Redo => {
                self.state.active_panel_mut().buffer.redo();
            }
            Action::Cut => {
                let state = &mut self.state;
                state.panels.active_mut().buffer.cut(state.clipboard.as_mut());
            }
            Action::Copy => {
                let state = &mut self.state;
                state.panels.active().buffer.copy(state.clipboard.as_mut());
            }
            Action::Paste => {
                let state = &mut self.state;
                state.panels.active_mut().buffer.paste(state.clipboard.as_mut());
            }
            Action::SelectAll => self.state.active_panel_mut().buffer.select_all(),
            Action::Find => self.open_find(),

            Action::SplitHorizontal => self.split("Split horizontally"),
            Action::SplitVertical => self.split("Split vertically"),
            Action::CloseSplit => self.close_split(),
            Action::NextPanel => {
                if self.state.panels.next() {
                    self.announce_panel();
                }
            }
            Action::PreviousPanel => {
                if self.state.panels.previous() {
                    self.announce_panel();
                }
            }

            Action::ChooseFontSize => self.open_font_size_select(),
            Action::ChangeFontSize(size) => self.change_font_size(size),
        }

        self.after_input();
    }

    // ---- unsaved changes ----

    /// Ask about unsaved changes in the active panel before `then`.
    fn guard_unsaved(&mut self, then: Continuation) {
        if !self.state.active_panel().document.dirty {
            self.continue_with(then);
            return;
        }
        let message = match then {
            Continuation::Exit => "Save before exiting?",
            Continuation::NewFile | Continuation::OpenFile => "Save current file?",
        };
        self.state.open_modal(
            ActiveModal::Confirm(Box::new(ConfirmModal::new("Unsaved Changes", message))),
            Some(PendingAction::SaveChanges(then)),
        );
    }

    pub(super) fn continue_with(&mut self, then: Continuation) {
        match then {
            Continuation::NewFile => self.new_file(),
            Continuation::OpenFile => self.open_open_picker(),
            Continuation::Exit => {
                logger::info("Exit requested");
                self.state.quit();
            }
        }
    }

    // ---- file commands ----

    fn new_file(&mut self) {
        self.state.active_panel_mut().load(None, "");
        self.state.set_status("New file created");
    }

    fn open_open_picker(&mut self) {
        let dir = self.dialog_dir();
        self.state.open_modal(
            ActiveModal::FileDialog(Box::new(FileDialogModal::open(dir))),
            Some(PendingAction::OpenFile),
        );
    }

    pub(super) fn open_save_picker(&mut self, then: Option<Continuation>) {
        let dir = self.dialog_dir();
        let name = self
            .state
            .active_panel()
            .file_path()
            .map(|_| self.active_name());
        self.state.open_modal(
            ActiveModal::FileDialog(Box::new(FileDialogModal::save(dir, name))),
            Some(PendingAction::SaveAs { then }),
        );
    }

    /// Directory of the active document, else the working directory.
    fn dialog_dir(&self) -> PathBuf {
        self.state
            .active_panel()
            .file_path()
            .and_then(|p| p.parent())
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Replace the active buffer with the file at `path`.
    pub(super) fn load_into_active(&mut self, path: PathBuf) -> bool {
        match file_io::open(&path) {
            Ok(text) => {
                self.state.active_panel_mut().load(Some(path), &text);
                let name = self.active_name();
                logger::info(format!("Opened {name}"));
                self.state.set_status(format!("Opened: {name}"));
                true
            }
            Err(e) => {
                self.show_error(format!("Could not open file: {e}"));
                false
            }
        }
    }

    /// Save to the bound path, or open the save picker carrying `then`
    /// when the document is untitled.
    pub(super) fn save_active(&mut self, then: Option<Continuation>) -> SaveOutcome {
        let Some(path) = self.state.active_panel().file_path().map(PathBuf::from) else {
            self.open_save_picker(then);
            return SaveOutcome::Picking;
        };
        if self.write_active(path, false) {
            SaveOutcome::Saved
        } else {
            SaveOutcome::Failed
        }
    }

    /// Write the active buffer to `path` and bind the document to it.
    pub(super) fn write_active(&mut self, path: PathBuf, save_as: bool) -> bool {
        let text = self.state.active_panel().buffer.text();
        if let Err(e) = file_io::save(&path, &text) {
            self.show_error(format!("Could not save file: {e}"));
            return false;
        }

        let panel = self.state.active_panel_mut();
        panel.document.file_path = Some(path);
        panel.mark_clean();
        let name = self.active_name();
        logger::info(format!("Saved {name}"));
        if save_as {
            self.state.set_status(format!("Saved as: {name}"));
        } else {
            self.state.set_status(format!("Saved: {name}"));
        }
        true
    }

    // ---- search ----

    fn open_find(&mut self) {
        self.state.open_modal(
            ActiveModal::Find(Box::new(FindModal::new())),
            Some(PendingAction::Find),
        );
    }

    /// Highlight every occurrence of `query` in the active panel and jump
    /// to the first. Matches do not overlap. Returns the match count.
    pub fn find_text(&mut self, query: &str) -> usize {
        if query.is_empty() {
            return 0;
        }
        let query_len = query.chars().count();
        let buffer = &mut self.state.active_panel_mut().buffer;
        buffer.tag_remove(FOUND_TAG);

        let mut count = 0;
        let mut from = 0;
        while let Some(start) = buffer.find_literal(query, from) {
            let end = start + query_len;
            buffer.tag_add(FOUND_TAG, start..end);
            count += 1;
            from = end;
        }

        if let Some(first) = buffer.find_literal(query, 0) {
            buffer.set_cursor(first);
            buffer.see(first);
        }

        self.state.set_status(format!("Found {count} match(es)"));
        count
    }

    // ---- panels ----

    fn split(&mut self, status: &str) {
        let panel = self.state.new_panel();
        match self.state.panels.add_panel(panel) {
            Ok(index) => {
                logger::debug(format!("Added panel {}", index + 1));
                self.state.set_status(status);
            }
            Err(e) => self.show_layout_error(e),
        }
    }

    /// Close the focused panel. The first panel is never removed; asking to
    /// close it with other panels open only re-applies the layout.
    fn close_split(&mut self) {
        let active = self.state.panels.active_index();
        match self.state.panels.remove_panel(active) {
            Ok(_) | Err(LayoutError::InvalidIndex(0)) => self.state.set_status("Split closed"),
            Err(e) => self.show_layout_error(e),
        }
    }

    fn announce_panel(&mut self) {
        let index = self.state.panels.active_index() + 1;
        self.state.set_status(format!("Switched to panel {index}"));
    }

    // ---- font ----

    fn open_font_size_select(&mut self) {
        let current = self.state.font_size();
        let items = FONT_SIZES.iter().map(u16::to_string).collect();
        let selected = FONT_SIZES.iter().position(|&s| s == current).unwrap_or(0);
        self.state.open_modal(
            ActiveModal::Select(Box::new(SelectModal::new("Font Size", items, selected))),
            Some(PendingAction::ChooseFontSize),
        );
    }

    /// Same size for every panel; families are kept.
    fn change_font_size(&mut self, size: u16) {
        for panel in self.state.panels.iter_mut() {
            panel.font.size = size;
        }
        logger::debug(format!("Font size {size}"));
    }

    /// Font size typed as text; anything that is not a number is ignored.
    pub fn set_font_size_str(&mut self, value: &str) {
        if let Ok(size) = value.trim().parse::<u16>() {
            self.execute(Action::ChangeFontSize(size));
        }
    }

    // ---- dialogs ----

    pub(super) fn show_error(&mut self, message: String) {
        logger::error(&message);
        self.state.open_modal(
            ActiveModal::Info(Box::new(InfoModal::error("Error", message))),
            None,
        );
    }

    fn show_layout_error(&mut self, error: LayoutError) {
        let error = AppError::from(error);
        logger::warn(error.to_string());
        self.state.open_modal(
            ActiveModal::Info(Box::new(InfoModal::new("Info", error.to_string()))),
            None,
        );
    }
}
