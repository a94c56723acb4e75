//! Modal dialogs drawn over the editor.
//!
//! A modal takes every key and mouse event while it is open. Handlers
//! return `Some(ModalResult)` when the dialog wants to close (or, for the
//! find dialog, when it has something to report).

use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{buffer::Buffer, layout::Rect};

use noteit_theme::Theme;

mod confirm;
mod file_dialog;
mod find;
mod info;
mod select;
mod text_input;
mod widgets;

pub use confirm::ConfirmModal;
pub use file_dialog::{FileDialogMode, FileDialogModal, FileFilter, FILE_FILTERS};
pub use find::FindModal;
pub use info::{InfoKind, InfoModal};
pub use select::SelectModal;
pub use text_input::TextInput;
pub use widgets::{
    calculate_modal_width, cell_count, centered_rect, max_line_width, render_input_field,
    render_modal_frame, ModalWidthConfig,
};

/// Outcome of a modal interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalResult<T> {
    Confirmed(T),
    Cancelled,
}

pub trait Modal {
    type Result;

    /// Draw centred inside `area` (the whole screen).
    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme);

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<ModalResult<Self::Result>>>;

    fn handle_mouse(&mut self, _mouse: MouseEvent) -> Result<Option<ModalResult<Self::Result>>> {
        Ok(None)
    }
}

/// The modal currently shown, if any.
#[derive(Debug)]
pub enum ActiveModal {
    Confirm(Box<ConfirmModal>),
    Info(Box<InfoModal>),
    Find(Box<FindModal>),
    FileDialog(Box<FileDialogModal>),
    Select(Box<SelectModal>),
}

impl ActiveModal {
    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        match self {
            ActiveModal::Confirm(modal) => modal.render(area, buf, theme),
            ActiveModal::Info(modal) => modal.render(area, buf, theme),
            ActiveModal::Find(modal) => modal.render(area, buf, theme),
            ActiveModal::FileDialog(modal) => modal.render(area, buf, theme),
            ActiveModal::Select(modal) => modal.render(area, buf, theme),
        }
    }
}
