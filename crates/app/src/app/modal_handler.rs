//! Routing input to the open modal and acting on what it returns.

use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};

use noteit_config::constants::FONT_SIZES;
use noteit_keyboard::Action;
use noteit_modal::{ActiveModal, Modal, ModalResult};

use super::actions::SaveOutcome;
use super::App;
use crate::state::PendingAction;

/// A modal's answer with its payload type erased.
enum Answer {
    Confirm(bool),
    Dismissed,
    Query(String),
    Path(PathBuf),
    Index(usize),
    Cancelled,
}

fn answer<T>(result: ModalResult<T>, wrap: impl FnOnce(T) -> Answer) -> Answer {
    match result {
        ModalResult::Confirmed(value) => wrap(value),
        ModalResult::Cancelled => Answer::Cancelled,
    }
}

impl App {
    pub(super) fn handle_modal_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(modal) = self.state.active_modal.as_mut() else {
            return Ok(());
        };
        let result = match modal {
            ActiveModal::Confirm(m) => m.handle_key(key)?.map(|r| answer(r, Answer::Confirm)),
            ActiveModal::Info(m) => m.handle_key(key)?.map(|r| answer(r, |_| Answer::Dismissed)),
            ActiveModal::Find(m) => m.handle_key(key)?.map(|r| answer(r, Answer::Query)),
            ActiveModal::FileDialog(m) => m.handle_key(key)?.map(|r| answer(r, Answer::Path)),
            ActiveModal::Select(m) => m.handle_key(key)?.map(|r| answer(r, Answer::Index)),
        };
        if let Some(result) = result {
            self.resolve_modal(result);
        }
        Ok(())
    }

    pub(super) fn handle_modal_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        let Some(modal) = self.state.active_modal.as_mut() else {
            return Ok(());
        };
        let result = match modal {
            ActiveModal::Confirm(m) => m.handle_mouse(mouse)?.map(|r| answer(r, Answer::Confirm)),
            ActiveModal::Info(m) => m
                .handle_mouse(mouse)?
                .map(|r| answer(r, |_| Answer::Dismissed)),
            ActiveModal::Find(m) => m.handle_mouse(mouse)?.map(|r| answer(r, Answer::Query)),
            ActiveModal::FileDialog(m) => m.handle_mouse(mouse)?.map(|r| answer(r, Answer::Path)),
            ActiveModal::Select(m) => m.handle_mouse(mouse)?.map(|r| answer(r, Answer::Index)),
        };
        if let Some(result) = result {
            self.resolve_modal(result);
        }
        Ok(())
    }

    fn resolve_modal(&mut self, answer: Answer) {
        // The find dialog stays up between searches
        if let Answer::Query(query) = &answer {
            let count = self.find_text(query);
            if let Some(ActiveModal::Find(modal)) = self.state.active_modal.as_mut() {
                if !query.is_empty() {
                    modal.set_feedback(format!("Found {count} match(es)"));
                }
            }
            return;
        }

        self.state.close_modal();
        let pending = self.state.take_pending_action();

        match (pending, answer) {
            (Some(PendingAction::SaveChanges(then)), Answer::Confirm(true)) => {
                if self.save_active(Some(then)) == SaveOutcome::Saved {
                    self.continue_with(then);
                }
            }
            (Some(PendingAction::SaveChanges(then)), Answer::Confirm(false)) => {
                self.continue_with(then);
            }
            (Some(PendingAction::SaveAs { then }), Answer::Path(path)) => {
                if self.write_active(path, true) {
                    if let Some(then) = then {
                        self.continue_with(then);
                    }
                }
            }
            (Some(PendingAction::OpenFile), Answer::Path(path)) => {
                self.load_into_active(path);
            }
            (Some(PendingAction::ChooseFontSize), Answer::Index(idx)) => {
                if let Some(&size) = FONT_SIZES.get(idx) {
                    self.execute(Action::ChangeFontSize(size));
                }
            }
            // Cancelled prompts and dismissed messages
            _ => {}
        }

        self.after_input();
    }
}
