/// Single reversible edit, addressed by character offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Insert { position: usize, text: String },
    Delete { position: usize, text: String },
    /// Edits that undo together, e.g. replacing a selection by typing.
    Group { actions: Vec<Action> },
}

impl Action {
    pub fn inverse(&self) -> Action {
        match self {
            Action::Insert { position, text } => Action::Delete {
                position: *position,
                text: text.clone(),
            },
            Action::Delete { position, text } => Action::Insert {
                position: *position,
                text: text.clone(),
            },
            Action::Group { actions } => Action::Group {
                actions: actions.iter().rev().map(|a| a.inverse()).collect(),
            },
        }
    }

    /// Typing and repeated backspace/delete collapse into one undo step.
    /// A line break always starts a new step.
    pub fn can_merge_with(&self, other: &Action) -> bool {
        match (self, other) {
            (
                Action::Insert {
                    position: pos1,
                    text: text1,
                },
                Action::Insert {
                    position: pos2,
                    text: text2,
                },
            ) => {
                is_single_char(text2)
                    && !has_line_break(text1)
                    && !has_line_break(text2)
                    && *pos2 == pos1 + text1.chars().count()
            }
            (
                Action::Delete {
                    position: pos1,
                    text: text1,
                },
                Action::Delete {
                    position: pos2,
                    text: text2,
                },
            ) => {
                let backspace = pos2 + 1 == *pos1;
                let forward = pos2 == pos1;
                is_single_char(text2)
                    && !has_line_break(text1)
                    && !has_line_break(text2)
                    && (backspace || forward)
            }
            _ => false,
        }
    }

    pub fn merge(&mut self, other: Action) {
        match (self, other) {
            (Action::Insert { text: text1, .. }, Action::Insert { text: text2, .. }) => {
                text1.push_str(&text2);
            }
            (
                Action::Delete {
                    position,
                    text: text1,
                },
                Action::Delete {
                    position: pos2,
                    text: text2,
                },
            ) => {
                if pos2 < *position {
                    // backspace
                    *position = pos2;
                    text1.insert_str(0, &text2);
                } else {
                    text1.push_str(&text2);
                }
            }
            _ => {}
        }
    }
}

fn is_single_char(text: &str) -> bool {
    text.chars().count() == 1
}

fn has_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}

/// Bounded undo/redo stacks.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<Action>,
    redo_stack: Vec<Action>,
    max_size: usize,
    /// Step still accepting merges.
    pending_action: Option<Action>,
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(crate::DEFAULT_UNDO_LIMIT)
    }

    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size: max_size.max(1),
            pending_action: None,
        }
    }

    pub fn push(&mut self, action: Action) {
        self.redo_stack.clear();

        if let Some(pending) = &mut self.pending_action {
            if pending.can_merge_with(&action) {
                pending.merge(action);
                return;
            }
        }

        self.commit_pending();
        self.pending_action = Some(action);
    }

    /// Close the current step so the next edit starts a new one.
    pub fn commit_pending(&mut self) {
        if let Some(action) = self.pending_action.take() {
            self.undo_stack.push(action);
            if self.undo_stack.len() > self.max_size {
                let overflow = self.undo_stack.len() - self.max_size;
                self.undo_stack.drain(..overflow);
            }
        }
    }

    /// Returns the edit to apply to revert the last step.
    pub fn undo(&mut self) -> Option<Action> {
        self.commit_pending();

        let action = self.undo_stack.pop()?;
        let inverse = action.inverse();
        self.redo_stack.push(action);
        Some(inverse)
    }

    /// Returns the edit to re-apply.
    pub fn redo(&mut self) -> Option<Action> {
        self.commit_pending();

        let action = self.redo_stack.pop()?;
        self.undo_stack.push(action.clone());
        Some(action)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty() || self.pending_action.is_some()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.pending_action = None;
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
