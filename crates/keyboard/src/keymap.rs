use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::Action;

/// A key chord in normalised form.
///
/// Terminals disagree on how Shift is reported: `Ctrl+Shift+S` may arrive as
/// `Char('S')` with or without the SHIFT flag, and `Shift+Tab` as `BackTab`.
/// Uppercase letters become lowercase + SHIFT and `BackTab` becomes
/// `Tab` + SHIFT so either form matches one binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        let relevant = KeyModifiers::CONTROL | KeyModifiers::SHIFT | KeyModifiers::ALT;
        let mut modifiers = modifiers & relevant;
        let code = match code {
            KeyCode::Char(c) if c.is_uppercase() => {
                modifiers |= KeyModifiers::SHIFT;
                KeyCode::Char(c.to_lowercase().next().unwrap_or(c))
            }
            KeyCode::BackTab => {
                modifiers |= KeyModifiers::SHIFT;
                KeyCode::Tab
            }
            other => other,
        };
        Self { code, modifiers }
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    pub fn ctrl_shift(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL | KeyModifiers::SHIFT)
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        *self == KeyBinding::from(*key)
    }
}

impl From<KeyEvent> for KeyBinding {
    fn from(event: KeyEvent) -> Self {
        Self::new(event.code, event.modifiers)
    }
}

impl fmt::Display for KeyBinding {
    /// Accelerator text such as `Ctrl+Shift+S`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "Ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "Alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            write!(f, "Shift+")?;
        }
        match self.code {
            KeyCode::Char(c) => write!(f, "{}", c.to_uppercase()),
            KeyCode::Tab => write!(f, "Tab"),
            KeyCode::F(n) => write!(f, "F{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Shortcut table.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}

impl Keymap {
    /// Standard shortcuts.
    pub fn new() -> Self {
        let tab = |modifiers| KeyBinding::new(KeyCode::Tab, modifiers);

        let bindings = HashMap::from([
            (KeyBinding::ctrl('n'), Action::NewFile),
            (KeyBinding::ctrl('o'), Action::OpenFile),
            (KeyBinding::ctrl('s'), Action::SaveFile),
            (KeyBinding::ctrl_shift('s'), Action::SaveAsFile),
            (KeyBinding::ctrl('q'), Action::Exit),
            (KeyBinding::ctrl('z'), Action::Undo),
            (KeyBinding::ctrl('y'), Action::Redo),
            (KeyBinding::ctrl('x'), Action::Cut),
            (KeyBinding::ctrl('c'), Action::Copy),
            (KeyBinding::ctrl('v'), Action::Paste),
            (KeyBinding::ctrl('a'), Action::SelectAll),
            (KeyBinding::ctrl('f'), Action::Find),
            (KeyBinding::ctrl_shift('h'), Action::SplitHorizontal),
            (KeyBinding::ctrl_shift('v'), Action::SplitVertical),
            (KeyBinding::ctrl_shift('w'), Action::CloseSplit),
            (tab(KeyModifiers::CONTROL), Action::NextPanel),
            (
                tab(KeyModifiers::CONTROL | KeyModifiers::SHIFT),
                Action::PreviousPanel,
            ),
        ]);

        Self { bindings }
    }

    /// Action bound to a key event, if any.
    pub fn resolve(&self, key: &KeyEvent) -> Option<Action> {
        self.bindings.get(&KeyBinding::from(*key)).copied()
    }

    fn binding_for(&self, action: Action) -> Option<KeyBinding> {
        self.bindings
            .iter()
            .find(|(_, bound)| **bound == action)
            .map(|(key, _)| *key)
    }

    /// Accelerator text for menus, e.g. `Ctrl+S`.
    pub fn accelerator(&self, action: Action) -> Option<String> {
        self.binding_for(action).map(|key| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn ctrl(c: char) -> KeyEvent {
        key(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_plain_ctrl_shortcuts() {
        let keymap = Keymap::new();
        let expected = [
            ('n', Action::NewFile),
            ('o', Action::OpenFile),
            ('s', Action::SaveFile),
            ('q', Action::Exit),
            ('z', Action::Undo),
            ('y', Action::Redo),
            ('x', Action::Cut),
            ('c', Action::Copy),
            ('v', Action::Paste),
            ('a', Action::SelectAll),
            ('f', Action::Find),
        ];
        for (c, action) in expected {
            assert_eq!(keymap.resolve(&ctrl(c)), Some(action), "Ctrl+{c}");
        }
    }

    #[test]
    fn test_shifted_shortcuts_in_every_form() {
        let keymap = Keymap::new();
        let ctrl_shift = KeyModifiers::CONTROL | KeyModifiers::SHIFT;
        for (c, action) in [
            ('s', Action::SaveAsFile),
            ('h', Action::SplitHorizontal),
            ('v', Action::SplitVertical),
            ('w', Action::CloseSplit),
        ] {
            let upper = c.to_ascii_uppercase();
            assert_eq!(keymap.resolve(&key(KeyCode::Char(c), ctrl_shift)), Some(action));
            assert_eq!(keymap.resolve(&key(KeyCode::Char(upper), ctrl_shift)), Some(action));
            assert_eq!(
                keymap.resolve(&key(KeyCode::Char(upper), KeyModifiers::CONTROL)),
                Some(action)
            );
        }
    }

    #[test]
    fn test_panel_cycling_keys() {
        let keymap = Keymap::new();
        assert_eq!(
            keymap.resolve(&key(KeyCode::Tab, KeyModifiers::CONTROL)),
            Some(Action::NextPanel)
        );
        assert_eq!(
            keymap.resolve(&key(KeyCode::BackTab, KeyModifiers::CONTROL | KeyModifiers::SHIFT)),
            Some(Action::PreviousPanel)
        );
        assert_eq!(
            keymap.resolve(&key(KeyCode::Tab, KeyModifiers::CONTROL | KeyModifiers::SHIFT)),
            Some(Action::PreviousPanel)
        );
    }

    #[test]
    fn test_unbound_keys() {
        let keymap = Keymap::new();
        assert_eq!(keymap.resolve(&key(KeyCode::Char('s'), KeyModifiers::NONE)), None);
        assert_eq!(keymap.resolve(&key(KeyCode::Tab, KeyModifiers::NONE)), None);
        assert_eq!(keymap.resolve(&key(KeyCode::Char('s'), KeyModifiers::ALT)), None);
    }

    #[test]
    fn test_accelerator_text() {
        let keymap = Keymap::new();
        assert_eq!(keymap.accelerator(Action::SaveFile).as_deref(), Some("Ctrl+S"));
        assert_eq!(
            keymap.accelerator(Action::SaveAsFile).as_deref(),
            Some("Ctrl+Shift+S")
        );
        assert_eq!(
            keymap.accelerator(Action::PreviousPanel).as_deref(),
            Some("Ctrl+Shift+Tab")
        );
        assert_eq!(keymap.accelerator(Action::ChooseFontSize), None);
    }
}
