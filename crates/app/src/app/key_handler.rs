//! Keyboard input: modal first, then menu, shortcuts and finally text editing.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use noteit_keyboard::{menus, MenuEntry};

use super::App;

impl App {
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if self.state.has_modal() {
            self.handle_modal_key(key)?;
            return Ok(());
        }

        if let Some(action) = self.state.keymap.resolve(&key) {
            self.execute(action);
            return Ok(());
        }

        if self.state.is_menu_open() {
            self.handle_menu_key(key);
            return Ok(());
        }

        if key.code == KeyCode::F(10) {
            self.state.open_menu(0);
            return Ok(());
        }

        self.handle_editor_key(key);
        self.after_input();
        Ok(())
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        let menus = menus();
        let Some(open) = self.state.menu.open else {
            return;
        };
        let Some(menu) = menus.get(open) else {
            self.state.close_menu();
            return;
        };

        match key.code {
            KeyCode::Esc | KeyCode::F(10) => self.state.close_menu(),
            KeyCode::Left => self.state.open_menu((open + menus.len() - 1) % menus.len()),
            KeyCode::Right => self.state.open_menu((open + 1) % menus.len()),
            KeyCode::Down | KeyCode::Up => {
                let items: Vec<usize> = menu
                    .entries
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| matches!(e, MenuEntry::Item(_)))
                    .map(|(i, _)| i)
                    .collect();
                let position = self
                    .state
                    .menu
                    .highlighted
                    .and_then(|h| items.iter().position(|&i| i == h));
                let next = match (key.code, position) {
                    (KeyCode::Down, None) => 0,
                    (KeyCode::Down, Some(p)) => (p + 1) % items.len(),
                    (_, None) => items.len() - 1,
                    (_, Some(p)) => (p + items.len() - 1) % items.len(),
                };
                self.state.menu.highlighted = items.get(next).copied();
            }
            KeyCode::Enter => {
                let chosen = self
                    .state
                    .menu
                    .highlighted
                    .and_then(|h| menu.entries.get(h))
                    .and_then(|entry| match entry {
                        MenuEntry::Item(action) => Some(*action),
                        MenuEntry::Separator => None,
                    });
                match chosen {
                    Some(action) => self.execute(action),
                    None => self.state.close_menu(),
                }
            }
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let select = key.modifiers.contains(KeyModifiers::SHIFT);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let buffer = &mut self.state.active_panel_mut().buffer;
        let page = buffer.viewport().size().1.max(1) as usize;

        match key.code {
            KeyCode::Char(c) if !ctrl && !alt => {
                buffer.insert_char(c);
            }
            KeyCode::Enter => {
                buffer.insert_newline();
            }
            KeyCode::Tab if !ctrl => {
                buffer.insert_char('\t');
            }
            KeyCode::Backspace => {
                buffer.backspace();
            }
            KeyCode::Delete => {
                buffer.delete_forward();
            }
            KeyCode::Left if ctrl => buffer.move_word_left(select),
            KeyCode::Right if ctrl => buffer.move_word_right(select),
            KeyCode::Left => buffer.move_left(select),
            KeyCode::Right => buffer.move_right(select),
            KeyCode::Up => buffer.move_up(select),
            KeyCode::Down => buffer.move_down(select),
            KeyCode::Home if ctrl => buffer.move_doc_start(select),
            KeyCode::End if ctrl => buffer.move_doc_end(select),
            KeyCode::Home => buffer.move_line_start(select),
            KeyCode::End => buffer.move_line_end(select),
            KeyCode::PageUp => buffer.page_up(page, select),
            KeyCode::PageDown => buffer.page_down(page, select),
            KeyCode::Esc => buffer.clear_selection(),
            _ => {}
        }
    }
}
