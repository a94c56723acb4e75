//! Pick one entry from a short list.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};

use noteit_theme::Theme;

use crate::widgets::contains;
use crate::{
    calculate_modal_width, cell_count, centered_rect, render_modal_frame, Modal, ModalResult,
    ModalWidthConfig,
};

const MAX_VISIBLE: usize = 12;

#[derive(Debug)]
pub struct SelectModal {
    title: String,
    items: Vec<String>,
    cursor: usize,
    scroll: usize,
    last_list_area: Option<Rect>,
}

impl SelectModal {
    pub fn new(title: impl Into<String>, items: Vec<String>, selected: usize) -> Self {
        let cursor = selected.min(items.len().saturating_sub(1));
        Self {
            title: title.into(),
            items,
            cursor,
            scroll: cursor.saturating_sub(MAX_VISIBLE - 1),
            last_list_area: None,
        }
    }

    pub fn selected(&self) -> usize {
        self.cursor
    }

    fn move_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.items.len().saturating_sub(1));
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + MAX_VISIBLE {
            self.scroll = self.cursor + 1 - MAX_VISIBLE;
        }
    }

    fn confirm(&self) -> Option<ModalResult<usize>> {
        (!self.items.is_empty()).then_some(ModalResult::Confirmed(self.cursor))
    }
}

impl Modal for SelectModal {
    type Result = usize;

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let items_width = self
            .items
            .iter()
            .map(|item| cell_count(item.chars().count()).saturating_add(2))
            .max()
            .unwrap_or(0);
        let width = calculate_modal_width(
            [cell_count(self.title.len()).saturating_add(2), items_width].into_iter(),
            area.width,
            ModalWidthConfig::default(),
        );
        let visible = self.items.len().min(MAX_VISIBLE) as u16;
        let modal_area = centered_rect(width, visible + 2, area);
        let inner = render_modal_frame(modal_area, buf, theme, &self.title);

        for (row, (idx, label)) in self
            .items
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(inner.height as usize)
            .enumerate()
        {
            let y = inner.y + row as u16;
            let (prefix, style) = if idx == self.cursor {
                (
                    "▶ ",
                    Style::default()
                        .fg(theme.fg)
                        .bg(theme.accented_fg)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("  ", Style::default().fg(theme.bg).bg(theme.fg))
            };
            buf.set_style(Rect::new(inner.x, y, inner.width, 1), style);
            buf.set_stringn(inner.x, y, format!("{prefix}{label}"), inner.width as usize, style);
        }
        self.last_list_area = Some(inner);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<ModalResult<usize>>> {
        match key.code {
            KeyCode::Esc => return Ok(Some(ModalResult::Cancelled)),
            KeyCode::Enter => return Ok(self.confirm()),
            KeyCode::Up => self.move_cursor(self.cursor.saturating_sub(1)),
            KeyCode::Down => self.move_cursor(self.cursor + 1),
            KeyCode::Home => self.move_cursor(0),
            KeyCode::End => self.move_cursor(usize::MAX),
            KeyCode::PageUp => self.move_cursor(self.cursor.saturating_sub(MAX_VISIBLE)),
            KeyCode::PageDown => self.move_cursor(self.cursor + MAX_VISIBLE),
            _ => {}
        }
        Ok(None)
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<Option<ModalResult<usize>>> {
        let Some(list) = self.last_list_area else {
            return Ok(None);
        };
        match mouse.kind {
            MouseEventKind::ScrollUp => self.move_cursor(self.cursor.saturating_sub(1)),
            MouseEventKind::ScrollDown => self.move_cursor(self.cursor + 1),
            MouseEventKind::Down(MouseButton::Left) if contains(list, mouse.column, mouse.row) => {
                let idx = self.scroll + (mouse.row - list.y) as usize;
                if idx < self.items.len() {
                    self.cursor = idx;
                    return Ok(self.confirm());
                }
            }
            _ => {}
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn sizes() -> Vec<String> {
        [8, 9, 10, 11, 12, 14, 16, 18, 20, 24]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn press(modal: &mut SelectModal, code: KeyCode) -> Option<ModalResult<usize>> {
        modal
            .handle_key(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn test_starts_on_current_item() {
        let modal = SelectModal::new("Font Size", sizes(), 4);
        assert_eq!(modal.selected(), 4);
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut modal = SelectModal::new("Font Size", sizes(), 0);
        press(&mut modal, KeyCode::Up);
        assert_eq!(modal.selected(), 0);
        press(&mut modal, KeyCode::End);
        assert_eq!(modal.selected(), 9);
        press(&mut modal, KeyCode::Down);
        assert_eq!(modal.selected(), 9);
        assert_eq!(press(&mut modal, KeyCode::Enter), Some(ModalResult::Confirmed(9)));
    }

    #[test]
    fn test_click_selects() {
        let mut modal = SelectModal::new("Font Size", sizes(), 0);
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        modal.render(area, &mut buf, &Theme::default());
        let list = modal.last_list_area.unwrap();

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: list.x,
            row: list.y + 2,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(modal.handle_mouse(click).unwrap(), Some(ModalResult::Confirmed(2)));
    }

    #[test]
    fn test_empty_list_cannot_confirm() {
        let mut modal = SelectModal::new("Empty", Vec::new(), 3);
        assert_eq!(press(&mut modal, KeyCode::Enter), None);
        assert_eq!(press(&mut modal, KeyCode::Esc), Some(ModalResult::Cancelled));
    }
}
