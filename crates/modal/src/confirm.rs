//! Yes/No question. Esc cancels.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Paragraph, Widget},
};

use noteit_theme::Theme;

use crate::widgets::{button_row, contains};
use crate::{
    calculate_modal_width, cell_count, centered_rect, max_line_width, render_modal_frame, Modal,
    ModalResult, ModalWidthConfig,
};

const BUTTONS: [&str; 2] = ["Yes", "No"];

#[derive(Debug)]
pub struct ConfirmModal {
    title: String,
    message: String,
    /// `true` = Yes
    selected: bool,
    last_buttons_area: Option<Rect>,
}

impl ConfirmModal {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            selected: true,
            last_buttons_area: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Modal for ConfirmModal {
    type Result = bool;

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let message_lines = cell_count(self.message.lines().count().max(1));
        let width = calculate_modal_width(
            [
                cell_count(self.title.len()).saturating_add(2),
                max_line_width(&self.message),
                17,
            ]
            .into_iter(),
            area.width,
            ModalWidthConfig::default(),
        );
        // border + message + blank + buttons + border
        let modal_area = centered_rect(width, message_lines + 4, area);
        let inner = render_modal_frame(modal_area, buf, theme, &self.title);

        let message_area = Rect::new(inner.x, inner.y, inner.width, message_lines.min(inner.height));
        Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .render(message_area, buf);

        let buttons_area = Rect::new(inner.x, inner.bottom().saturating_sub(1), inner.width, 1);
        let (_, spans) = button_row(&BUTTONS, buttons_area);
        for (i, ((start, _), label)) in spans.iter().zip(BUTTONS).enumerate() {
            let active = (i == 0) == self.selected;
            let style = if active {
                Style::default()
                    .fg(theme.fg)
                    .bg(theme.accented_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.accented_fg)
            };
            buf.set_string(*start, buttons_area.y, format!("[ {label} ]"), style);
        }
        self.last_buttons_area = Some(buttons_area);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<ModalResult<bool>>> {
        let result = match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.selected = !self.selected;
                None
            }
            KeyCode::Enter => Some(ModalResult::Confirmed(self.selected)),
            KeyCode::Esc => Some(ModalResult::Cancelled),
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(ModalResult::Confirmed(true)),
            KeyCode::Char('n') | KeyCode::Char('N') => Some(ModalResult::Confirmed(false)),
            _ => None,
        };
        Ok(result)
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<Option<ModalResult<bool>>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }
        let Some(area) = self.last_buttons_area else {
            return Ok(None);
        };
        if !contains(area, mouse.column, mouse.row) {
            return Ok(None);
        }

        let (_, spans) = button_row(&BUTTONS, area);
        let clicked = spans
            .iter()
            .position(|(start, end)| mouse.column >= *start && mouse.column < *end);
        Ok(clicked.map(|i| {
            self.selected = i == 0;
            ModalResult::Confirmed(self.selected)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(modal: &mut ConfirmModal, code: KeyCode) -> Option<ModalResult<bool>> {
        modal
            .handle_key(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn test_keys() {
        let mut modal = ConfirmModal::new("Save", "Save current file?");
        assert_eq!(press(&mut modal, KeyCode::Enter), Some(ModalResult::Confirmed(true)));
        assert_eq!(press(&mut modal, KeyCode::Tab), None);
        assert_eq!(press(&mut modal, KeyCode::Enter), Some(ModalResult::Confirmed(false)));
        assert_eq!(press(&mut modal, KeyCode::Char('y')), Some(ModalResult::Confirmed(true)));
        assert_eq!(press(&mut modal, KeyCode::Char('n')), Some(ModalResult::Confirmed(false)));
        assert_eq!(press(&mut modal, KeyCode::Esc), Some(ModalResult::Cancelled));
    }

    #[test]
    fn test_render_and_click_no() {
        let mut modal = ConfirmModal::new("Exit", "Save before exiting?");
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        modal.render(area, &mut buf, &Theme::default());

        let buttons = modal.last_buttons_area.unwrap();
        let (_, spans) = button_row(&BUTTONS, buttons);
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: spans[1].0 + 1,
            row: buttons.y,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            modal.handle_mouse(click).unwrap(),
            Some(ModalResult::Confirmed(false))
        );
    }
}
