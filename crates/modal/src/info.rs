//! Message box with a single OK button.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Paragraph, Widget, Wrap},
};

use noteit_theme::Theme;

use crate::widgets::{button_row, contains};
use crate::{
    calculate_modal_width, cell_count, centered_rect, max_line_width, render_modal_frame, Modal,
    ModalResult, ModalWidthConfig,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoKind {
    Info,
    Error,
}

#[derive(Debug)]
pub struct InfoModal {
    title: String,
    message: String,
    kind: InfoKind,
    last_area: Option<Rect>,
}

impl InfoModal {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind: InfoKind::Info,
            last_area: None,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: InfoKind::Error,
            ..Self::new(title, message)
        }
    }

    pub fn kind(&self) -> InfoKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Modal for InfoModal {
    type Result = ();

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let width = calculate_modal_width(
            [cell_count(self.title.len()).saturating_add(2), max_line_width(&self.message)].into_iter(),
            area.width,
            ModalWidthConfig::default(),
        );
        let inner_width = width.saturating_sub(2).max(1) as usize;
        let message_lines: u16 = self
            .message
            .lines()
            .map(|line| cell_count(line.chars().count().div_ceil(inner_width).max(1)))
            .fold(0u16, u16::saturating_add)
            .max(1);
        let modal_area = centered_rect(width, message_lines + 4, area);
        let inner = render_modal_frame(modal_area, buf, theme, &self.title);

        let message_color = match self.kind {
            InfoKind::Info => theme.bg,
            InfoKind::Error => theme.error,
        };
        let message_area = Rect::new(inner.x, inner.y, inner.width, message_lines.min(inner.height));
        Paragraph::new(self.message.as_str())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .style(Style::default().fg(message_color))
            .render(message_area, buf);

        let button_area = Rect::new(inner.x, inner.bottom().saturating_sub(1), inner.width, 1);
        let (text, spans) = button_row(&["OK"], button_area);
        if let Some((start, _)) = spans.first() {
            let style = Style::default()
                .fg(theme.fg)
                .bg(theme.accented_fg)
                .add_modifier(Modifier::BOLD);
            buf.set_string(*start, button_area.y, text, style);
        }
        self.last_area = Some(modal_area);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<ModalResult<()>>> {
        Ok(match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(ModalResult::Confirmed(())),
            _ => None,
        })
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<Option<ModalResult<()>>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }
        // a click anywhere on the dialog dismisses it
        let inside = self
            .last_area
            .is_some_and(|area| contains(area, mouse.column, mouse.row));
        Ok(inside.then_some(ModalResult::Confirmed(())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_dismiss_keys() {
        let mut modal = InfoModal::error("Error", "Could not open file: denied");
        assert_eq!(modal.kind(), InfoKind::Error);
        for code in [KeyCode::Enter, KeyCode::Esc, KeyCode::Char(' ')] {
            assert_eq!(
                modal.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap(),
                Some(ModalResult::Confirmed(()))
            );
        }
        assert_eq!(
            modal
                .handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE))
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_render_shows_message() {
        let mut modal = InfoModal::new("Info", "Maximum of 4 panels allowed");
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        modal.render(area, &mut buf, &Theme::default());

        let screen: String = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        assert!(screen.contains("Maximum of 4 panels allowed"));
        assert!(screen.contains("[ OK ]"));
    }
}
