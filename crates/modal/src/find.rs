//! Find dialog. Stays open across searches; Enter reports the query,
//! Esc closes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{buffer::Buffer, layout::Rect, style::Style};

use noteit_theme::Theme;

use crate::{
    calculate_modal_width, cell_count, centered_rect, render_input_field, render_modal_frame,
    Modal, ModalResult, ModalWidthConfig, TextInput,
};

const PROMPT: &str = "Find:";

#[derive(Debug, Default)]
pub struct FindModal {
    input: TextInput,
    /// Outcome of the last search, shown under the input.
    feedback: Option<String>,
}

impl FindModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            input: TextInput::with_text(query),
            feedback: None,
        }
    }

    pub fn query(&self) -> &str {
        self.input.text()
    }

    pub fn set_feedback(&mut self, feedback: impl Into<String>) {
        self.feedback = Some(feedback.into());
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }
}

impl Modal for FindModal {
    type Result = String;

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let width = calculate_modal_width(
            [
                40,
                cell_count(self.input.text().chars().count())
                    .saturating_add(cell_count(PROMPT.len() + 2)),
            ]
            .into_iter(),
            area.width,
            ModalWidthConfig::default(),
        );
        let modal_area = centered_rect(width, 4, area);
        let inner = render_modal_frame(modal_area, buf, theme, "Find");
        if inner.height == 0 {
            return;
        }

        let label_style = Style::default().fg(theme.bg);
        buf.set_string(inner.x, inner.y, PROMPT, label_style);
        let input_x = inner.x + PROMPT.len() as u16 + 1;
        let input_area = Rect::new(
            input_x,
            inner.y,
            inner.right().saturating_sub(input_x),
            1,
        );
        render_input_field(
            buf,
            input_area,
            self.input.text(),
            self.input.cursor_pos(),
            true,
            theme,
        );

        if inner.height > 1 {
            let hint = self
                .feedback
                .as_deref()
                .unwrap_or("Enter: find all   Esc: close");
            buf.set_stringn(
                inner.x,
                inner.y + 1,
                hint,
                inner.width as usize,
                Style::default().fg(theme.disabled),
            );
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<ModalResult<String>>> {
        match key.code {
            KeyCode::Esc => Ok(Some(ModalResult::Cancelled)),
            KeyCode::Enter => Ok(Some(ModalResult::Confirmed(self.input.text().to_string()))),
            _ => {
                if self.input.handle_key(&key) {
                    self.feedback = None;
                }
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(modal: &mut FindModal, code: KeyCode) -> Option<ModalResult<String>> {
        modal
            .handle_key(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn test_enter_reports_query_repeatedly() {
        let mut modal = FindModal::new();
        for c in "abc".chars() {
            press(&mut modal, KeyCode::Char(c));
        }
        assert_eq!(
            press(&mut modal, KeyCode::Enter),
            Some(ModalResult::Confirmed("abc".to_string()))
        );
        modal.set_feedback("Found 3 match(es)");
        assert_eq!(
            press(&mut modal, KeyCode::Enter),
            Some(ModalResult::Confirmed("abc".to_string()))
        );
        assert_eq!(modal.feedback(), Some("Found 3 match(es)"));
    }

    #[test]
    fn test_render_with_huge_query() {
        let mut modal = FindModal::with_query("x".repeat(70_000));
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        modal.render(area, &mut buf, &Theme::default());
        assert_eq!(modal.query().len(), 70_000);
    }

    #[test]
    fn test_editing_clears_feedback() {
        let mut modal = FindModal::with_query("ab");
        modal.set_feedback("Found 1 match(es)");
        press(&mut modal, KeyCode::Backspace);
        assert_eq!(modal.query(), "a");
        assert_eq!(modal.feedback(), None);
        assert_eq!(press(&mut modal, KeyCode::Esc), Some(ModalResult::Cancelled));
    }
}
