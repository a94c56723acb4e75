use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use unicode_width::UnicodeWidthStr;

use noteit_theme::Theme;

pub struct StatusBarParams<'a> {
    pub theme: &'a Theme,
    pub message: &'a str,
    /// Zero-based cursor line and column of the active panel.
    pub cursor: (usize, usize),
    /// Active panel number (1-based) and panel count.
    pub panel: (usize, usize),
}

/// Status message on the left, cursor and panel position on the right.
pub fn render_status_bar(buf: &mut Buffer, area: Rect, params: &StatusBarParams) {
    if area.height == 0 {
        return;
    }
    let theme = params.theme;
    let style = Style::default().fg(theme.fg).bg(theme.accented_bg);
    buf.set_style(area, style);
    for x in area.left()..area.right() {
        buf[(x, area.y)].set_char(' ');
    }

    let (line, col) = params.cursor;
    let (panel, count) = params.panel;
    let position = format!(" Ln {}, Col {} │ Panel {panel}/{count} ", line + 1, col + 1);
    let position_width = position.width() as u16;

    let message_width = area.width.saturating_sub(position_width + 1) as usize;
    buf.set_stringn(
        area.x,
        area.y,
        format!(" {}", params.message),
        message_width,
        style,
    );

    if position_width <= area.width {
        buf.set_string(
            area.right() - position_width,
            area.y,
            position,
            style.fg(theme.disabled),
        );
    }
}
