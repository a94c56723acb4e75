//! Shared sizing and drawing helpers.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Widget},
};
use unicode_width::UnicodeWidthStr;

use noteit_theme::Theme;

const MIN_WIDTH_DEFAULT: u16 = 30;
const MIN_WIDTH_WIDE: u16 = 50;
const MAX_WIDTH_PERCENTAGE_DEFAULT: f32 = 0.75;
const MAX_WIDTH_PERCENTAGE_WIDE: f32 = 0.90;
const PADDING: u16 = 6;

#[derive(Debug, Clone, Copy, Default)]
pub struct ModalWidthConfig {
    /// 90% of the screen at most instead of 75%.
    pub wide: bool,
}

/// Width that fits the widest content, bounded by the screen.
pub fn calculate_modal_width(
    content_widths: impl Iterator<Item = u16>,
    screen_width: u16,
    config: ModalWidthConfig,
) -> u16 {
    let content_width = content_widths.max().unwrap_or(0);
    let (max_percentage, min_width) = if config.wide {
        (MAX_WIDTH_PERCENTAGE_WIDE, MIN_WIDTH_WIDE)
    } else {
        (MAX_WIDTH_PERCENTAGE_DEFAULT, MIN_WIDTH_DEFAULT)
    };
    let max_width = (screen_width as f32 * max_percentage) as u16;

    content_width
        .saturating_add(PADDING)
        .max(min_width)
        .min(max_width)
        .min(screen_width)
}

/// A length in cells, saturating at `u16::MAX`.
pub fn cell_count(len: usize) -> u16 {
    u16::try_from(len).unwrap_or(u16::MAX)
}

pub fn max_line_width(text: &str) -> u16 {
    cell_count(text.lines().map(|line| line.width()).max().unwrap_or(0))
}

/// Rectangle of the given size centred in `r`, clamped to it.
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    let x = r.x + (r.width - width) / 2;
    let y = r.y + (r.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Clear the area and draw the dialog frame. Returns the inner area.
pub fn render_modal_frame(area: Rect, buf: &mut Buffer, theme: &Theme, title: &str) -> Rect {
    Clear.render(area, buf);

    let block = Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(theme.bg).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.bg))
        .style(Style::default().bg(theme.fg).fg(theme.bg));

    let inner = block.inner(area);
    block.render(area, buf);
    inner
}

/// Single-line input with a block cursor. Scrolls to keep the cursor in view.
pub fn render_input_field(
    buf: &mut Buffer,
    area: Rect,
    text: &str,
    cursor_pos: usize,
    focused: bool,
    theme: &Theme,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let input_style = if focused {
        Style::default().fg(theme.fg).bg(theme.bg)
    } else {
        Style::default().fg(theme.bg).bg(theme.disabled)
    };
    buf.set_style(Rect::new(area.x, area.y, area.width, 1), input_style);

    let chars: Vec<char> = text.chars().collect();
    let width = area.width as usize;
    let skip = (cursor_pos + 1).saturating_sub(width);
    let visible: String = chars.iter().skip(skip).take(width).collect();
    buf.set_stringn(area.x, area.y, &visible, width, input_style);

    if focused {
        let end = cursor_pos.min(chars.len());
        let before: String = chars[skip.min(end)..end].iter().collect();
        let cursor_x = area.x + cell_count(before.width()).min(area.width - 1);
        buf[(cursor_x, area.y)].set_style(input_style.add_modifier(Modifier::REVERSED));
    }
}

pub(crate) fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.x + area.width && row >= area.y && row < area.y + area.height
}

/// Button row text and the columns each button occupies.
pub(crate) fn button_row(labels: &[&str], area: Rect) -> (String, Vec<(u16, u16)>) {
    const SPACING: &str = "    ";
    let buttons: Vec<String> = labels.iter().map(|label| format!("[ {label} ]")).collect();
    let text = buttons.join(SPACING);
    let mut x = area.x + area.width.saturating_sub(text.width() as u16) / 2;

    let mut spans = Vec::with_capacity(buttons.len());
    for button in &buttons {
        let width = button.width() as u16;
        spans.push((x, x + width));
        x += width + SPACING.len() as u16;
    }
    (text, spans)
}
