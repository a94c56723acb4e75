//! A bordered panel showing one text buffer.

use std::ops::Range;

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use noteit_buffer::{char_display_width, TextBuffer, TextWidget, FOUND_TAG};
use noteit_theme::Theme;

pub struct PanelView<'a> {
    /// Document name with dirty marker.
    pub title: &'a str,
    /// Font family and size, e.g. `Consolas 12`.
    pub font_label: &'a str,
    pub focused: bool,
    pub tab_size: usize,
}

/// Draw the panel. Returns where the terminal cursor goes when focused.
pub fn render_panel(
    buf: &mut Buffer,
    area: Rect,
    text: &mut TextBuffer,
    view: &PanelView,
    theme: &Theme,
) -> Option<Position> {
    if area.width == 0 || area.height == 0 {
        return None;
    }

    let border_style = if view.focused {
        Style::default()
            .fg(theme.accented_fg)
            .bg(theme.bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.disabled).bg(theme.bg)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(format!(" {} ", view.title), border_style))
        .title_bottom(Line::styled(format!(" {} ", view.font_label), border_style).right_aligned());

    let inner = block.inner(area);
    block.render(area, buf);

    let text_style = Style::default().fg(theme.fg).bg(theme.bg);
    buf.set_style(inner, text_style);
    for y in inner.top()..inner.bottom() {
        for x in inner.left()..inner.right() {
            buf[(x, y)].set_char(' ');
        }
    }
    if inner.width == 0 || inner.height == 0 {
        return None;
    }

    let layout = text.layout(inner.width, inner.height, view.tab_size);
    let selection = text.selection();
    let visible = match (layout.rows.first(), layout.rows.last()) {
        (Some(first), Some(last)) => first.start..last.start + last.len_chars() + 1,
        _ => 0..0,
    };
    let found: Vec<Range<usize>> = text
        .tag_ranges(FOUND_TAG)
        .iter()
        .filter(|r| r.start < visible.end && r.end > visible.start)
        .cloned()
        .collect();

    let selected_style = Style::default().fg(theme.selected_fg).bg(theme.selected_bg);
    let found_style = text_style.bg(theme.found_bg);
    let style_at = |offset: usize| {
        if selection.as_ref().is_some_and(|s| s.contains(&offset)) {
            selected_style
        } else if found.iter().any(|r| r.contains(&offset)) {
            found_style
        } else {
            text_style
        }
    };

    for (row_idx, row) in layout.rows.iter().enumerate() {
        let y = inner.y + row_idx as u16;
        let mut x: u16 = 0;

        for (i, c) in row.text.chars().enumerate() {
            let width = char_display_width(c, view.tab_size) as u16;
            if width == 0 {
                // combining mark joins the previous cell
                if x > 0 {
                    let cell = &mut buf[(inner.x + x - 1, y)];
                    let symbol = format!("{}{c}", cell.symbol());
                    cell.set_symbol(&symbol);
                }
                continue;
            }
            if x + width > inner.width {
                break;
            }
            let symbol = if c == '\t' {
                " ".repeat(width as usize)
            } else if c.is_control() {
                "?".to_string()
            } else {
                c.to_string()
            };
            buf.set_stringn(inner.x + x, y, symbol, width as usize, style_at(row.start + i));
            x += width;
        }

        // a selected line break shows as one highlighted cell
        let line_end = row.start + row.len_chars();
        if row.last_in_line && x < inner.width && line_end < text.len_chars() {
            if let Some(s) = &selection {
                if s.contains(&line_end) {
                    buf[(inner.x + x, y)].set_style(selected_style);
                }
            }
        }
    }

    if !view.focused {
        return None;
    }
    layout
        .cursor
        .map(|(cx, cy)| Position::new(inner.x + cx, inner.y + cy))
}
