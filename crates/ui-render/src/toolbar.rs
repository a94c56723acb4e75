//! Toolbar row under the menu bar.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};
use unicode_width::UnicodeWidthStr;

use noteit_keyboard::{Action, ToolbarItem};
use noteit_theme::Theme;

fn item_label(item: &ToolbarItem, font_size: u16) -> String {
    match item {
        ToolbarItem::Button { label, .. } => format!(" {label} "),
        ToolbarItem::Separator => " │ ".to_string(),
        ToolbarItem::FontSize => format!(" Font Size: {font_size} ▾ "),
    }
}

/// Each toolbar item with the area it occupies. Items that do not fit get
/// an empty area.
pub fn toolbar_layout(items: &[ToolbarItem], area: Rect, font_size: u16) -> Vec<(ToolbarItem, Rect)> {
    let mut x = area.x;
    items
        .iter()
        .map(|item| {
            let width = item_label(item, font_size).width() as u16;
            let rect = Rect::new(x, area.y, width, area.height.min(1)).intersection(area);
            x = x.saturating_add(width + 1);
            (*item, rect)
        })
        .collect()
}

pub fn toolbar_item_at(layout: &[(ToolbarItem, Rect)], column: u16, row: u16) -> Option<Action> {
    layout
        .iter()
        .find(|(_, rect)| {
            column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
        })
        .and_then(|(item, _)| item.action())
}

pub fn render_toolbar(
    buf: &mut Buffer,
    area: Rect,
    items: &[ToolbarItem],
    font_size: u16,
    theme: &Theme,
) {
    if area.height == 0 {
        return;
    }
    let bar_style = Style::default().fg(theme.fg).bg(theme.accented_bg);
    buf.set_style(area, bar_style);
    for x in area.left()..area.right() {
        buf[(x, area.y)].set_char(' ');
    }

    for (item, rect) in toolbar_layout(items, area, font_size) {
        if rect.width == 0 {
            continue;
        }
        let style = match item {
            ToolbarItem::Separator => bar_style.fg(theme.disabled),
            ToolbarItem::FontSize => bar_style.fg(theme.accented_fg),
            ToolbarItem::Button { .. } => bar_style.add_modifier(Modifier::BOLD),
        };
        buf.set_stringn(
            rect.x,
            rect.y,
            item_label(&item, font_size),
            rect.width as usize,
            style,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer_text;
    use noteit_keyboard::toolbar;

    #[test]
    fn test_layout_and_hit_testing() {
        let area = Rect::new(0, 1, 200, 1);
        let layout = toolbar_layout(&toolbar(), area, 12);

        // " New " occupies 0..5
        assert_eq!(layout[0].1, Rect::new(0, 1, 5, 1));
        assert_eq!(toolbar_item_at(&layout, 2, 1), Some(Action::NewFile));
        assert_eq!(toolbar_item_at(&layout, 5, 1), None);
        assert_eq!(toolbar_item_at(&layout, 6, 1), Some(Action::OpenFile));
        assert_eq!(toolbar_item_at(&layout, 2, 0), None);

        let font = layout.last().unwrap().1;
        assert_eq!(toolbar_item_at(&layout, font.x, 1), Some(Action::ChooseFontSize));
    }

    #[test]
    fn test_render_shows_font_size() {
        let area = Rect::new(0, 0, 160, 1);
        let mut buf = Buffer::empty(area);
        render_toolbar(&mut buf, area, &toolbar(), 14, &Theme::default());
        let line = &buffer_text(&buf)[0];
        assert!(line.starts_with(" New   Open   Save "));
        assert!(line.contains("Split H"));
        assert!(line.contains("Font Size: 14"));
    }

    #[test]
    fn test_narrow_toolbar_clips() {
        let area = Rect::new(0, 0, 20, 1);
        let layout = toolbar_layout(&toolbar(), area, 12);
        assert!(layout
            .iter()
            .all(|(_, rect)| rect.width == 0 || rect.right() <= 20));
        assert_eq!(toolbar_item_at(&layout, 30, 0), None);
    }
}
