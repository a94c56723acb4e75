//! Menu bar and drop-down menus.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::line,
    widgets::{Block, Borders, Clear, Widget},
};
use unicode_width::UnicodeWidthStr;

use noteit_keyboard::{Keymap, Menu, MenuEntry};
use noteit_theme::Theme;

pub struct MenuBarParams<'a> {
    pub theme: &'a Theme,
    /// Window title, shown right-aligned.
    pub title: &'a str,
    /// Menu whose drop-down is open.
    pub open_menu: Option<usize>,
}

/// Screen area of every menu title, in menu order.
pub fn menu_title_areas(menus: &[Menu], area: Rect) -> Vec<Rect> {
    let mut x = area.x + 1;
    menus
        .iter()
        .map(|menu| {
            let width = menu.title.width() as u16 + 2;
            let rect = Rect::new(x, area.y, width, 1).intersection(area);
            x = x.saturating_add(width);
            rect
        })
        .collect()
}

pub fn render_menu_bar(buf: &mut Buffer, area: Rect, menus: &[Menu], params: &MenuBarParams) {
    if area.height == 0 {
        return;
    }
    let theme = params.theme;
    let bar_style = Style::default().fg(theme.fg).bg(theme.accented_bg);
    buf.set_style(area, bar_style);
    for x in area.left()..area.right() {
        buf[(x, area.y)].set_char(' ');
    }

    let areas = menu_title_areas(menus, area);
    let mut used = area.x + 1;
    for (i, (menu, title_area)) in menus.iter().zip(&areas).enumerate() {
        if title_area.width == 0 {
            continue;
        }
        let is_open = params.open_menu == Some(i);
        let (base, accent) = if is_open {
            let style = Style::default()
                .fg(theme.selected_fg)
                .bg(theme.selected_bg)
                .add_modifier(Modifier::BOLD);
            (style, style)
        } else {
            (
                bar_style,
                bar_style.fg(theme.accented_fg).add_modifier(Modifier::BOLD),
            )
        };

        // first letter is the Alt accelerator
        let mut chars = menu.title.chars();
        let first = chars.next().map(String::from).unwrap_or_default();
        let rest: String = chars.collect();
        buf.set_style(*title_area, base);
        buf.set_string(title_area.x + 1, area.y, &first, accent);
        buf.set_string(title_area.x + 1 + first.width() as u16, area.y, &rest, base);
        used = title_area.right();
    }

    let title_width = params.title.width() as u16 + 1;
    let free = area.right().saturating_sub(used + 2);
    if free > 0 {
        let shown = title_width.min(free);
        let x = area.right() - shown;
        buf.set_stringn(
            x,
            area.y,
            params.title,
            shown as usize,
            bar_style.add_modifier(Modifier::BOLD),
        );
    }
}

/// Drop-down placement under a menu title, kept on screen.
pub fn dropdown_area(menu: &Menu, keymap: &Keymap, anchor: Rect, screen: Rect) -> Rect {
    let label_width = menu
        .actions()
        .map(|a| a.label().width())
        .max()
        .unwrap_or(0);
    let accel_width = menu
        .actions()
        .filter_map(|a| keymap.accelerator(a))
        .map(|s| s.width())
        .max()
        .unwrap_or(0);

    // borders + padding + gap between label and accelerator
    let width = (label_width + accel_width + 6) as u16;
    let height = menu.entries.len() as u16 + 2;
    let width = width.min(screen.width);
    let height = height.min(screen.height.saturating_sub(anchor.bottom() - screen.y));
    let x = anchor.x.min(screen.right().saturating_sub(width));
    Rect::new(x, anchor.bottom(), width, height)
}

pub fn render_dropdown(
    buf: &mut Buffer,
    menu: &Menu,
    area: Rect,
    highlighted: Option<usize>,
    keymap: &Keymap,
    theme: &Theme,
) {
    if area.width < 2 || area.height < 2 {
        return;
    }
    Clear.render(area, buf);

    let border_style = Style::default().fg(theme.fg).bg(theme.accented_bg);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(Style::default().fg(theme.fg).bg(theme.accented_bg));
    let inner = block.inner(area);
    block.render(area, buf);

    for (i, entry) in menu.entries.iter().enumerate().take(inner.height as usize) {
        let y = inner.y + i as u16;
        match entry {
            MenuEntry::Separator => {
                buf[(area.x, y)].set_symbol(line::VERTICAL_RIGHT);
                for x in inner.left()..inner.right() {
                    buf[(x, y)].set_symbol(line::HORIZONTAL).set_style(border_style);
                }
                buf[(area.right() - 1, y)].set_symbol(line::VERTICAL_LEFT);
            }
            MenuEntry::Item(action) => {
                let style = if highlighted == Some(i) {
                    Style::default()
                        .fg(theme.selected_fg)
                        .bg(theme.selected_bg)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.fg).bg(theme.accented_bg)
                };
                let row = Rect::new(inner.x, y, inner.width, 1);
                buf.set_style(row, style);
                buf.set_stringn(inner.x + 1, y, action.label(), inner.width as usize, style);

                if let Some(accel) = keymap.accelerator(*action) {
                    let accel_width = accel.width() as u16;
                    if accel_width + 2 < inner.width {
                        let x = inner.right() - accel_width - 1;
                        buf.set_string(x, y, accel, style.fg(theme.disabled));
                    }
                }
            }
        }
    }
}

/// Entry index under a cell of a drop-down, separators excluded.
pub fn dropdown_entry_at(menu: &Menu, area: Rect, column: u16, row: u16) -> Option<usize> {
    let inside = column > area.x
        && column + 1 < area.right()
        && row > area.y
        && row + 1 < area.bottom();
    if !inside {
        return None;
    }
    let idx = (row - area.y - 1) as usize;
    match menu.entries.get(idx) {
        Some(MenuEntry::Item(_)) => Some(idx),
        _ => None,
    }
}
