use ropey::{Rope, RopeSlice};

use crate::wrap::{char_display_width, wrap_points};

/// One screen row of wrapped text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualRow {
    /// Logical line this row belongs to.
    pub line: usize,
    /// Character offset of the first character of the row.
    pub start: usize,
    /// Row text without the line terminator.
    pub text: String,
    /// Last row of its logical line.
    pub last_in_line: bool,
}

impl VisualRow {
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }
}

/// What the renderer needs to paint a buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewLayout {
    pub rows: Vec<VisualRow>,
    /// Cursor cell relative to the text area, if on screen.
    pub cursor: Option<(u16, u16)>,
}

/// Scroll state of a wrapped view. The top of the view is always the first
/// row of a logical line.
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    top_line: usize,
    width: u16,
    height: u16,
    tab_size: usize,
    follow_cursor: bool,
    see_target: Option<usize>,
}

impl Viewport {
    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// Text area size used by the last layout pass.
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub(crate) fn reset(&mut self) {
        self.top_line = 0;
        self.follow_cursor = false;
        self.see_target = None;
    }

    pub(crate) fn follow_cursor(&mut self) {
        self.follow_cursor = true;
    }

    pub(crate) fn request_see(&mut self, offset: usize) {
        self.see_target = Some(offset);
    }

    pub(crate) fn pending_see(&self) -> Option<usize> {
        self.see_target
    }

    pub(crate) fn scroll_lines(&mut self, delta: isize, line_count: usize) {
        let last = line_count.saturating_sub(1) as isize;
        self.top_line = (self.top_line as isize + delta).clamp(0, last.max(0)) as usize;
    }

    pub(crate) fn layout(
        &mut self,
        rope: &Rope,
        cursor: usize,
        width: u16,
        height: u16,
        tab_size: usize,
    ) -> ViewLayout {
        self.width = width;
        self.height = height;
        self.tab_size = tab_size;
        self.top_line = self.top_line.min(rope.len_lines().saturating_sub(1));

        let target = self
            .see_target
            .take()
            .or_else(|| self.follow_cursor.then_some(cursor));
        self.follow_cursor = false;
        if let Some(offset) = target {
            self.scroll_to(rope, offset.min(rope.len_chars()));
        }

        let rows = self.rows(rope);
        let cursor = locate(&rows, cursor, width, tab_size);
        ViewLayout { rows, cursor }
    }

    /// Character offset under a cell of the text area.
    pub(crate) fn offset_at(&self, rope: &Rope, row: u16, col: u16) -> usize {
        let rows = self.rows(rope);
        let (visual, col) = match rows.get(row as usize) {
            Some(visual) => (visual, col as usize),
            None => match rows.last() {
                Some(visual) => (visual, usize::MAX),
                None => return 0,
            },
        };

        let mut x = 0;
        for (i, c) in visual.text.chars().enumerate() {
            let width = char_display_width(c, self.tab_size);
            if col < x + width {
                return visual.start + i;
            }
            x += width;
        }

        let len = visual.len_chars();
        if !visual.last_in_line && len > 0 {
            visual.start + len - 1
        } else {
            visual.start + len
        }
    }

    fn scroll_to(&mut self, rope: &Rope, offset: usize) {
        let height = self.height.max(1) as usize;
        let target_line = rope.char_to_line(offset);

        if target_line < self.top_line {
            self.top_line = target_line;
            return;
        }

        // every line takes at least one row
        if target_line - self.top_line >= height {
            self.top_line = target_line + 1 - height;
        }

        let line_start = rope.line_to_char(target_line);
        let chars = line_chars(rope, target_line);
        let points = wrap_points(&chars, self.width as usize, self.tab_size);
        let column = offset - line_start;
        let row_in_line = points.iter().rposition(|&p| p <= column).unwrap_or(0);

        let mut rows_needed: usize = (self.top_line..target_line)
            .map(|line| self.row_count(rope, line))
            .sum::<usize>()
            + row_in_line
            + 1;

        while rows_needed > height && self.top_line < target_line {
            rows_needed -= self.row_count(rope, self.top_line);
            self.top_line += 1;
        }
    }

    fn row_count(&self, rope: &Rope, line: usize) -> usize {
        wrap_points(&line_chars(rope, line), self.width as usize, self.tab_size).len()
    }

    fn rows(&self, rope: &Rope) -> Vec<VisualRow> {
        let height = self.height as usize;
        let mut rows = Vec::with_capacity(height);
        let mut line = self.top_line;

        while rows.len() < height && line < rope.len_lines() {
            let line_start = rope.line_to_char(line);
            let chars = line_chars(rope, line);
            let points = wrap_points(&chars, self.width as usize, self.tab_size);

            for (i, &start) in points.iter().enumerate() {
                if rows.len() >= height {
                    break;
                }
                let end = points.get(i + 1).copied().unwrap_or(chars.len());
                rows.push(VisualRow {
                    line,
                    start: line_start + start,
                    text: chars[start..end].iter().collect(),
                    last_in_line: i + 1 == points.len(),
                });
            }
            line += 1;
        }

        rows
    }
}

fn locate(rows: &[VisualRow], cursor: usize, width: u16, tab_size: usize) -> Option<(u16, u16)> {
    rows.iter().enumerate().find_map(|(y, row)| {
        let len = row.len_chars();
        let on_row = cursor >= row.start
            && (cursor < row.start + len || (cursor == row.start + len && row.last_in_line));
        if !on_row {
            return None;
        }
        let x: usize = row
            .text
            .chars()
            .take(cursor - row.start)
            .map(|c| char_display_width(c, tab_size))
            .sum();
        let x = x.min(width.saturating_sub(1) as usize);
        Some((x as u16, y as u16))
    })
}

pub(crate) fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

/// Length of the terminator at the end of a line slice (0, 1 or 2 for CRLF).
pub(crate) fn line_break_len(line: RopeSlice) -> usize {
    let n = line.len_chars();
    if n == 0 {
        return 0;
    }
    let last = line.char(n - 1);
    if last == '\n' && n >= 2 && line.char(n - 2) == '\r' {
        2
    } else if is_line_break(last) {
        1
    } else {
        0
    }
}

/// Characters of a line, terminator excluded.
pub(crate) fn line_chars(rope: &Rope, line: usize) -> Vec<char> {
    let slice = rope.line(line);
    let len = slice.len_chars() - line_break_len(slice);
    slice.chars().take(len).collect()
}
