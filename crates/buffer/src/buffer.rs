use std::collections::HashMap;
use std::ops::Range;

use noteit_clipboard::ClipboardProvider;
use ropey::Rope;
use unicode_segmentation::UnicodeSegmentation;

use crate::history::{Action, History};
use crate::viewport::{line_break_len, line_chars, ViewLayout, Viewport};
use crate::TextWidget;

/// Tag used for search highlights.
pub const FOUND_TAG: &str = "found";

/// Editable text addressed by character offset.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    rope: Rope,
    cursor: usize,
    /// Other end of the selection; the cursor is the moving end.
    anchor: Option<usize>,
    /// Column kept across vertical moves through shorter lines.
    preferred_column: Option<usize>,
    history: History,
    tags: HashMap<String, Vec<Range<usize>>>,
    viewport: Viewport,
    /// Bumped on every content change.
    revision: u64,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::with_undo_limit(crate::DEFAULT_UNDO_LIMIT)
    }

    pub fn with_undo_limit(max_undo: usize) -> Self {
        Self {
            rope: Rope::new(),
            cursor: 0,
            anchor: None,
            preferred_column: None,
            history: History::with_capacity(max_undo),
            tags: HashMap::new(),
            viewport: Viewport::default(),
            revision: 0,
        }
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Zero-based line and column of the cursor.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let line = self.rope.char_to_line(self.cursor);
        (line, self.cursor - self.rope.line_to_char(line))
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Offset the view will scroll to on the next layout pass.
    pub fn pending_see(&self) -> Option<usize> {
        self.viewport.pending_see()
    }

    /// Ordered selection range, `None` when nothing is selected.
    pub fn selection(&self) -> Option<Range<usize>> {
        let anchor = self.anchor?;
        match anchor.cmp(&self.cursor) {
            std::cmp::Ordering::Less => Some(anchor..self.cursor),
            std::cmp::Ordering::Greater => Some(self.cursor..anchor),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn selected_text(&self) -> Option<String> {
        self.selection()
            .map(|range| self.rope.slice(range).to_string())
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Line text without its terminator.
    pub fn line_text(&self, line: usize) -> String {
        if line >= self.rope.len_lines() {
            return String::new();
        }
        line_chars(&self.rope, line).into_iter().collect()
    }

    fn line_start(&self, line: usize) -> usize {
        self.rope.line_to_char(line)
    }

    fn line_content_len(&self, line: usize) -> usize {
        let slice = self.rope.line(line);
        slice.len_chars() - line_break_len(slice)
    }

    // Editing

    /// Insert at the cursor, replacing the selection if there is one.
    pub fn insert_text(&mut self, text: &str) -> bool {
        let mut actions = Vec::new();

        if let Some(range) = self.selection() {
            let removed = self.raw_remove(range.clone());
            self.cursor = range.start;
            actions.push(Action::Delete {
                position: range.start,
                text: removed,
            });
        }
        self.anchor = None;

        if !text.is_empty() {
            let position = self.cursor;
            self.raw_insert(position, text);
            self.cursor = position + text.chars().count();
            actions.push(Action::Insert {
                position,
                text: text.to_string(),
            });
        }

        if actions.is_empty() {
            return false;
        }
        self.record(actions);
        self.after_edit();
        true
    }

    pub fn insert_char(&mut self, c: char) -> bool {
        let mut encoded = [0u8; 4];
        self.insert_text(c.encode_utf8(&mut encoded))
    }

    pub fn insert_newline(&mut self) -> bool {
        self.insert_text("\n")
    }

    pub fn backspace(&mut self) -> bool {
        if self.selection().is_some() {
            return self.delete_selection();
        }
        self.anchor = None;
        if self.cursor == 0 {
            return false;
        }
        let start = self.prev_position(self.cursor);
        let removed = self.raw_remove(start..self.cursor);
        self.cursor = start;
        self.history.push(Action::Delete {
            position: start,
            text: removed,
        });
        self.after_edit();
        true
    }

    pub fn delete_forward(&mut self) -> bool {
        if self.selection().is_some() {
            return self.delete_selection();
        }
        self.anchor = None;
        if self.cursor >= self.len_chars() {
            return false;
        }
        let end = self.next_position(self.cursor);
        let removed = self.raw_remove(self.cursor..end);
        self.history.push(Action::Delete {
            position: self.cursor,
            text: removed,
        });
        self.after_edit();
        true
    }

    pub fn delete_selection(&mut self) -> bool {
        let Some(range) = self.selection() else {
            return false;
        };
        let removed = self.raw_remove(range.clone());
        self.cursor = range.start;
        self.anchor = None;
        self.history.commit_pending();
        self.history.push(Action::Delete {
            position: range.start,
            text: removed,
        });
        self.history.commit_pending();
        self.after_edit();
        true
    }

    /// Close the current undo step, e.g. when focus moves elsewhere.
    pub fn commit_history(&mut self) {
        self.history.commit_pending();
    }

    fn record(&mut self, mut actions: Vec<Action>) {
        if actions.len() == 1 {
            if let Some(action) = actions.pop() {
                self.history.push(action);
            }
        } else {
            self.history.push(Action::Group { actions });
        }
    }

    fn after_edit(&mut self) {
        self.preferred_column = None;
        self.viewport.follow_cursor();
    }

    fn raw_insert(&mut self, position: usize, text: &str) {
        self.rope.insert(position, text);
        let len = text.chars().count();
        for ranges in self.tags.values_mut() {
            for range in ranges.iter_mut() {
                if range.start >= position {
                    range.start += len;
                    range.end += len;
                } else if range.end > position {
                    range.end += len;
                }
            }
        }
        self.revision += 1;
    }

    fn raw_remove(&mut self, range: Range<usize>) -> String {
        let removed = self.rope.slice(range.clone()).to_string();
        self.rope.remove(range.clone());
        let shift = |offset: usize| {
            if offset <= range.start {
                offset
            } else if offset >= range.end {
                offset - range.len()
            } else {
                range.start
            }
        };
        for ranges in self.tags.values_mut() {
            for tagged in ranges.iter_mut() {
                *tagged = shift(tagged.start)..shift(tagged.end);
            }
            ranges.retain(|tagged| !tagged.is_empty());
        }
        self.revision += 1;
        removed
    }

    fn apply(&mut self, action: &Action) {
        match action {
            Action::Insert { position, text } => {
                self.raw_insert(*position, text);
                self.cursor = position + text.chars().count();
            }
            Action::Delete { position, text } => {
                let end = position + text.chars().count();
                self.raw_remove(*position..end);
                self.cursor = *position;
            }
            Action::Group { actions } => {
                for action in actions {
                    self.apply(action);
                }
            }
        }
    }

    // Cursor movement. `select` extends the selection from where the cursor was.

    fn move_to(&mut self, offset: usize, select: bool) {
        if select {
            if self.anchor.is_none() {
                self.anchor = Some(self.cursor);
            }
        } else {
            self.anchor = None;
        }
        self.cursor = offset.min(self.len_chars());
        self.history.commit_pending();
        self.viewport.follow_cursor();
    }

    /// Step back one position, keeping CRLF together.
    fn prev_position(&self, offset: usize) -> usize {
        if offset == 0 {
            return 0;
        }
        if offset >= 2 && self.rope.char(offset - 1) == '\n' && self.rope.char(offset - 2) == '\r' {
            offset - 2
        } else {
            offset - 1
        }
    }

    fn next_position(&self, offset: usize) -> usize {
        let len = self.len_chars();
        if offset >= len {
            return len;
        }
        if offset + 1 < len && self.rope.char(offset) == '\r' && self.rope.char(offset + 1) == '\n' {
            offset + 2
        } else {
            offset + 1
        }
    }

    pub fn move_left(&mut self, select: bool) {
        self.preferred_column = None;
        let target = self.prev_position(self.cursor);
        self.move_to(target, select);
    }

    pub fn move_right(&mut self, select: bool) {
        self.preferred_column = None;
        let target = self.next_position(self.cursor);
        self.move_to(target, select);
    }

    pub fn move_up(&mut self, select: bool) {
        self.move_lines(-1, select);
    }

    pub fn move_down(&mut self, select: bool) {
        self.move_lines(1, select);
    }

    pub fn page_up(&mut self, rows: usize, select: bool) {
        self.move_lines(-(rows.max(1) as isize), select);
    }

    pub fn page_down(&mut self, rows: usize, select: bool) {
        self.move_lines(rows.max(1) as isize, select);
    }

    fn move_lines(&mut self, delta: isize, select: bool) {
        let (line, column) = self.cursor_line_col();
        let column = *self.preferred_column.get_or_insert(column);
        let last = self.line_count().saturating_sub(1) as isize;
        let target_line = (line as isize + delta).clamp(0, last) as usize;
        if target_line == line {
            return;
        }
        let target = self.line_start(target_line) + column.min(self.line_content_len(target_line));
        self.move_to(target, select);
    }

    pub fn move_line_start(&mut self, select: bool) {
        self.preferred_column = None;
        let (line, _) = self.cursor_line_col();
        self.move_to(self.line_start(line), select);
    }

    pub fn move_line_end(&mut self, select: bool) {
        self.preferred_column = None;
        let (line, _) = self.cursor_line_col();
        self.move_to(self.line_start(line) + self.line_content_len(line), select);
    }

    pub fn move_doc_start(&mut self, select: bool) {
        self.preferred_column = None;
        self.move_to(0, select);
    }

    pub fn move_doc_end(&mut self, select: bool) {
        self.preferred_column = None;
        self.move_to(self.len_chars(), select);
    }

    pub fn move_word_left(&mut self, select: bool) {
        self.preferred_column = None;
        let (line, column) = self.cursor_line_col();
        if column == 0 {
            self.move_left(select);
            return;
        }
        let text = self.line_text(line);
        let target = word_starts(&text)
            .into_iter()
            .filter(|&start| start < column)
            .last()
            .unwrap_or(0);
        self.move_to(self.line_start(line) + target, select);
    }

    pub fn move_word_right(&mut self, select: bool) {
        self.preferred_column = None;
        let (line, column) = self.cursor_line_col();
        let line_len = self.line_content_len(line);
        if column >= line_len {
            self.move_right(select);
            return;
        }
        let text = self.line_text(line);
        let target = word_starts(&text)
            .into_iter()
            .find(|&start| start > column)
            .unwrap_or(line_len);
        self.move_to(self.line_start(line) + target, select);
    }

    // View

    /// Wrap the visible part of the text for a `width` x `height` area,
    /// scrolling first if the cursor moved or `see` was requested.
    pub fn layout(&mut self, width: u16, height: u16, tab_size: usize) -> ViewLayout {
        self.viewport
            .layout(&self.rope, self.cursor, width, height, tab_size)
    }

    /// Mouse wheel scrolling; does not move the cursor.
    pub fn scroll_lines(&mut self, delta: isize) {
        self.viewport.scroll_lines(delta, self.line_count());
    }

    /// Place the cursor under a cell of the last laid out area.
    pub fn click_at(&mut self, row: u16, col: u16, select: bool) {
        self.preferred_column = None;
        let offset = self.viewport.offset_at(&self.rope, row, col);
        self.move_to(offset, select);
    }
}

/// Char index of every non-whitespace word segment in a line.
fn word_starts(text: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut chars_seen = 0;
    for (_, segment) in text.split_word_bound_indices() {
        if !segment.chars().all(char::is_whitespace) {
            starts.push(chars_seen);
        }
        chars_seen += segment.chars().count();
    }
    starts
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextWidget for TextBuffer {
    fn text(&self) -> String {
        self.rope.to_string()
    }

    fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = 0;
        self.anchor = None;
        self.preferred_column = None;
        self.history.clear();
        self.tags.clear();
        self.viewport.reset();
        self.revision += 1;
    }

    fn undo(&mut self) -> bool {
        let Some(action) = self.history.undo() else {
            return false;
        };
        self.anchor = None;
        self.apply(&action);
        self.after_edit();
        true
    }

    fn redo(&mut self) -> bool {
        let Some(action) = self.history.redo() else {
            return false;
        };
        self.anchor = None;
        self.apply(&action);
        self.after_edit();
        true
    }

    fn cut(&mut self, clipboard: &mut dyn ClipboardProvider) -> bool {
        if !self.copy(clipboard) {
            return false;
        }
        self.delete_selection()
    }

    fn copy(&self, clipboard: &mut dyn ClipboardProvider) -> bool {
        match self.selected_text() {
            Some(text) => clipboard.set_text(&text).is_ok(),
            None => false,
        }
    }

    fn paste(&mut self, clipboard: &mut dyn ClipboardProvider) -> bool {
        match clipboard.get_text() {
            Some(text) if !text.is_empty() => {
                self.history.commit_pending();
                let changed = self.insert_text(&text);
                self.history.commit_pending();
                changed
            }
            _ => false,
        }
    }

    fn select_all(&mut self) {
        self.preferred_column = None;
        self.anchor = Some(self.len_chars());
        self.cursor = 0;
        self.history.commit_pending();
        self.viewport.request_see(0);
    }

    fn find_literal(&self, query: &str, from: usize) -> Option<usize> {
        let needle: Vec<char> = query.chars().collect();
        let len = self.len_chars();
        if needle.is_empty() || from > len || needle.len() > len - from {
            return None;
        }

        let last_start = len - needle.len();
        let mut chars = self.rope.chars_at(from);
        let mut window: std::collections::VecDeque<char> =
            chars.by_ref().take(needle.len()).collect();

        for start in from..=last_start {
            if window.iter().eq(needle.iter()) {
                return Some(start);
            }
            window.pop_front();
            match chars.next() {
                Some(c) => window.push_back(c),
                None => break,
            }
        }
        None
    }

    fn tag_add(&mut self, tag: &str, range: Range<usize>) {
        let len = self.len_chars();
        let range = range.start.min(len)..range.end.min(len);
        if range.is_empty() {
            return;
        }
        self.tags.entry(tag.to_string()).or_default().push(range);
    }

    fn tag_remove(&mut self, tag: &str) {
        self.tags.remove(tag);
    }

    fn tag_ranges(&self, tag: &str) -> &[Range<usize>] {
        self.tags.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    fn set_cursor(&mut self, offset: usize) {
        self.preferred_column = None;
        self.move_to(offset, false);
    }

    fn see(&mut self, offset: usize) {
        self.viewport.request_see(offset.min(self.len_chars()));
    }
}
