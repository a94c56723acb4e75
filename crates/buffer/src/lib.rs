//! Text widget for Simply Note It.
//!
//! A [`TextBuffer`] stores its content in a rope and addresses everything by
//! character offset: the cursor, the selection anchor, highlight tags and the
//! undo history. Panels only talk to it through the [`TextWidget`] trait plus
//! the cursor movement helpers used by the key handler.

mod buffer;
mod history;
mod viewport;
mod wrap;

use std::ops::Range;

use noteit_clipboard::ClipboardProvider;

pub use buffer::{TextBuffer, FOUND_TAG};
pub use history::{Action, History};
pub use viewport::{ViewLayout, Viewport, VisualRow};
pub use wrap::{calculate_wrap_point, char_display_width, is_word_boundary, wrap_points};

/// Default number of undo steps kept per buffer.
pub const DEFAULT_UNDO_LIMIT: usize = 50;

/// Capabilities every editing surface in a panel provides.
///
/// Offsets are character offsets into the whole text. Methods that may or
/// may not change anything return `true` when they did.
pub trait TextWidget {
    /// Whole content, line terminators preserved.
    fn text(&self) -> String;

    /// Replace the content. History, tags and selection are reset and the
    /// cursor goes to the start.
    fn set_text(&mut self, text: &str);

    fn clear(&mut self) {
        self.set_text("");
    }

    fn undo(&mut self) -> bool;
    fn redo(&mut self) -> bool;

    fn cut(&mut self, clipboard: &mut dyn ClipboardProvider) -> bool;
    fn copy(&self, clipboard: &mut dyn ClipboardProvider) -> bool;
    fn paste(&mut self, clipboard: &mut dyn ClipboardProvider) -> bool;

    /// Select everything, put the cursor at offset 0 and scroll to the top.
    fn select_all(&mut self);

    /// First occurrence of `query` at or after `from`, exact and case-sensitive.
    fn find_literal(&self, query: &str, from: usize) -> Option<usize>;

    fn tag_add(&mut self, tag: &str, range: Range<usize>);
    fn tag_remove(&mut self, tag: &str);
    fn tag_ranges(&self, tag: &str) -> &[Range<usize>];

    fn set_cursor(&mut self, offset: usize);

    /// Scroll so `offset` is visible on the next layout pass.
    fn see(&mut self, offset: usize);
}
