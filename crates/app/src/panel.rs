//! One editing surface: a text buffer and the document it shows.

use std::path::{Path, PathBuf};

use noteit_buffer::{TextBuffer, TextWidget};

use crate::file_io;

/// File binding and modification state of a buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub file_path: Option<PathBuf>,
    pub dirty: bool,
}

impl Document {
    pub fn name(&self) -> String {
        file_io::display_name(self.file_path.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    pub family: String,
    pub size: u16,
}

impl Font {
    pub fn label(&self) -> String {
        format!("{} {}", self.family, self.size)
    }
}

#[derive(Debug)]
pub struct Panel {
    pub buffer: TextBuffer,
    pub document: Document,
    pub font: Font,
    /// Buffer revision at the last load or save.
    clean_revision: u64,
}

impl Panel {
    pub fn new(max_undo: usize, font: Font) -> Self {
        let buffer = TextBuffer::with_undo_limit(max_undo);
        let clean_revision = buffer.revision();
        Self {
            buffer,
            document: Document::default(),
            font,
            clean_revision,
        }
    }

    /// Name with `*` when modified.
    pub fn title(&self) -> String {
        let marker = if self.document.dirty { "*" } else { "" };
        format!("{}{}", self.document.name(), marker)
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.document.file_path.as_deref()
    }

    /// Any change of buffer text since the last load or save makes the
    /// document dirty. Undoing back to the saved text does not clean it.
    pub fn sync_dirty(&mut self) {
        if self.buffer.revision() != self.clean_revision {
            self.document.dirty = true;
            self.clean_revision = self.buffer.revision();
        }
    }

    /// Replace everything with `text` loaded from `path`.
    pub fn load(&mut self, path: Option<PathBuf>, text: &str) {
        self.buffer.set_text(text);
        self.document.file_path = path;
        self.mark_clean();
    }

    pub fn mark_clean(&mut self) {
        self.document.dirty = false;
        self.clean_revision = self.buffer.revision();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> Panel {
        Panel::new(
            50,
            Font {
                family: "Consolas".into(),
                size: 12,
            },
        )
    }

    #[test]
    fn test_new_panel_is_clean_and_untitled() {
        let mut p = panel();
        p.sync_dirty();
        assert!(!p.document.dirty);
        assert_eq!(p.title(), "Untitled");
    }

    #[test]
    fn test_edit_marks_dirty_and_load_cleans() {
        let mut p = panel();
        p.buffer.insert_char('x');
        p.sync_dirty();
        assert!(p.document.dirty);
        assert_eq!(p.title(), "Untitled*");

        p.load(Some(PathBuf::from("/tmp/note.txt")), "hello");
        assert!(!p.document.dirty);
        assert_eq!(p.title(), "note.txt");
        assert_eq!(p.buffer.text(), "hello");
        assert_eq!(p.buffer.cursor(), 0);
    }

    #[test]
    fn test_undo_to_saved_text_stays_dirty() {
        let mut p = panel();
        p.buffer.insert_char('x');
        p.sync_dirty();
        p.mark_clean();

        p.buffer.undo();
        p.sync_dirty();
        assert!(p.document.dirty);
    }

    #[test]
    fn test_font_label() {
        assert_eq!(panel().font.label(), "Consolas 12");
    }
}
