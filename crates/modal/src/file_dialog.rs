//! Open/save picker: a directory listing, a file name field and a type filter.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};

use noteit_theme::Theme;

use crate::widgets::contains;
use crate::{
    calculate_modal_width, cell_count, centered_rect, render_input_field, render_modal_frame,
    Modal, ModalResult, ModalWidthConfig, TextInput,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub label: &'static str,
    /// `None` matches every file.
    pub extension: Option<&'static str>,
}

impl FileFilter {
    pub fn matches(&self, path: &Path) -> bool {
        match self.extension {
            None => true,
            Some(wanted) => path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted)),
        }
    }
}

pub const FILE_FILTERS: [FileFilter; 3] = [
    FileFilter {
        label: "Text files (*.txt)",
        extension: Some("txt"),
    },
    FileFilter {
        label: "Python files (*.py)",
        extension: Some("py"),
    },
    FileFilter {
        label: "All files (*.*)",
        extension: None,
    },
];

/// Added to names typed without an extension when saving.
const DEFAULT_EXTENSION: &str = "txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileDialogMode {
    Open,
    Save,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    name: String,
    is_dir: bool,
}

#[derive(Debug)]
pub struct FileDialogModal {
    mode: FileDialogMode,
    dir: PathBuf,
    entries: Vec<Entry>,
    filter: usize,
    input: TextInput,
    /// Highlighted list entry; `None` while typing a name.
    highlighted: Option<usize>,
    scroll: usize,
    error: Option<String>,
    last_list_area: Option<Rect>,
}

impl FileDialogModal {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self::new(FileDialogMode::Open, dir.into(), String::new())
    }

    /// Save picker, optionally prefilled with the current file name.
    pub fn save(dir: impl Into<PathBuf>, name: Option<String>) -> Self {
        Self::new(FileDialogMode::Save, dir.into(), name.unwrap_or_default())
    }

    fn new(mode: FileDialogMode, dir: PathBuf, name: String) -> Self {
        let mut dialog = Self {
            mode,
            dir,
            entries: Vec::new(),
            filter: 0,
            input: TextInput::with_text(name),
            highlighted: None,
            scroll: 0,
            error: None,
            last_list_area: None,
        };
        dialog.refresh();
        dialog
    }

    pub fn mode(&self) -> FileDialogMode {
        self.mode
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn filter(&self) -> FileFilter {
        FILE_FILTERS[self.filter]
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn entry_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    fn title(&self) -> &'static str {
        match self.mode {
            FileDialogMode::Open => "Open File",
            FileDialogMode::Save => "Save As",
        }
    }

    /// Re-read the current directory with the active filter.
    fn refresh(&mut self) {
        self.entries.clear();
        self.highlighted = None;
        self.scroll = 0;

        if self.dir.parent().is_some() {
            self.entries.push(Entry {
                name: "..".to_string(),
                is_dir: true,
            });
        }

        let read = match fs::read_dir(&self.dir) {
            Ok(read) => read,
            Err(e) => {
                self.error = Some(format!("Cannot read {}: {e}", self.dir.display()));
                return;
            }
        };

        let filter = self.filter();
        let mut listed: Vec<Entry> = read
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                if name.starts_with('.') {
                    return None;
                }
                let is_dir = entry.path().is_dir();
                (is_dir || filter.matches(&entry.path())).then_some(Entry { name, is_dir })
            })
            .collect();
        listed.sort_by(|a, b| {
            b.is_dir
                .cmp(&a.is_dir)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        self.entries.extend(listed);
    }

    fn cycle_filter(&mut self, forward: bool) {
        let count = FILE_FILTERS.len();
        self.filter = if forward {
            (self.filter + 1) % count
        } else {
            (self.filter + count - 1) % count
        };
        self.refresh();
    }

    fn navigate(&mut self, dir: PathBuf) {
        self.dir = dir.canonicalize().unwrap_or(dir);
        self.input.clear();
        self.error = None;
        self.refresh();
    }

    fn highlight(&mut self, idx: usize) {
        if self.entries.is_empty() {
            return;
        }
        let idx = idx.min(self.entries.len() - 1);
        self.highlighted = Some(idx);

        let entry = &self.entries[idx];
        if entry.is_dir {
            self.input.clear();
        } else {
            self.input.set_text(entry.name.clone());
        }
    }

    fn move_highlight(&mut self, delta: isize) {
        let next = match self.highlighted {
            None if delta > 0 => 0,
            None => self.entries.len().saturating_sub(1),
            Some(current) => (current as isize + delta).max(0) as usize,
        };
        self.highlight(next);
    }

    fn entry_path(&self, entry: &Entry) -> PathBuf {
        if entry.name == ".." {
            self.dir
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.dir.clone())
        } else {
            self.dir.join(&entry.name)
        }
    }

    fn submit(&mut self) -> Option<ModalResult<PathBuf>> {
        if self.input.is_empty() {
            let entry = self.highlighted.and_then(|i| self.entries.get(i))?.clone();
            let path = self.entry_path(&entry);
            if entry.is_dir {
                self.navigate(path);
                return None;
            }
            return self.choose(path);
        }

        let typed = Path::new(self.input.text());
        let path = if typed.is_absolute() {
            typed.to_path_buf()
        } else {
            self.dir.join(typed)
        };
        if path.is_dir() {
            self.navigate(path);
            return None;
        }
        self.choose(path)
    }

    fn choose(&mut self, path: PathBuf) -> Option<ModalResult<PathBuf>> {
        match self.mode {
            FileDialogMode::Open if !path.is_file() => {
                self.error = Some(format!("File not found: {}", path.display()));
                None
            }
            FileDialogMode::Open => Some(ModalResult::Confirmed(path)),
            FileDialogMode::Save => Some(ModalResult::Confirmed(with_default_extension(path))),
        }
    }
}

fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        return path;
    }
    let mut name = path.into_os_string();
    name.push(".");
    name.push(DEFAULT_EXTENSION);
    PathBuf::from(name)
}

impl Modal for FileDialogModal {
    type Result = PathBuf;

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let width = calculate_modal_width(
            [70, cell_count(self.dir.display().to_string().len()).saturating_add(10)].into_iter(),
            area.width,
            ModalWidthConfig { wide: true },
        );
        let height = area.height.saturating_sub(4).clamp(8, 22);
        let modal_area = centered_rect(width, height, area);
        let inner = render_modal_frame(modal_area, buf, theme, self.title());
        if inner.height < 4 {
            return;
        }

        let text_style = Style::default().fg(theme.bg);
        let dim_style = Style::default().fg(theme.disabled);
        let w = inner.width as usize;

        buf.set_stringn(
            inner.x,
            inner.y,
            format!("Look in: {}", self.dir.display()),
            w,
            text_style.add_modifier(Modifier::BOLD),
        );

        let list_area = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 3);
        let visible = list_area.height as usize;
        if let Some(h) = self.highlighted {
            if h < self.scroll {
                self.scroll = h;
            } else if h >= self.scroll + visible {
                self.scroll = h + 1 - visible;
            }
        }
        for (row, (idx, entry)) in self
            .entries
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(visible)
            .enumerate()
        {
            let y = list_area.y + row as u16;
            let label = if entry.is_dir {
                format!("  {}/", entry.name)
            } else {
                format!("  {}", entry.name)
            };
            let style = if self.highlighted == Some(idx) {
                Style::default()
                    .fg(theme.fg)
                    .bg(theme.accented_fg)
                    .add_modifier(Modifier::BOLD)
            } else if entry.is_dir {
                text_style.add_modifier(Modifier::BOLD)
            } else {
                text_style
            };
            buf.set_style(Rect::new(list_area.x, y, list_area.width, 1), style);
            buf.set_stringn(list_area.x, y, label, w, style);
        }
        self.last_list_area = Some(list_area);

        let name_y = inner.bottom() - 2;
        let label = "File name: ";
        buf.set_string(inner.x, name_y, label, text_style);
        let input_x = inner.x + label.len() as u16;
        render_input_field(
            buf,
            Rect::new(input_x, name_y, inner.right().saturating_sub(input_x), 1),
            self.input.text(),
            self.input.cursor_pos(),
            true,
            theme,
        );

        let status_y = inner.bottom() - 1;
        match &self.error {
            Some(error) => {
                buf.set_stringn(inner.x, status_y, error, w, Style::default().fg(theme.error));
            }
            None => {
                buf.set_stringn(
                    inner.x,
                    status_y,
                    format!("Type: {}   Tab: change type", self.filter().label),
                    w,
                    dim_style,
                );
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<ModalResult<PathBuf>>> {
        match key.code {
            KeyCode::Esc => return Ok(Some(ModalResult::Cancelled)),
            KeyCode::Enter => return Ok(self.submit()),
            KeyCode::Tab => self.cycle_filter(true),
            KeyCode::BackTab => self.cycle_filter(false),
            KeyCode::Up => self.move_highlight(-1),
            KeyCode::Down => self.move_highlight(1),
            KeyCode::PageUp => self.move_highlight(-10),
            KeyCode::PageDown => self.move_highlight(10),
            _ => {
                if self.input.handle_key(&key) {
                    self.highlighted = None;
                    self.error = None;
                }
            }
        }
        Ok(None)
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<Option<ModalResult<PathBuf>>> {
        let Some(list) = self.last_list_area else {
            return Ok(None);
        };
        match mouse.kind {
            MouseEventKind::ScrollUp => self.move_highlight(-1),
            MouseEventKind::ScrollDown => self.move_highlight(1),
            MouseEventKind::Down(MouseButton::Left) if contains(list, mouse.column, mouse.row) => {
                let idx = self.scroll + (mouse.row - list.y) as usize;
                if idx < self.entries.len() {
                    // second click on the same entry opens it
                    if self.highlighted == Some(idx) {
                        let entry = self.entries[idx].clone();
                        let path = self.entry_path(&entry);
                        if entry.is_dir {
                            self.navigate(path);
                            return Ok(None);
                        }
                        return Ok(self.choose(path));
                    }
                    self.highlight(idx);
                }
            }
            _ => {}
        }
        Ok(None)
    }
}
