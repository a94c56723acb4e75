//! Clipboard access for Simply Note It.
//!
//! Text widgets talk to the clipboard through [`ClipboardProvider`]. The
//! application uses [`SystemClipboard`] (arboard); tests and headless
//! sessions use [`MemoryClipboard`].

use arboard::Clipboard;

#[cfg(target_os = "linux")]
use arboard::{GetExtLinux, LinuxClipboardKind, SetExtLinux};

/// Clipboard capability required by cut/copy/paste.
pub trait ClipboardProvider {
    /// Store text. Empty text is rejected.
    fn set_text(&mut self, text: &str) -> Result<(), String>;

    /// Read text, `None` if the clipboard is empty or inaccessible.
    fn get_text(&mut self) -> Option<String>;
}

/// In-process clipboard.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    content: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardProvider for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        if text.is_empty() {
            return Err("Cannot copy empty text".to_string());
        }
        self.content = Some(text.to_string());
        Ok(())
    }

    fn get_text(&mut self) -> Option<String> {
        self.content.clone()
    }
}

/// System clipboard backed by arboard.
///
/// The arboard handle is opened on first use. If the platform clipboard is
/// unavailable (no display server, for example) the provider keeps working
/// with an in-process buffer so copy/paste between panels still works.
pub struct SystemClipboard {
    clipboard: Option<Clipboard>,
    initialized: bool,
    fallback: MemoryClipboard,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self {
            clipboard: None,
            initialized: false,
            fallback: MemoryClipboard::new(),
        }
    }

    fn handle(&mut self) -> Option<&mut Clipboard> {
        if !self.initialized {
            self.initialized = true;
            self.clipboard = Clipboard::new().ok();
        }
        self.clipboard.as_mut()
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardProvider for SystemClipboard {
    /// On Linux, copies to BOTH CLIPBOARD and PRIMARY selections.
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        self.fallback.set_text(text)?;

        let Some(clipboard) = self.handle() else {
            return Ok(());
        };

        #[cfg(target_os = "linux")]
        {
            clipboard
                .set()
                .clipboard(LinuxClipboardKind::Clipboard)
                .text(text.to_string())
                .map_err(|e| format!("Failed to set clipboard text: {}", e))?;

            // PRIMARY selection (middle-click) is best effort
            let _ = clipboard
                .set()
                .clipboard(LinuxClipboardKind::Primary)
                .text(text.to_string());
        }

        #[cfg(not(target_os = "linux"))]
        clipboard
            .set_text(text)
            .map_err(|e| format!("Failed to set clipboard text: {}", e))?;

        Ok(())
    }

    /// On Linux, tries CLIPBOARD selection first, then PRIMARY.
    fn get_text(&mut self) -> Option<String> {
        if self.handle().is_none() {
            return self.fallback.get_text();
        }
        let clipboard = self.clipboard.as_mut()?;

        #[cfg(target_os = "linux")]
        {
            if let Ok(text) = clipboard
                .get()
                .clipboard(LinuxClipboardKind::Clipboard)
                .text()
            {
                if !text.is_empty() {
                    return Some(text);
                }
            }

            clipboard
                .get()
                .clipboard(LinuxClipboardKind::Primary)
                .text()
                .ok()
                .filter(|t| !t.is_empty())
        }

        #[cfg(not(target_os = "linux"))]
        clipboard.get_text().ok().filter(|t| !t.is_empty())
    }
}
