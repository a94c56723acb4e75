//! Whole-file reads and writes.
//!
//! Content goes to disk exactly as held by the buffer: no line-ending
//! conversion, no trailing newline, no temporary file.

use std::fs;
use std::path::Path;

use crate::AppError;

/// Read a UTF-8 text file.
pub fn open(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Truncate `path` and write `content`.
pub fn save(path: &Path, content: &str) -> Result<(), AppError> {
    fs::write(path, content).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Last path component, or `Untitled`.
pub fn display_name(path: Option<&Path>) -> String {
    path.and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Untitled".to_string())
}
