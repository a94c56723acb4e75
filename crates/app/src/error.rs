use std::path::PathBuf;

use noteit_layout::LayoutError;
use thiserror::Error;

/// Failures surfaced to the user as dialogs.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Layout(#[from] LayoutError),
}
