//! Simply Note It application: panels, dialogs, commands and the event loop.

mod app;
mod error;
pub mod event;
pub mod file_io;
mod panel;
mod state;

pub use app::App;
pub use error::AppError;
pub use panel::{Document, Font, Panel};
pub use state::{AppState, Continuation, MenuState, PendingAction, READY};
