//! Panel bookkeeping and split arrangement.
//!
//! [`PanelRegistry`] holds between one and [`MAX_PANELS`] panels and tracks
//! which one has focus. [`arrange`] turns a panel count into screen regions.

mod arrange;
mod error;
mod registry;

pub use arrange::{arrange, region_at};
pub use error::LayoutError;
pub use registry::PanelRegistry;

/// Upper bound on simultaneously open panels.
pub const MAX_PANELS: usize = 4;
