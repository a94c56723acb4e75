//! Everything the user can trigger, and the ways to trigger it.
//!
//! Shortcuts ([`Keymap`]), the menu bar ([`menus`]) and the toolbar
//! ([`toolbar`]) all resolve to an [`Action`]; the application executes
//! actions in one place.
//!
//! ```text
//! KeyEvent ─┐
//! menu item ├─→ Action → App::execute
//! toolbar  ─┘
//! ```

mod action;
mod keymap;
mod menu;

pub use action::Action;
pub use keymap::{KeyBinding, Keymap};
pub use menu::{menus, toolbar, Menu, MenuEntry, ToolbarItem};
