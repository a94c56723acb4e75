use crate::Action;

/// Drop-down menu on the menu bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub title: &'static str,
    pub entries: Vec<MenuEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Item(Action),
    Separator,
}

impl Menu {
    /// Actions in display order, separators skipped.
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            MenuEntry::Item(action) => Some(*action),
            MenuEntry::Separator => None,
        })
    }
}

/// File, Edit and View menus.
pub fn menus() -> Vec<Menu> {
    use MenuEntry::{Item, Separator};

    vec![
        Menu {
            title: "File",
            entries: vec![
                Item(Action::NewFile),
                Item(Action::OpenFile),
                Item(Action::SaveFile),
                Item(Action::SaveAsFile),
                Separator,
                Item(Action::Exit),
            ],
        },
        Menu {
            title: "Edit",
            entries: vec![
                Item(Action::Undo),
                Item(Action::Redo),
                Separator,
                Item(Action::Cut),
                Item(Action::Copy),
                Item(Action::Paste),
                Separator,
                Item(Action::SelectAll),
                Item(Action::Find),
            ],
        },
        Menu {
            title: "View",
            entries: vec![
                Item(Action::SplitHorizontal),
                Item(Action::SplitVertical),
                Item(Action::CloseSplit),
                Separator,
                Item(Action::NextPanel),
                Item(Action::PreviousPanel),
            ],
        },
    ]
}

/// Toolbar element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarItem {
    Button {
        label: &'static str,
        action: Action,
    },
    Separator,
    /// Shows the current size; clicking opens the size selector.
    FontSize,
}

impl ToolbarItem {
    pub fn action(&self) -> Option<Action> {
        match self {
            ToolbarItem::Button { action, .. } => Some(*action),
            ToolbarItem::FontSize => Some(Action::ChooseFontSize),
            ToolbarItem::Separator => None,
        }
    }
}

pub fn toolbar() -> Vec<ToolbarItem> {
    let button = |label, action| ToolbarItem::Button { label, action };

    vec![
        button("New", Action::NewFile),
        button("Open", Action::OpenFile),
        button("Save", Action::SaveFile),
        ToolbarItem::Separator,
        button("Split H", Action::SplitHorizontal),
        button("Split V", Action::SplitVertical),
        button("Close Split", Action::CloseSplit),
        button("Next Panel", Action::NextPanel),
        button("Prev Panel", Action::PreviousPanel),
        ToolbarItem::Separator,
        ToolbarItem::FontSize,
    ]
}
