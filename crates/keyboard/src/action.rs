/// User-level command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // File
    NewFile,
    OpenFile,
    SaveFile,
    SaveAsFile,
    Exit,

    // Edit
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,
    Find,

    // View
    SplitHorizontal,
    SplitVertical,
    CloseSplit,
    NextPanel,
    PreviousPanel,

    /// Opens the font size selector.
    ChooseFontSize,
    /// Apply a font size (points) to every panel.
    ChangeFontSize(u16),
}

impl Action {
    /// Menu label.
    pub fn label(&self) -> &'static str {
        match self {
            Action::NewFile => "New",
            Action::OpenFile => "Open",
            Action::SaveFile => "Save",
            Action::SaveAsFile => "Save As",
            Action::Exit => "Exit",
            Action::Undo => "Undo",
            Action::Redo => "Redo",
            Action::Cut => "Cut",
            Action::Copy => "Copy",
            Action::Paste => "Paste",
            Action::SelectAll => "Select All",
            Action::Find => "Find",
            Action::SplitHorizontal => "Split Horizontal",
            Action::SplitVertical => "Split Vertical",
            Action::CloseSplit => "Close Split",
            Action::NextPanel => "Next Panel",
            Action::PreviousPanel => "Previous Panel",
            Action::ChooseFontSize => "Font Size",
            Action::ChangeFontSize(_) => "Font Size",
        }
    }
}
