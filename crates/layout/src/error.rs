use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors from adding or removing panels.
pub enum LayoutError {
    #[error("Maximum of {max} panels allowed")]
    /// The registry is already full.
    CapacityExceeded { max: usize },

    #[error("No split to close")]
    /// Only the primary panel is left.
    NothingToClose,

    #[error("invalid panel index {0}")]
    /// Index is out of range or refers to the permanent first panel.
    InvalidIndex(usize),
}
