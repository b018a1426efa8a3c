use thiserror::Error;

/// Engine-level failures. All of them are recoverable: the surface reports
/// the message and the running session stays alive.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("solution must be 81 characters, got {len}")]
    MalformedSolution { len: usize },

    #[error("invalid digit {ch:?} at cell {cell}")]
    BadDigit { cell: usize, ch: char },

    #[error("catalogue has no entries")]
    EmptyCatalogue,

    #[error("no cell selected")]
    NoSelection,
}
