//! Error types for the diff crate.

use tagbox_types::TypeError;

/// Errors that can occur while replaying change records.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// An array-change record pointed at something that is not an array.
    #[error("expected an array at {path:?}")]
    NotAnArray { path: String },

    /// An array element would land too far past the end of its array.
    #[error("index {index} is out of range for the array at {path:?}")]
    IndexOutOfRange { path: String, index: usize },

    /// The target could not be written at the record's path.
    #[error("cannot apply change: {0}")]
    Access(#[from] TypeError),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
