use thiserror::Error;

/// Errors produced by type operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid path: {0:?}")]
    InvalidPath(String),

    #[error("cannot descend into {segment:?} at {path:?}: not a container")]
    PathConflict { path: String, segment: String },
}
