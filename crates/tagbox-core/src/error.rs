use tagbox_diff::DiffError;
use tagbox_types::TypeError;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BoxError {
    #[error("invalid path: {0:?}")]
    InvalidPath(String),

    #[error("cannot descend into {segment:?} at {path:?}: not a container")]
    PathConflict { path: String, segment: String },

    #[error("diff error: {0}")]
    Diff(#[from] DiffError),

    #[error("operation not supported: {0}")]
    Unsupported(&'static str),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<TypeError> for BoxError {
    fn from(e: TypeError) -> Self {
        match e {
            TypeError::InvalidPath(p) => BoxError::InvalidPath(p),
            TypeError::PathConflict { path, segment } => BoxError::PathConflict { path, segment },
        }
    }
}

impl From<serde_json::Error> for BoxError {
    fn from(e: serde_json::Error) -> Self {
        BoxError::Serialization(e.to_string())
    }
}

pub type BoxResult<T> = Result<T, BoxError>;
