use deepit_value::ValueError;
use thiserror::Error;

/// Result type for clone operations.
pub type CloneResult<T> = Result<T, CloneError>;

/// Errors from a clone call. Any error aborts the whole call; no partial
/// copy is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CloneError {
    #[error("max depth exceeded: reached depth {depth}, limit is {max_depth}")]
    DepthExceeded { depth: usize, max_depth: usize },

    /// A value model operation failed while populating the copy. Passed
    /// through unchanged.
    #[error(transparent)]
    Value(#[from] ValueError),
}

impl CloneError {
    pub fn is_depth_exceeded(&self) -> bool {
        matches!(self, CloneError::DepthExceeded { .. })
    }
}
