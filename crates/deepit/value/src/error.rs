use thiserror::Error;

/// Result type for value model operations.
pub type ValueResult<T> = Result<T, ValueError>;

/// Errors from value model operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("invalid regular expression /{pattern}/: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("invalid regular expression flags: {0:?}")]
    InvalidFlags(String),

    #[error("expected {expected} object, got {actual}")]
    WrongKind {
        expected: &'static str,
        actual: String,
    },

    #[error("cannot assign to read-only property {0}")]
    ReadOnly(String),

    #[error("cannot redefine non-configurable property {0}")]
    NonConfigurable(String),

    #[error("object is not extensible; cannot add property {0}")]
    NotExtensible(String),

    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },
}
