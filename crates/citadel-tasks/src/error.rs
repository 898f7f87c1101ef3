//! Error types for test dispatch

use thiserror::Error;

/// Result type alias using DispatchError
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Main error type for dispatch operations
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Selection table errors
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Selection table errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// Key is neither `all` nor present in the table
    #[error("Unknown test selection '{key}' (valid: {})", .valid.join(", "))]
    UnknownSelection { key: String, valid: Vec<String> },

    /// Key registered twice while building a table
    #[error("Duplicate test selection: {0}")]
    DuplicateSelection(String),

    /// Key collides with the `all` selection
    #[error("Reserved test selection name: {0}")]
    ReservedSelection(String),
}
