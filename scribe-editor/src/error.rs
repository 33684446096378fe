//! Error types for the editor session.

use thiserror::Error;

/// Result type for session operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors that can occur in session operations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The document rejected the operation.
    #[error("document error: {0}")]
    Document(#[from] scribe_types::Error),

    /// A prompt operation was issued while no prompt is open.
    #[error("no description prompt is open")]
    NoPendingEdit,

    /// The configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[source] serde_json::Error),
}
