//! Error types for the document model.
//!
//! Uses [`thiserror`] for error derivation. Most model operations degrade to
//! documented defaults instead of failing; [`DocError`] is reserved for
//! out-of-range indices, mutations that would desynchronise text and letters,
//! unknown visual elements and snapshot I/O.

use thiserror::Error;

/// Error type for document model operations.
#[derive(Debug, Error)]
pub enum DocError {
    /// An index or byte offset points past the end of a container.
    #[error("{what} index {index} out of range (len {len})")]
    OutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// The requested mutation would leave the model inconsistent.
    #[error("inconsistent state: {0}")]
    InconsistentState(String),

    /// Orientation value outside `0..=3`.
    #[error("invalid orientation: {0}")]
    InvalidOrientation(i64),

    /// A named visual element does not exist on the page.
    #[error("no such element: {0}")]
    NoSuchElement(String),

    /// A snapshot has an unusable top-level shape.
    #[error("snapshot format error: {0}")]
    Format(String),

    /// Malformed JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error reading or writing a snapshot.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DocError>;

impl DocError {
    pub(crate) fn out_of_range(what: &'static str, index: usize, len: usize) -> Self {
        DocError::OutOfRange { what, index, len }
    }

    pub(crate) fn inconsistent(msg: impl Into<String>) -> Self {
        DocError::InconsistentState(msg.into())
    }
}
