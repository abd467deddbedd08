//! Top-level error type for the huffpack library
//!

/// Errors
#[derive(Debug, thiserror::Error)]
pub enum HuffError {
    /// The source or destination could not be opened, read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The compressed container failed structural parsing or decoding.
    #[error("corrupt container: {0}")]
    CorruptContainer(String),
    /// The input cannot be compressed (or the requested operation is invalid).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl HuffError {
    /// Shorthand used by the container parser when the data runs out early.
    pub(crate) fn truncated(what: &str) -> Self {
        HuffError::CorruptContainer(format!("unexpected end of data while reading {}", what))
    }
}
