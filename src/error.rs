//! Error types for rs-readability.
//!
//! This module defines the error types returned by extraction operations.
//! A pass that finds too little text is not an error; only the outcomes
//! below reach the caller.

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document has no `<body>`, or every extraction pass came back empty.
    #[error("No extractable content found")]
    NoContent,

    /// The document has more elements than `Options::max_elems_to_parse`.
    #[error("Document too complex: {count} elements exceeds limit of {limit}")]
    TooComplex { count: usize, limit: usize },

    /// `Options::url` is not a valid absolute URL.
    #[error("Invalid document URL: {0}")]
    InvalidUrl(String),

    /// Character encoding detection or conversion failed.
    #[error("Encoding detection failed: {0}")]
    EncodingError(String),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
