//! Error types for phish-features.
//!
//! Only document-level failures surface here. Individual features that cannot
//! be computed fall back to their documented defaults instead.

/// Error type for extraction and dataset operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input is not a markup stream at all (e.g. binary content).
    ///
    /// Malformed but textual HTML is never reported as a parse error.
    #[error("HTML parsing failed: {0}")]
    ParseError(String),

    /// The HTML source could not provide content for a URL.
    #[error("Fetching {url} failed: {reason}")]
    Fetch {
        /// URL that was requested.
        url: String,
        /// Human-readable failure description.
        reason: String,
    },

    /// The HTTP client could not be configured.
    #[error("HTTP client setup failed: {0}")]
    HttpClient(String),

    /// A record or dataset does not match the fixed feature schema.
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// The classifier rejected the feature vector.
    #[error("Classification failed: {0}")]
    Classifier(String),

    /// Dataset file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset file is not valid delimited text.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
