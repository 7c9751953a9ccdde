//! Error types for the quote machine core
//!
//! Nothing here is fatal: every error is surfaced to the caller and the
//! machine stays usable afterwards.

use thiserror::Error;

/// Errors from the remote quote endpoint
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuoteError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed quote response: {0}")]
    MalformedResponse(String),
}

/// A favorites mutation could not be written to storage.
///
/// The in-memory list still holds the mutation when this is returned.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to write '{key}' to storage: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid color '{0}': expected #rgb or #rrggbb")]
pub struct ParseColorError(pub String);

/// Errors surfaced by state machine transitions
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Quote(#[from] QuoteError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
