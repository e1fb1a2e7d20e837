//! Error types for declension-core.

use thiserror::Error;

/// Result type alias using SessionError.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Rejected input supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("at least one case must be selected")]
    EmptyCases,

    #[error("at least one number must be selected")]
    EmptyNumbers,

    #[error("batch size must be at least 1")]
    ZeroBatchSize,

    #[error("unknown case label: {0}")]
    UnknownCase(String),

    #[error("unknown number label: {0}")]
    UnknownNumber(String),
}

/// A fetched record that cannot be turned into a question.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedRecordError {
    #[error("missing field {0}")]
    MissingField(&'static str),

    #[error("unknown gender code: {0}")]
    UnknownGender(String),

    #[error("unknown target case: {0}")]
    UnknownCase(String),

    #[error("unknown target number: {0}")]
    UnknownNumber(String),
}

/// Failures at the question source boundary.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Backend error: {status} - {message}")]
    Backend { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Malformed record at index {index}: {source}")]
    Malformed {
        index: usize,
        #[source]
        source: MalformedRecordError,
    },

    #[error("question source returned no questions")]
    Empty,
}

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("no question left to answer")]
    Exhausted,
}
