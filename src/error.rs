//! Error types for software-mention scanning.
//!
//! Per-item conditions (a malformed identifier, a failed fetch) are
//! recoverable: the batch processor converts them into [`ArticleRecord`]
//! fields and continues with the remaining items. Only a defect in the
//! pattern catalog is fatal, and only at initialization; request-time code
//! never compiles patterns.
//!
//! [`ArticleRecord`]: crate::ArticleRecord

use thiserror::Error;

/// Top-level error type for scan operations.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Identifier(#[from] InvalidIdentifier),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// A raw identifier that could not be normalized into a PMC ID.
///
/// Recoverable: the batch records it on the offending item and continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid PMC identifier: {input:?}")]
pub struct InvalidIdentifier {
    /// The raw input as supplied, surrounding whitespace trimmed.
    pub input: String,
}

impl InvalidIdentifier {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.trim().to_string(),
        }
    }
}

/// Failure to retrieve an article document from the upstream repository.
///
/// Each variant carries the human-readable upstream message. The batch
/// processor truncates it before recording (see
/// [`MAX_ERROR_LEN`](crate::batch::MAX_ERROR_LEN)).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("article not found: {0}")]
    NotFound(String),

    #[error("access restricted: {0}")]
    AccessRestricted(String),

    #[error("request timed out: {0}")]
    TimedOut(String),
}

impl FetchError {
    /// The upstream message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            FetchError::Network(m)
            | FetchError::NotFound(m)
            | FetchError::AccessRestricted(m)
            | FetchError::TimedOut(m) => m,
        }
    }
}

/// A defect in the built-in software pattern catalog.
///
/// Fatal: raised once during catalog compilation, never per request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("pattern for {key} failed to compile: {message}")]
    BadPattern {
        /// Catalog key of the offending entry.
        key: &'static str,
        /// Error reported by the regex engine.
        message: String,
    },

    #[error("duplicate catalog key: {key}")]
    DuplicateKey { key: &'static str },
}
