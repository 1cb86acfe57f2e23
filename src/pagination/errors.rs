//! Pagination error types
//!
//! Capacity, empty results and unmatched pivots are statuses, not errors.
//! Both hard failures carry the records accumulated before them so callers
//! can salvage them.

use thiserror::Error;

use super::result::AccumulatedResult;
use crate::record::DecodeError;

/// Result type for pagination operations
pub type PaginationResult<T> = Result<T, PaginationError>;

/// A page fetch failed in the transport or the remote store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("page fetch failed: {message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The store reported more pages but gave no locator to reach them
    pub fn missing_locator() -> Self {
        Self::new("page is not done but carries no query locator")
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Pagination errors
#[derive(Debug, Error)]
pub enum PaginationError {
    /// A page fetch failed; `partial` holds what was accumulated before it
    #[error("{source} ({} rows accumulated before failure)", .partial.len())]
    Transport {
        #[source]
        source: TransportError,
        partial: AccumulatedResult,
    },

    /// A page carried a row payload that is not a record; `partial` holds the
    /// earlier pages and the locator that fetched the malformed one
    #[error("malformed page: {source} ({} rows accumulated before failure)", .partial.len())]
    Malformed {
        #[source]
        source: DecodeError,
        partial: AccumulatedResult,
    },
}

impl PaginationError {
    /// Records accumulated before the failure
    pub fn partial(&self) -> &AccumulatedResult {
        match self {
            PaginationError::Transport { partial, .. } | PaginationError::Malformed { partial, .. } => partial,
        }
    }

    pub fn into_partial(self) -> AccumulatedResult {
        match self {
            PaginationError::Transport { partial, .. } | PaginationError::Malformed { partial, .. } => partial,
        }
    }
}
