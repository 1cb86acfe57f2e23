//! Export error types

use std::io;

use thiserror::Error;

use crate::pagination::TransportError;
use crate::record::DecodeError;

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// CSV export errors
#[derive(Debug, Error)]
pub enum ExportError {
    /// Export is switched off by configuration; nothing was written
    #[error("Export to CSV not allowed")]
    Disabled,

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV write failed: {0}")]
    Io(#[from] io::Error),

    /// Child results could not be serialized into a cell
    #[error("cell serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// A page fetch failed while streaming
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A streamed page carried a row payload that is not a record
    #[error("malformed page: {0}")]
    Malformed(#[from] DecodeError),
}

impl ExportError {
    /// True when the export was refused before any output
    pub fn is_refusal(&self) -> bool {
        matches!(self, ExportError::Disabled)
    }
}
