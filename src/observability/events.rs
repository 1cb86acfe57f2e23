//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events emitted while draining and rendering query results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration file loaded and validated
    ConfigLoaded,

    // Pagination
    /// Pagination run begins
    PaginationStart,
    /// One page received from the remote store
    PageFetched,
    /// Pagination run finished (complete, partial or more available)
    PaginationComplete,
    /// Memory guard stopped the fetch loop
    MemoryGuardTripped,
    /// A page fetch failed
    TransportFailed,
    /// A page carried a row that is not a record
    PageMalformed,

    // Views
    /// A nested grid exceeded the nesting limit and was cut off
    NestingTruncated,
    /// Matrix pivot matched no records
    MatrixNoMatch,

    // Export
    /// CSV export refused by configuration
    ExportRefused,
    /// CSV export had nothing to write
    ExportEmpty,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::PaginationStart => "PAGINATION_START",
            Event::PageFetched => "PAGE_FETCHED",
            Event::PaginationComplete => "PAGINATION_COMPLETE",
            Event::MemoryGuardTripped => "MEMORY_GUARD_TRIPPED",
            Event::TransportFailed => "TRANSPORT_FAILED",
            Event::PageMalformed => "PAGE_MALFORMED",

            Event::NestingTruncated => "NESTING_TRUNCATED",
            Event::MatrixNoMatch => "MATRIX_NO_MATCH",

            Event::ExportRefused => "EXPORT_REFUSED",
            Event::ExportEmpty => "EXPORT_EMPTY",
        }
    }

    /// Returns true if this event describes a degraded or failed operation
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Event::MemoryGuardTripped
                | Event::TransportFailed
                | Event::PageMalformed
                | Event::NestingTruncated
                | Event::MatrixNoMatch
                | Event::ExportRefused
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
