//! Result types for a pagination run

use std::time::Duration;

use super::page::QueryLocator;
use crate::record::Record;

/// Everything a pagination run accumulated
#[derive(Debug, Clone, PartialEq)]
pub enum AccumulatedResult {
    /// Count-only query: no records were materialized
    Count(u64),
    /// Zero records matched
    Empty,
    /// Records in result order
    Records {
        records: Vec<Record>,
        /// Total match count reported by the first page
        size: u64,
        /// Locator for the unconsumed remainder, if any
        next_locator: Option<QueryLocator>,
    },
}

impl AccumulatedResult {
    /// Build a record result.
    ///
    /// An empty sequence collapses to `Empty` only when no locator remains;
    /// a run that is still paging keeps its locator even with zero rows.
    pub fn from_records(records: Vec<Record>, size: u64, next_locator: Option<QueryLocator>) -> Self {
        if records.is_empty() && next_locator.is_none() {
            AccumulatedResult::Empty
        } else {
            AccumulatedResult::Records {
                records,
                size,
                next_locator,
            }
        }
    }

    /// Materialized records; empty for count and empty results
    pub fn records(&self) -> &[Record] {
        match self {
            AccumulatedResult::Records { records, .. } => records,
            _ => &[],
        }
    }

    /// Number of materialized records
    pub fn len(&self) -> usize {
        self.records().len()
    }

    /// True when the result is finished and holds no records
    pub fn is_empty(&self) -> bool {
        matches!(self, AccumulatedResult::Empty)
    }

    pub fn count(&self) -> Option<u64> {
        match self {
            AccumulatedResult::Count(n) => Some(*n),
            _ => None,
        }
    }

    /// Total matching records reported by the store
    pub fn total_size(&self) -> u64 {
        match self {
            AccumulatedResult::Count(n) => *n,
            AccumulatedResult::Empty => 0,
            AccumulatedResult::Records { size, .. } => *size,
        }
    }

    pub fn next_locator(&self) -> Option<&QueryLocator> {
        match self {
            AccumulatedResult::Records { next_locator, .. } => next_locator.as_ref(),
            _ => None,
        }
    }
}

/// How a pagination run ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaginationStatus {
    /// Every page was consumed (or the result was a count)
    Complete,
    /// Auto-continue was off and more pages remain behind the locator
    MoreAvailable,
    /// The memory guard stopped the loop; the result is partial
    CapacityExceeded {
        rows_so_far: usize,
        usage_bytes: u64,
        ratio: f64,
    },
}

impl PaginationStatus {
    pub fn is_partial(&self) -> bool {
        !matches!(self, PaginationStatus::Complete)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaginationStatus::Complete => "complete",
            PaginationStatus::MoreAvailable => "more_available",
            PaginationStatus::CapacityExceeded { .. } => "capacity_exceeded",
        }
    }
}

/// Outcome of a pagination run
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationOutcome {
    pub result: AccumulatedResult,
    pub status: PaginationStatus,
    /// Whether the last page seen was marked done
    pub done: bool,
    pub pages_fetched: usize,
    /// Wall-clock time from the first fetch through the last
    pub elapsed: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_empty_records_is_empty() {
        let result = AccumulatedResult::from_records(Vec::new(), 0, None);
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
    }

    #[test]
    fn test_empty_page_with_locator_keeps_locator() {
        let result = AccumulatedResult::from_records(Vec::new(), 10, Some(QueryLocator::new("loc-1")));
        assert!(!result.is_empty());
        assert_eq!(result.len(), 0);
        assert_eq!(result.total_size(), 10);
        assert_eq!(result.next_locator().map(QueryLocator::as_str), Some("loc-1"));
    }

    #[test]
    fn test_count_has_no_records() {
        let result = AccumulatedResult::Count(42);
        assert_eq!(result.count(), Some(42));
        assert_eq!(result.total_size(), 42);
        assert!(result.records().is_empty());
        assert!(!result.is_empty());
    }

    #[test]
    fn test_records_accessors() {
        let result = AccumulatedResult::from_records(
            vec![Record::new(), Record::new()],
            10,
            Some(QueryLocator::new("loc-2")),
        );
        assert_eq!(result.len(), 2);
        assert_eq!(result.total_size(), 10);
        assert_eq!(result.next_locator().map(QueryLocator::as_str), Some("loc-2"));
    }

    #[test]
    fn test_status_partial() {
        assert!(!PaginationStatus::Complete.is_partial());
        assert!(PaginationStatus::MoreAvailable.is_partial());
        assert_eq!(
            PaginationStatus::CapacityExceeded {
                rows_so_far: 1,
                usage_bytes: 2,
                ratio: 0.9
            }
            .as_str(),
            "capacity_exceeded"
        );
    }
}
