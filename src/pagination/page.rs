//! Pages returned by the remote store

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::{decode_records, DecodeError, Record};

/// Opaque continuation token identifying where the next page resumes.
///
/// Never parsed or rebuilt locally: stored and replayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryLocator(String);

impl QueryLocator {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QueryLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One bounded response from the remote store
///
/// `records` holds the raw row payloads: an array, or a bare object for
/// single-record results. `None` means the response had no records field.
/// `size` is the total match count and is stable across pages of one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub records: Option<Value>,
    pub done: bool,
    #[serde(default, rename = "queryLocator")]
    pub query_locator: Option<QueryLocator>,
    #[serde(default)]
    pub size: u64,
}

impl Page {
    /// A page with more results behind `locator`
    pub fn partial(records: Value, locator: QueryLocator, size: u64) -> Self {
        Self {
            records: Some(records),
            done: false,
            query_locator: Some(locator),
            size,
        }
    }

    /// The last page of a result
    pub fn last(records: Value, size: u64) -> Self {
        Self {
            records: Some(records),
            done: true,
            query_locator: None,
            size,
        }
    }

    /// A count-only response with no records field
    pub fn count_only(size: u64) -> Self {
        Self {
            records: None,
            done: true,
            query_locator: None,
            size,
        }
    }

    pub fn has_records_field(&self) -> bool {
        self.records.is_some()
    }

    /// Decode the raw row payloads, normalizing a bare object to one record
    pub fn decode_records(&self) -> Result<Vec<Record>, DecodeError> {
        match &self.records {
            Some(raw) => decode_records(raw),
            None => Ok(Vec::new()),
        }
    }
}
