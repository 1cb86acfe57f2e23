//! Header union across heterogeneous records

use std::collections::HashSet;

use super::record::Record;

/// Ordered set of names: insertion order, first seen wins, duplicates dropped
///
/// Computed once per rendered view from the full record sequence so every
/// row renders the same columns even when records carry different fields.
/// The matrix view uses the same discipline for its row and column labels.
#[derive(Debug, Clone, Default)]
pub struct HeaderSet {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union of every field name across `records`, in first-seen order
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut headers = Self::new();
        for record in records {
            for name in record.field_names() {
                headers.insert(name);
            }
        }
        headers
    }

    /// Insert a name; returns false if it was already present
    pub fn insert(&mut self, name: &str) -> bool {
        if self.seen.contains(name) {
            return false;
        }
        self.seen.insert(name.to_string());
        self.names.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn into_vec(self) -> Vec<String> {
        self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl PartialEq for HeaderSet {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
    }
}

impl Eq for HeaderSet {}
