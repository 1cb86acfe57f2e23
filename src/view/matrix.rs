//! Matrix view: a sparse pivot keyed by two field values
//!
//! Each record lands in the cell (row value, column value) as an entry
//! summarizing its other fields. Entries sharing a cell stack in record
//! order. Labels keep first-seen order.

use std::collections::HashMap;

use crate::observability::{log_event_with_fields, Event};
use crate::pagination::MatrixPivot;
use crate::record::{FieldValue, HeaderSet, Record};

/// Summary of one record's non-pivot fields, as `(name, value)` pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixEntry {
    fields: Vec<(String, String)>,
}

impl MatrixEntry {
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Each field rendered as `name: value`
    pub fn lines(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect()
    }
}

/// A built pivot matrix
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixView {
    column_labels: HeaderSet,
    row_labels: HeaderSet,
    cells: HashMap<(String, String), Vec<MatrixEntry>>,
}

impl MatrixView {
    pub fn column_labels(&self) -> &HeaderSet {
        &self.column_labels
    }

    pub fn row_labels(&self) -> &HeaderSet {
        &self.row_labels
    }

    /// Entries stacked in the cell at (`row`, `column`); empty when none
    pub fn cell(&self, row: &str, column: &str) -> &[MatrixEntry] {
        self.cells
            .get(&(row.to_string(), column.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Result of a matrix build
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixOutcome {
    Matrix(MatrixView),
    /// No record carried both pivot fields
    NoMatch,
}

/// Buckets records into a pivot matrix
pub struct MatrixViewBuilder;

impl MatrixViewBuilder {
    pub fn build(records: &[Record], pivot: &MatrixPivot) -> MatrixOutcome {
        let mut column_labels = HeaderSet::new();
        let mut row_labels = HeaderSet::new();
        let mut cells: HashMap<(String, String), Vec<MatrixEntry>> = HashMap::new();

        for record in records {
            let (Some(row), Some(column)) = (
                Self::pivot_value(record, &pivot.row_field),
                Self::pivot_value(record, &pivot.column_field),
            ) else {
                continue;
            };

            let entry = MatrixEntry {
                fields: record
                    .fields()
                    .filter(|(name, _)| *name != pivot.column_field && *name != pivot.row_field)
                    .map(|(name, value)| (name.to_string(), value.summary_text()))
                    .collect(),
            };

            row_labels.insert(&row);
            column_labels.insert(&column);
            cells.entry((row, column)).or_default().push(entry);
        }

        if row_labels.is_empty() || column_labels.is_empty() {
            log_event_with_fields(
                Event::MatrixNoMatch,
                &[
                    ("column_field", &pivot.column_field),
                    ("row_field", &pivot.row_field),
                ],
            );
            return MatrixOutcome::NoMatch;
        }

        MatrixOutcome::Matrix(MatrixView {
            column_labels,
            row_labels,
            cells,
        })
    }

    /// Stringified pivot value; null, empty text and child results count as absent
    fn pivot_value(record: &Record, field: &str) -> Option<String> {
        match record.get(field)? {
            FieldValue::Null | FieldValue::Children(_) => None,
            scalar => scalar.scalar_text().filter(|text| !text.is_empty()),
        }
    }
}
