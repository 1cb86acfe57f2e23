//! Tabular view: records flattened into a numbered row/column grid
//!
//! A child result group in a cell renders as a nested grid built by the same
//! builder, numbered from 1. Several child groups in one field each get their
//! own nested grid so sibling groups never merge.

use crate::config::PagerConfig;
use crate::observability::{log_event_with_fields, Event};
use crate::record::{FieldValue, HeaderSet, Record, RecordSet};

/// One resolved cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// The record has no such field, or the field is null
    Empty,
    /// Textual form of a scalar, unescaped
    Text(String),
    /// One nested grid per child result group
    Nested(Vec<TabularGrid>),
    /// Child results deeper than the nesting limit, summarized
    Truncated(String),
}

impl Cell {
    /// Plain text of the cell; nested grids have none
    pub fn text(&self) -> Option<&str> {
        match self {
            Cell::Empty => Some(""),
            Cell::Text(text) | Cell::Truncated(text) => Some(text),
            Cell::Nested(_) => None,
        }
    }

    pub fn nested(&self) -> Option<&[TabularGrid]> {
        match self {
            Cell::Nested(grids) => Some(grids),
            _ => None,
        }
    }
}

/// One body row: its row number and one cell per header
#[derive(Debug, Clone, PartialEq)]
pub struct TabularRow {
    pub number: usize,
    pub cells: Vec<Cell>,
}

/// Header row plus body rows
///
/// The row-number column is implicit and never part of `headers`.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularGrid {
    headers: HeaderSet,
    rows: Vec<TabularRow>,
}

impl TabularGrid {
    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    pub fn rows(&self) -> &[TabularRow] {
        &self.rows
    }

    /// Cell at `row` (0-based body index) for the named column
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let index = self.headers.iter().position(|name| name == column)?;
        self.rows.get(row).and_then(|r| r.cells.get(index))
    }

    /// Number of body rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builds tabular grids from records
#[derive(Debug, Clone, Copy)]
pub struct TabularViewBuilder {
    max_depth: usize,
}

impl TabularViewBuilder {
    /// `max_depth` counts grids: 1 renders no nested grids at all
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.max(1),
        }
    }

    pub fn from_config(config: &PagerConfig) -> Self {
        Self::new(config.max_nesting_depth)
    }

    /// Build a grid numbering rows from `start_row`
    pub fn build(&self, records: &[Record], start_row: usize) -> TabularGrid {
        self.build_at(records, start_row, 1)
    }

    fn build_at(&self, records: &[Record], start_row: usize, depth: usize) -> TabularGrid {
        let headers = HeaderSet::from_records(records);

        let rows = records
            .iter()
            .enumerate()
            .map(|(offset, record)| TabularRow {
                number: start_row + offset,
                cells: headers
                    .iter()
                    .map(|name| self.resolve_cell(record, name, depth))
                    .collect(),
            })
            .collect();

        TabularGrid { headers, rows }
    }

    fn resolve_cell(&self, record: &Record, name: &str, depth: usize) -> Cell {
        let Some(value) = record.get(name) else {
            return Cell::Empty;
        };

        match value {
            FieldValue::Null => Cell::Empty,
            FieldValue::Children(groups) => {
                if depth >= self.max_depth {
                    log_event_with_fields(
                        Event::NestingTruncated,
                        &[("field", name), ("depth", &depth.to_string())],
                    );
                    return Cell::Truncated(value.summary_text());
                }
                Cell::Nested(
                    groups
                        .iter()
                        .map(|group: &RecordSet| self.build_at(group.records(), 1, depth + 1))
                        .collect(),
                )
            }
            scalar => Cell::Text(scalar.scalar_text().unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: Vec<(&str, FieldValue)>) -> Record {
        fields.into_iter().collect()
    }

    fn child_group(names: &[&str]) -> RecordSet {
        RecordSet::from(
            names
                .iter()
                .map(|n| record(vec![("Name", FieldValue::from(*n))]))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_rows_numbered_from_start() {
        let records = vec![
            record(vec![("a", FieldValue::from(1i64))]),
            record(vec![("a", FieldValue::from(2i64))]),
        ];
        let grid = TabularViewBuilder::new(8).build(&records, 5);

        let numbers: Vec<usize> = grid.rows().iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![5, 6]);
    }

    #[test]
    fn test_missing_field_renders_empty() {
        let records = vec![
            record(vec![("a", FieldValue::from(1i64)), ("b", FieldValue::from(2i64))]),
            record(vec![("b", FieldValue::from(3i64)), ("c", FieldValue::from(4i64))]),
        ];
        let grid = TabularViewBuilder::new(8).build(&records, 1);

        assert_eq!(grid.headers().as_slice(), &["a", "b", "c"]);
        assert_eq!(grid.cell(1, "a"), Some(&Cell::Empty));
        assert_eq!(grid.cell(0, "c"), Some(&Cell::Empty));
        assert_eq!(grid.cell(1, "c"), Some(&Cell::Text("4".to_string())));
    }

    #[test]
    fn test_each_child_group_gets_own_grid() {
        let records = vec![record(vec![(
            "Related",
            FieldValue::Children(vec![child_group(&["x"]), child_group(&["y", "z"])]),
        )])];
        let grid = TabularViewBuilder::new(8).build(&records, 1);

        let nested = grid.cell(0, "Related").and_then(Cell::nested).unwrap();
        assert_eq!(nested.len(), 2);
        assert_eq!(nested[0].len(), 1);
        assert_eq!(nested[1].len(), 2);
        assert_eq!(nested[1].rows()[1].number, 2);
    }

    #[test]
    fn test_depth_limit_truncates() {
        let grandchild = child_group(&["g"]);
        let child = RecordSet::from(vec![record(vec![("Kids", FieldValue::children(grandchild))])]);
        let records = vec![record(vec![("Contacts", FieldValue::children(child))])];

        let grid = TabularViewBuilder::new(2).build(&records, 1);
        let nested = grid.cell(0, "Contacts").and_then(Cell::nested).unwrap();
        assert_eq!(
            nested[0].cell(0, "Kids"),
            Some(&Cell::Truncated("[1 row]".to_string()))
        );

        let flat = TabularViewBuilder::new(1).build(&records, 1);
        assert!(matches!(flat.cell(0, "Contacts"), Some(Cell::Truncated(_))));
    }
}
