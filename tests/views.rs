//! View Builder Tests
//!
//! Tests for tabular and matrix views over decoded records:
//! - Header union keeps first-seen order
//! - Nested child results render as their own numbered grids
//! - Matrix buckets stack entries and report empty selections

use resultpager::config::PagerConfig;
use resultpager::pagination::{AccumulatedResult, MatrixPivot, QueryRequest};
use resultpager::record::{decode_records, HeaderSet, Record};
use resultpager::view::{
    render_view, Cell, MatrixOutcome, MatrixViewBuilder, RenderedView, TabularViewBuilder, ViewKind,
};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn records(raw: Value) -> Vec<Record> {
    decode_records(&raw).unwrap()
}

fn text(cell: Option<&Cell>) -> Option<&str> {
    cell.and_then(Cell::text)
}

fn labels(set: &HeaderSet) -> Vec<&str> {
    set.iter().collect()
}

// =============================================================================
// Header Union Tests
// =============================================================================

/// `[{a,b}, {b,c}]` yields headers `[a, b, c]`.
#[test]
fn test_header_union_first_seen_order() {
    let records = records(json!([{"a": 1, "b": 2}, {"b": 3, "c": 4}]));
    let headers = HeaderSet::from_records(&records);
    assert_eq!(labels(&headers), vec!["a", "b", "c"]);
}

/// Rows missing a header column render an empty cell.
#[test]
fn test_missing_field_is_empty_cell() {
    let records = records(json!([{"a": 1, "b": 2}, {"b": 3, "c": 4}]));
    let grid = TabularViewBuilder::new(8).build(&records, 1);

    assert_eq!(grid.len(), 2);
    assert_eq!(text(grid.cell(0, "c")), Some(""));
    assert_eq!(text(grid.cell(1, "a")), Some(""));
    assert_eq!(text(grid.cell(1, "c")), Some("4"));
}

/// Rows are numbered from the requested start.
#[test]
fn test_rows_numbered_from_start() {
    let records = records(json!([{"a": 1}, {"a": 2}, {"a": 3}]));
    let grid = TabularViewBuilder::new(8).build(&records, 201);

    let numbers: Vec<usize> = grid.rows().iter().map(|r| r.number).collect();
    assert_eq!(numbers, vec![201, 202, 203]);
}

// =============================================================================
// Nested Result Tests
// =============================================================================

fn account_with_contacts() -> Vec<Record> {
    records(json!([
        {"Name": "Initech"},
        {
            "Name": "Acme",
            "Contacts": {
                "totalSize": 2,
                "done": true,
                "records": [
                    {"LastName": "Smith"},
                    {"LastName": "Jones", "Email": "j@acme.test"}
                ]
            }
        }
    ]))
}

/// Two child rows render a nested grid of two rows numbered from 1.
#[test]
fn test_nested_grid_numbered_independently() {
    let grid = TabularViewBuilder::new(8).build(&account_with_contacts(), 5);

    assert_eq!(grid.rows()[1].number, 6);
    let nested = grid.cell(1, "Contacts").and_then(Cell::nested).unwrap();
    assert_eq!(nested.len(), 1);

    let child = &nested[0];
    assert_eq!(child.len(), 2);
    let numbers: Vec<usize> = child.rows().iter().map(|r| r.number).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(labels(child.headers()), vec!["LastName", "Email"]);
    assert_eq!(text(child.cell(1, "Email")), Some("j@acme.test"));
}

/// Past the nesting limit a child result becomes a summary cell.
#[test]
fn test_nesting_limit_truncates() {
    let grid = TabularViewBuilder::new(1).build(&account_with_contacts(), 1);

    assert_eq!(
        grid.cell(1, "Contacts"),
        Some(&Cell::Truncated("[2 rows]".to_string()))
    );
}

/// Related parent records flatten into dotted columns.
#[test]
fn test_parent_record_flattened() {
    let records = records(json!([
        {"Name": "Bob", "Account": {"Name": "Acme", "Industry": "Retail"}}
    ]));
    let grid = TabularViewBuilder::new(8).build(&records, 1);

    assert_eq!(
        labels(grid.headers()),
        vec!["Name", "Account.Name", "Account.Industry"]
    );
    assert_eq!(text(grid.cell(0, "Account.Name")), Some("Acme"));
}

// =============================================================================
// Matrix Tests
// =============================================================================

fn pivot_records() -> Vec<Record> {
    records(json!([
        {"r": "X", "c": "Y", "v": 1},
        {"r": "X", "c": "Y", "v": 2},
        {"r": "Z", "c": "Y", "v": 3}
    ]))
}

/// Entries sharing a cell stack in record order.
#[test]
fn test_matrix_pivot_aggregation() {
    let MatrixOutcome::Matrix(view) = MatrixViewBuilder::build(&pivot_records(), &MatrixPivot::new("c", "r")) else {
        panic!("expected a matrix");
    };

    assert_eq!(labels(view.row_labels()), vec!["X", "Z"]);
    assert_eq!(labels(view.column_labels()), vec!["Y"]);

    let stacked = view.cell("X", "Y");
    assert_eq!(stacked.len(), 2);
    assert_eq!(stacked[0].lines(), vec!["v: 1"]);
    assert_eq!(stacked[1].lines(), vec!["v: 2"]);
    assert_eq!(view.cell("Z", "Y").len(), 1);
    assert!(view.cell("Z", "nope").is_empty());
}

/// Records lacking either pivot field are skipped.
#[test]
fn test_matrix_skips_partial_pivots() {
    let records = records(json!([
        {"r": "X", "c": "Y", "v": 1},
        {"r": "X", "v": 2},
        {"c": "Y", "v": 3},
        {"r": null, "c": "Y", "v": 4}
    ]));
    let MatrixOutcome::Matrix(view) = MatrixViewBuilder::build(&records, &MatrixPivot::new("c", "r")) else {
        panic!("expected a matrix");
    };

    assert_eq!(view.cell("X", "Y").len(), 1);
    assert_eq!(labels(view.row_labels()), vec!["X"]);
}

/// No record matching both pivots is reported, not rendered empty.
#[test]
fn test_empty_matrix_selection() {
    let records = records(json!([{"r": "X", "v": 1}, {"c": "Y", "v": 2}]));
    let outcome = MatrixViewBuilder::build(&records, &MatrixPivot::new("c", "r"));
    assert_eq!(outcome, MatrixOutcome::NoMatch);

    let request = QueryRequest::new("SELECT r, c, v FROM T").with_matrix("c", "r");
    let result = AccumulatedResult::from_records(records, 2, None);
    let view = render_view(
        &result,
        ViewKind::for_request(&request),
        request.pivot(),
        &PagerConfig::default(),
    );
    assert_eq!(
        view,
        RenderedView::NoMatrixMatch("No records match matrix column and row selections.".to_string())
    );
}

/// Empty pivot values exclude a record just like missing ones.
#[test]
fn test_empty_pivot_values_excluded() {
    let records = records(json!([
        {"c": "", "r": "", "v": "1"},
        {"c": "Y", "r": "", "v": "2"},
        {"c": "Y", "r": "X", "v": "3"}
    ]));
    let MatrixOutcome::Matrix(view) = MatrixViewBuilder::build(&records, &MatrixPivot::new("c", "r")) else {
        panic!("expected a matrix");
    };

    assert_eq!(labels(view.row_labels()), vec!["X"]);
    assert_eq!(labels(view.column_labels()), vec!["Y"]);
    assert!(view.cell("", "Y").is_empty());

    let only_empty = &records[..1];
    assert_eq!(
        MatrixViewBuilder::build(only_empty, &MatrixPivot::new("c", "r")),
        MatrixOutcome::NoMatch
    );
}

// =============================================================================
// Rendering Tests
// =============================================================================

/// A record result renders as a table with escaped markup.
#[test]
fn test_render_table_html() {
    let result = AccumulatedResult::from_records(account_with_contacts(), 2, None);
    let view = render_view(&result, ViewKind::Tabular, None, &PagerConfig::default());

    let html = view.to_html();
    assert!(html.starts_with("<table id='query_results' class='data_table'>"));
    assert!(html.contains("<th>Contacts</th>"));
    assert!(html.contains("<div class='child_group'>"));
    assert!(html.contains("<td>j@acme.test</td>"));
}

/// A matrix request renders the matrix table.
#[test]
fn test_render_matrix_html() {
    let request = QueryRequest::new("SELECT r, c, v FROM T").with_matrix("c", "r");
    let result = AccumulatedResult::from_records(pivot_records(), 3, None);
    let view = render_view(
        &result,
        ViewKind::for_request(&request),
        request.pivot(),
        &PagerConfig::default(),
    );

    assert!(matches!(view, RenderedView::Matrix(_)));
    let html = view.to_html();
    assert!(html.starts_with("<table id='query_results_matrix'"));
    assert_eq!(html.matches("<div class='matrixItem'>").count(), 3);
}
