//! Presentation entry points
//!
//! Messages are plain text; [`RenderedView::to_html`] produces markup.

use std::time::Duration;

use super::html::{escape_html, render_matrix, render_table};
use super::matrix::{MatrixOutcome, MatrixView, MatrixViewBuilder};
use super::tabular::{TabularGrid, TabularViewBuilder};
use crate::config::PagerConfig;
use crate::pagination::{AccumulatedResult, MatrixPivot, PaginationStatus, QueryRequest};

/// Which structure to build from a record result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Tabular,
    Matrix,
}

impl ViewKind {
    /// Matrix when the request names pivot fields, tabular otherwise
    pub fn for_request(request: &QueryRequest) -> Self {
        if request.pivot().is_some() {
            ViewKind::Matrix
        } else {
            ViewKind::Tabular
        }
    }
}

/// What the presentation layer should show
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedView {
    /// Count-only result message
    Count(String),
    /// Informational "no records" message
    Empty(String),
    Table(TabularGrid),
    Matrix(MatrixView),
    /// Warning: the pivot selection matched nothing
    NoMatrixMatch(String),
}

impl RenderedView {
    pub fn to_html(&self) -> String {
        match self {
            RenderedView::Count(message) => format!("<p class='info'>{}</p>", escape_html(message)),
            RenderedView::Empty(message) | RenderedView::NoMatrixMatch(message) => {
                format!("<p class='warning'>{}</p>", escape_html(message))
            }
            RenderedView::Table(grid) => render_table(grid),
            RenderedView::Matrix(view) => render_matrix(view),
        }
    }
}

pub fn render_count_result(n: u64) -> String {
    format!(
        "Query would return {} record{}",
        n,
        if n == 1 { "." } else { "s." }
    )
}

pub fn render_empty_result() -> String {
    "Sorry, no records returned.".to_string()
}

pub fn render_no_matrix_match() -> String {
    "No records match matrix column and row selections.".to_string()
}

pub fn render_partial_result_warning(rows_so_far: usize) -> String {
    format!(
        "Memory is almost exhausted after only processing {} rows of data. \
         For large queries, export through a bulk or streaming CSV export instead.",
        rows_so_far
    )
}

/// Warning for a pagination status that needs one
pub fn render_status_warning(status: &PaginationStatus) -> Option<String> {
    match status {
        PaginationStatus::CapacityExceeded { rows_so_far, .. } => {
            Some(render_partial_result_warning(*rows_so_far))
        }
        _ => None,
    }
}

/// "Returned records 1 - 200 of 4500 total records in 0.512 seconds:"
pub fn render_result_summary(min_row: usize, max_row: usize, total: u64, elapsed: Duration) -> String {
    format!(
        "Returned records {} - {} of {} total record{} in {:.3} seconds:",
        min_row,
        max_row,
        total,
        if total == 1 { "" } else { "s" },
        elapsed.as_secs_f64()
    )
}

/// Build the view for a pagination result.
///
/// Rows are numbered from 1. A matrix request without pivot fields selects
/// nothing and reports no match.
pub fn render_view(
    result: &AccumulatedResult,
    kind: ViewKind,
    pivot: Option<&MatrixPivot>,
    config: &PagerConfig,
) -> RenderedView {
    let records = match result {
        AccumulatedResult::Count(n) => return RenderedView::Count(render_count_result(*n)),
        AccumulatedResult::Empty => return RenderedView::Empty(render_empty_result()),
        AccumulatedResult::Records { records, .. } => records,
    };
    if records.is_empty() {
        return RenderedView::Empty(render_empty_result());
    }

    match (kind, pivot) {
        (ViewKind::Tabular, _) => {
            RenderedView::Table(TabularViewBuilder::from_config(config).build(records, 1))
        }
        (ViewKind::Matrix, Some(pivot)) => match MatrixViewBuilder::build(records, pivot) {
            MatrixOutcome::Matrix(view) => RenderedView::Matrix(view),
            MatrixOutcome::NoMatch => RenderedView::NoMatrixMatch(render_no_matrix_match()),
        },
        (ViewKind::Matrix, None) => RenderedView::NoMatrixMatch(render_no_matrix_match()),
    }
}
