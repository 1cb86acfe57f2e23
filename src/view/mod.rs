//! View builders
//!
//! Turn an accumulated record sequence into a numbered grid (with nested
//! grids for child results) or a two-dimensional pivot matrix, and render
//! either as HTML table markup.

mod html;
mod matrix;
mod render;
mod tabular;

pub use html::{escape_html, render_matrix, render_table};
pub use matrix::{MatrixEntry, MatrixOutcome, MatrixView, MatrixViewBuilder};
pub use render::{
    render_count_result, render_empty_result, render_no_matrix_match, render_partial_result_warning,
    render_result_summary, render_status_warning, render_view, RenderedView, ViewKind,
};
pub use tabular::{Cell, TabularGrid, TabularRow, TabularViewBuilder};
