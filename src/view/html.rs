//! HTML table markup for built views
//!
//! Every label and value is escaped here; the builders keep raw text.

use super::matrix::MatrixView;
use super::tabular::{Cell, TabularGrid};

const TABLE_CLASS: &str = "data_table";

/// Escape text for HTML element content and single- or double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Render a tabular grid as `<table id='query_results'>`
pub fn render_table(grid: &TabularGrid) -> String {
    let mut html = String::new();
    write_table(&mut html, grid, Some("query_results"));
    html
}

fn write_table(html: &mut String, grid: &TabularGrid, id: Option<&str>) {
    match id {
        Some(id) => html.push_str(&format!("<table id='{}' class='{}'>\n", id, TABLE_CLASS)),
        None => html.push_str(&format!("<table class='{}'>\n", TABLE_CLASS)),
    }

    html.push_str("<tr><th>&nbsp;</th>");
    for header in grid.headers().iter() {
        html.push_str("<th>");
        html.push_str(&escape_html(header));
        html.push_str("</th>");
    }
    html.push_str("</tr>\n");

    for row in grid.rows() {
        html.push_str(&format!("<tr><td>{}</td>", row.number));
        for cell in &row.cells {
            html.push_str("<td>");
            write_cell(html, cell);
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</table>");
}

fn write_cell(html: &mut String, cell: &Cell) {
    match cell {
        Cell::Empty => {}
        Cell::Text(text) => html.push_str(&escape_html(text)),
        Cell::Truncated(summary) => {
            html.push_str("<em>");
            html.push_str(&escape_html(summary));
            html.push_str("</em>");
        }
        Cell::Nested(grids) => {
            for grid in grids {
                html.push_str("<div class='child_group'>");
                write_table(html, grid, None);
                html.push_str("</div>");
            }
        }
    }
}

/// Render a matrix as `<table id='query_results_matrix'>` with stacked entries
pub fn render_matrix(view: &MatrixView) -> String {
    let mut html = format!(
        "<table id='query_results_matrix' border='1' class='{}'>\n",
        TABLE_CLASS
    );

    html.push_str("<tr><td></td>");
    for column in view.column_labels().iter() {
        html.push_str("<th>");
        html.push_str(&escape_html(column));
        html.push_str("</th>");
    }
    html.push_str("</tr>\n");

    for row in view.row_labels().iter() {
        html.push_str("<tr><th>");
        html.push_str(&escape_html(row));
        html.push_str("</th>");

        for column in view.column_labels().iter() {
            html.push_str("<td>");
            for entry in view.cell(row, column) {
                if entry.is_empty() {
                    html.push_str("<div class='matrixItem' style='width: 0px;'></div>");
                    continue;
                }
                html.push_str("<div class='matrixItem'>");
                for (name, value) in entry.fields() {
                    html.push_str(&format!(
                        "<em>{}:</em>  {}<br/>",
                        escape_html(name),
                        escape_html(value)
                    ));
                }
                html.push_str("</div>");
            }
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</table>");
    html
}
