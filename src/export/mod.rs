//! CSV export
//!
//! Writes a record result as comma-separated values, either from an
//! accumulated result or straight from the page source. Export can be
//! switched off by configuration, in which case nothing is written.

mod errors;
mod writer;

pub use errors::{ExportError, ExportResult};
pub use writer::{export_columns, export_filename, CsvExporter, ExportOutcome};
