//! CSV serialization of query results
//!
//! The header is the export projection of the first record: its field names
//! in order. Every row emits exactly those columns; a missing field is an
//! empty value and child results become a compact JSON array.
//!
//! Output is forward-only: header first, then each record written and
//! flushed before the next one is touched.

use std::io::Write;

use chrono::{DateTime, Local, TimeZone};

use super::errors::{ExportError, ExportResult};
use crate::config::PagerConfig;
use crate::observability::{log_event_with_fields, Event, ObservationScope};
use crate::pagination::{AccumulatedResult, PageSource, PageStream, QueryRequest};
use crate::record::{FieldValue, Record};

/// Result of an export that was allowed to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Header plus `rows` records were written
    Written { rows: usize, filename: String },
    /// There was nothing to export; no bytes were written
    Empty,
}

/// Suggested download name, `export<YYYYmmddHHMMSS>.csv`
pub fn export_filename<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("export{}.csv", at.format("%Y%m%d%H%M%S"))
}

/// Column list of the export projection for `record`
pub fn export_columns(record: &Record) -> Vec<String> {
    record.field_names().map(str::to_string).collect()
}

fn export_value(value: Option<&FieldValue>) -> ExportResult<String> {
    match value {
        None => Ok(String::new()),
        Some(children @ FieldValue::Children(_)) => Ok(serde_json::to_string(children)?),
        Some(scalar) => Ok(scalar.scalar_text().unwrap_or_default()),
    }
}

/// Writes the header once, then one flushed line per record
struct RowWriter<W: Write> {
    writer: csv::Writer<W>,
    columns: Vec<String>,
    rows: usize,
}

impl<W: Write> RowWriter<W> {
    fn start(dest: W, first: &Record) -> ExportResult<Self> {
        let columns = export_columns(first);
        let mut writer = csv::WriterBuilder::new().from_writer(dest);
        writer.write_record(&columns)?;

        Ok(Self {
            writer,
            columns,
            rows: 0,
        })
    }

    fn write(&mut self, record: &Record) -> ExportResult<()> {
        let line = self
            .columns
            .iter()
            .map(|column| export_value(record.get(column)))
            .collect::<ExportResult<Vec<_>>>()?;

        self.writer.write_record(&line)?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    fn finish(mut self) -> ExportResult<usize> {
        self.writer.flush()?;
        Ok(self.rows)
    }
}

fn write_records<W: Write>(dest: W, first: &Record, records: &[Record]) -> ExportResult<usize> {
    let mut rows = RowWriter::start(dest, first)?;
    for record in records {
        rows.write(record)?;
    }
    rows.finish()
}

/// Returns 0 without touching `dest` when no page carries a record
fn write_pages<S, W>(source: &mut S, query: &str, dest: W) -> ExportResult<usize>
where
    S: PageSource + ?Sized,
    W: Write,
{
    let mut pages = PageStream::new(source, query);

    let mut rows = loop {
        let Some(page) = pages.next_page()? else {
            return Ok(0);
        };
        let mut records = page.decode_records()?.into_iter();
        if let Some(first) = records.next() {
            let mut rows = RowWriter::start(dest, &first)?;
            rows.write(&first)?;
            for record in records {
                rows.write(&record)?;
            }
            break rows;
        }
    };

    for page in pages {
        for record in page?.decode_records()? {
            rows.write(&record)?;
        }
    }

    rows.finish()
}

/// CSV exporter gated by configuration
#[derive(Debug, Clone, Copy)]
pub struct CsvExporter {
    enabled: bool,
}

impl CsvExporter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn from_config(config: &PagerConfig) -> Self {
        Self::new(config.export_enabled())
    }

    /// Write an already accumulated result.
    ///
    /// Refusal and the empty check both happen before `dest` is touched.
    /// Count results carry no records and export as empty.
    pub fn stream_csv<W: Write>(&self, result: &AccumulatedResult, dest: W) -> ExportResult<ExportOutcome> {
        self.ensure_enabled()?;

        let records = result.records();
        let Some(first) = records.first() else {
            log_event_with_fields(Event::ExportEmpty, &[]);
            return Ok(ExportOutcome::Empty);
        };

        let scope = ObservationScope::with_fields("EXPORT", &[("source", "accumulated")]);
        let written = write_records(dest, first, records);
        Self::close_scope(scope, written)
    }

    /// Fetch and write a query page by page without accumulating it.
    ///
    /// Every page is drained regardless of the auto-continue policy. The
    /// header is written when the first record arrives, so an empty result
    /// writes nothing. Rows written before a failed fetch stay written.
    pub fn stream_query<S, W>(&self, source: &mut S, request: &QueryRequest, dest: W) -> ExportResult<ExportOutcome>
    where
        S: PageSource + ?Sized,
        W: Write,
    {
        self.ensure_enabled()?;

        let scope = ObservationScope::with_fields("EXPORT", &[("source", "stream")]);
        let written = write_pages(source, request.query(), dest);

        if let Ok(0) = written {
            scope.complete_with_fields(&[("rows", "0")]);
            log_event_with_fields(Event::ExportEmpty, &[]);
            return Ok(ExportOutcome::Empty);
        }

        Self::close_scope(scope, written)
    }

    fn ensure_enabled(&self) -> ExportResult<()> {
        if !self.enabled {
            log_event_with_fields(Event::ExportRefused, &[]);
            return Err(ExportError::Disabled);
        }
        Ok(())
    }

    fn close_scope(scope: ObservationScope<'_>, written: ExportResult<usize>) -> ExportResult<ExportOutcome> {
        match written {
            Ok(rows) => {
                scope.complete_with_fields(&[("rows", &rows.to_string())]);
                Ok(ExportOutcome::Written {
                    rows,
                    filename: export_filename(&Local::now()),
                })
            }
            Err(err) => {
                scope.fail(&err.to_string());
                Err(err)
            }
        }
    }
}
