use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{Error, Result};
use crate::table::TabularData;

/// Parses the CSV file at `path` into a [`TabularData`].
///
/// The first record becomes the column names, every following record one data
/// row. Quoting follows the CSV defaults: `"`-delimited fields, `""` as an
/// escaped quote, embedded commas and newlines allowed inside quoted fields.
pub fn from_path(path: impl AsRef<Path>) -> Result<TabularData> {
    let reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path.as_ref())?;
    read_all(reader)
}

/// Same as [`from_path`], for any byte source.
pub fn from_reader<R: Read>(source: R) -> Result<TabularData> {
    let reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);
    read_all(reader)
}

// The reader is flexible on purpose: TabularData's constructor is the single
// source of truth for row-width validation, so ragged input surfaces as
// InvalidShape rather than a parser error.
fn read_all<R: Read>(mut reader: csv::Reader<R>) -> Result<TabularData> {
    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record?,
        None => return Err(Error::EmptyCsv),
    };
    let columns: Vec<String> = header.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    debug!(columns = columns.len(), rows = rows.len(), "read CSV records");

    TabularData::new(columns, rows)
}
