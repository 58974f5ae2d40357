use thiserror::Error;

use crate::options::TableIdentity;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure modes of the CSV-to-table pipeline.
///
/// Every variant means "stop the operation": nothing in this crate retries,
/// falls back, or reports partial success. Errors propagate with `?` up to the
/// binary, which attaches path and operation context.
#[derive(Error, Debug)]
pub enum Error {
    /// In-memory table construction rejected the input.
    #[error("invalid table shape: {0}")]
    InvalidShape(String),

    /// The CSV source could not be read or is structurally malformed.
    #[error("cannot ingest CSV: {0}")]
    Ingest(#[from] csv::Error),

    /// The CSV source holds zero records, not even a header.
    #[error("CSV source contains no records")]
    EmptyCsv,

    /// `create` was called for a table that is already present.
    #[error("cannot create table {0}: it already exists")]
    AlreadyExists(TableIdentity),

    /// The live table's columns don't match the data to append.
    #[error("columns of {id} don't match the CSV header: table has {found:?}, CSV has {expected:?}")]
    SchemaMismatch {
        id: TableIdentity,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Any underlying engine failure, wrapped with the operation attempted.
    #[error("{context}: {source}")]
    Store {
        context: String,
        #[source]
        source: duckdb::Error,
    },
}

impl Error {
    pub(crate) fn store(context: &'static str) -> impl FnOnce(duckdb::Error) -> Error {
        move |source| Error::Store {
            context: context.into(),
            source,
        }
    }
}
