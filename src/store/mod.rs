pub mod duck;

pub use duck::DuckTableStore;

use crate::error::Result;
use crate::options::TableIdentity;
use crate::table::TabularData;

/// Capability contract over named tables: existence, creation, append.
///
/// One implementation talks to a real engine ([`DuckTableStore`]); tests drive
/// the orchestration against an in-memory double. Every operation blocks until
/// the backing engine answers.
pub trait TableStore {
    /// True iff a table with exactly this schema and name is present.
    /// A missing schema yields `false`, not an error.
    fn exists(&self, id: &TableIdentity) -> Result<bool>;

    /// Creates the table with `data`'s columns, in order, then inserts
    /// `data`'s rows. Fails with [`Error::AlreadyExists`] when the table is
    /// already present.
    ///
    /// [`Error::AlreadyExists`]: crate::error::Error::AlreadyExists
    fn create(&mut self, id: &TableIdentity, data: &TabularData) -> Result<()>;

    /// Inserts `data`'s rows into an existing table. Fails with
    /// [`Error::SchemaMismatch`] unless the live column names equal
    /// `data.columns()` by value and order; on mismatch no row is touched.
    ///
    /// [`Error::SchemaMismatch`]: crate::error::Error::SchemaMismatch
    fn append(&mut self, id: &TableIdentity, data: &TabularData) -> Result<()>;

    /// `append` when the table exists, `create` otherwise.
    ///
    /// Check-then-act: an external actor touching the same table between the
    /// two steps turns a clean `AlreadyExists`/`SchemaMismatch` into an engine
    /// error. Best effort, not transactional.
    fn create_or_append(&mut self, id: &TableIdentity, data: &TabularData) -> Result<()> {
        if self.exists(id)? {
            self.append(id, data)
        } else {
            self.create(id, data)
        }
    }
}
