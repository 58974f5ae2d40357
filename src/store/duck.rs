use duckdb::{params, Connection};
use tracing::debug;

use crate::error::{Error, Result};
use crate::options::{ConnectionCredentials, TableIdentity};
use crate::store::TableStore;
use crate::table::TabularData;

/// Max length of string values stored by a [`DuckTableStore`].
pub const MAX_LENGTH: usize = 255;

/// [`TableStore`] backed by an embedded DuckDB engine.
///
/// The store exclusively owns its connection: acquired on `connect`, released
/// on `close` or drop, never shared or pooled. Column identifiers are
/// interpolated into generated DDL verbatim, so callers must supply names that
/// are valid for the engine. Cell values are single-quoted with embedded
/// quotes doubled.
pub struct DuckTableStore {
    conn: Connection,
}

impl DuckTableStore {
    /// Opens the database at `credentials.url`.
    ///
    /// The embedded engine authenticates by filesystem access; `user` and
    /// `password` are carried opaquely and never inspected here.
    pub fn connect(credentials: &ConnectionCredentials) -> Result<Self> {
        let conn = Connection::open(&credentials.url)
            .map_err(Error::store("cannot connect to the database"))?;
        Ok(Self { conn })
    }

    /// Opens a throwaway in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(Error::store("cannot open an in-memory database"))?;
        Ok(Self { conn })
    }

    /// Releases the connection. Dropping the store releases it as well; this
    /// exists to surface close failures instead of swallowing them.
    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, e)| Error::store("cannot close the connection")(e))
    }

    fn schema_exists(&self, schema: &str) -> Result<bool> {
        let found = self.conn.query_row(
            "SELECT 1 FROM information_schema.schemata WHERE schema_name = ?",
            params![schema],
            |_| Ok(()),
        );
        match found {
            Ok(()) => Ok(true),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(false),
            Err(e) => Err(Error::store("cannot query schema names")(e)),
        }
    }

    fn table_listed(&self, id: &TableIdentity) -> Result<bool> {
        let found = self.conn.query_row(
            "SELECT 1 FROM information_schema.tables \
             WHERE table_schema = ? AND table_name = ? AND table_type = 'BASE TABLE'",
            params![id.schema(), id.name()],
            |_| Ok(()),
        );
        match found {
            Ok(()) => Ok(true),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(false),
            Err(e) => Err(Error::store("cannot query table names")(e)),
        }
    }

    /// Live column names in their stored order, from the catalog.
    fn column_names(&self, id: &TableIdentity) -> Result<Vec<String>> {
        let context = "cannot query column names";
        let mut stmt = self
            .conn
            .prepare(
                "SELECT column_name FROM information_schema.columns \
                 WHERE table_schema = ? AND table_name = ? ORDER BY ordinal_position",
            )
            .map_err(Error::store(context))?;
        let rows = stmt
            .query_map(params![id.schema(), id.name()], |row| {
                row.get::<_, String>(0)
            })
            .map_err(Error::store(context))?;

        let mut names = Vec::new();
        for name in rows {
            names.push(name.map_err(Error::store(context))?);
        }
        Ok(names)
    }

    /// One batched INSERT covering every row; the whole row set lands or the
    /// statement fails. Zero rows is a no-op.
    fn insert_rows(&self, id: &TableIdentity, data: &TabularData) -> Result<()> {
        if data.rows().is_empty() {
            return Ok(());
        }

        let tuples: Vec<String> = data
            .rows()
            .iter()
            .map(|row| {
                let cells: Vec<String> = row.iter().map(|v| sql_literal(v)).collect();
                format!("({})", cells.join(", "))
            })
            .collect();
        let sql = format!("INSERT INTO {} VALUES {}", id.qualified(), tuples.join(", "));

        let inserted = self
            .conn
            .execute(&sql, [])
            .map_err(Error::store("cannot append values to the table"))?;
        debug!(table = %id, rows = inserted, "inserted rows");
        Ok(())
    }
}

impl TableStore for DuckTableStore {
    fn exists(&self, id: &TableIdentity) -> Result<bool> {
        if !self.schema_exists(id.schema())? {
            return Ok(false);
        }
        self.table_listed(id)
    }

    fn create(&mut self, id: &TableIdentity, data: &TabularData) -> Result<()> {
        if self.exists(id)? {
            return Err(Error::AlreadyExists(id.clone()));
        }

        let columns: Vec<String> = data
            .columns()
            .iter()
            .map(|name| format!("{name} VARCHAR({MAX_LENGTH})"))
            .collect();
        let sql = format!("CREATE TABLE {} ({})", id.qualified(), columns.join(", "));
        debug!(table = %id, "creating table");
        self.conn
            .execute_batch(&sql)
            .map_err(Error::store("cannot create the table"))?;

        self.insert_rows(id, data)
    }

    fn append(&mut self, id: &TableIdentity, data: &TabularData) -> Result<()> {
        let live = self.column_names(id)?;
        if live.as_slice() != data.columns() {
            return Err(Error::SchemaMismatch {
                id: id.clone(),
                expected: data.columns().to_vec(),
                found: live,
            });
        }
        self.insert_rows(id, data)
    }
}

/// Single-quoted SQL string literal, embedded quotes doubled.
fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
