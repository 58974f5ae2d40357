pub mod error;
pub mod ingest;
pub mod options;
pub mod store;
pub mod sync;
pub mod table;

pub use error::{Error, Result};
pub use options::{Cli, ConnectionCredentials, TableIdentity};
pub use store::{DuckTableStore, TableStore};
pub use sync::SyncOutcome;
pub use table::TabularData;
