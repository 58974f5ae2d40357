use tracing::info;

use crate::error::Result;
use crate::options::TableIdentity;
use crate::store::TableStore;
use crate::table::TabularData;

/// Which branch the create-or-append decision took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The table was absent and now holds exactly the parsed rows.
    Created,
    /// The table existed and the parsed rows were appended after its own.
    Appended,
}

/// Creates the target table or appends to it, reporting which branch ran.
///
/// Exactly two branches, no retry and no fallback between them; every error
/// from the store bubbles up unchanged. Like the store's own
/// `create_or_append`, this is check-then-act and not atomic against
/// concurrent mutators.
pub fn create_or_append<S: TableStore + ?Sized>(
    store: &mut S,
    id: &TableIdentity,
    data: &TabularData,
) -> Result<SyncOutcome> {
    if store.exists(id)? {
        info!(table = %id, rows = data.rows().len(), "table exists, appending");
        store.append(id, data)?;
        Ok(SyncOutcome::Appended)
    } else {
        info!(table = %id, rows = data.rows().len(), "table absent, creating");
        store.create(id, data)?;
        Ok(SyncOutcome::Created)
    }
}
