//! The persistence boundary used by bulk import.
//!
//! The import pipeline only ever appends records; reads for list refresh
//! go through the repositories directly.

use async_trait::async_trait;

use crate::entities::EntityRecord;
use crate::error::StoreError;

/// A tabular store that accepts bulk inserts.
///
/// One call writes one batch. Implementations must treat a call as a unit:
/// either every record is stored or the call fails. Integrity constraints
/// are the store's responsibility and surface as [`StoreError`].
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert `records` into `table`, returning the number of rows written.
    async fn insert(&self, table: &str, records: &[EntityRecord]) -> Result<u64, StoreError>;
}
