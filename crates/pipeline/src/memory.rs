//! In-memory [`RecordStore`] for exercising imports without a database.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use batohi_core::entities::EntityRecord;
use batohi_core::error::StoreError;
use batohi_core::store::RecordStore;

/// One `insert` call as the store received it.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertCall {
    pub table: String,
    pub records: Vec<EntityRecord>,
}

#[derive(Debug, Default)]
struct Inner {
    calls: Vec<InsertCall>,
    stored: HashMap<String, Vec<EntityRecord>>,
    fail_calls: HashMap<usize, String>,
}

/// Stores records per table and enforces a unique `name` per table, like
/// the `uq_*_name` constraints in Postgres. Individual calls can be made
/// to fail with [`MemoryStore::fail_call`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `call_index`-th (0-based) insert fail with `message`.
    pub fn fail_call(self, call_index: usize, message: impl Into<String>) -> Self {
        self.lock().fail_calls.insert(call_index, message.into());
        self
    }

    /// Every insert call received so far, in order.
    pub fn calls(&self) -> Vec<InsertCall> {
        self.lock().calls.clone()
    }

    /// Records successfully stored in `table`.
    pub fn stored(&self, table: &str) -> Vec<EntityRecord> {
        self.lock().stored.get(table).cloned().unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(&self, table: &str, records: &[EntityRecord]) -> Result<u64, StoreError> {
        let mut inner = self.lock();
        let call_index = inner.calls.len();
        inner.calls.push(InsertCall {
            table: table.to_string(),
            records: records.to_vec(),
        });

        if let Some(message) = inner.fail_calls.get(&call_index) {
            return Err(StoreError::Rejected(message.clone()));
        }

        if let Some(wrong) = records.iter().find(|r| r.table() != table) {
            return Err(StoreError::MismatchedRecord {
                table: table.to_string(),
                found: wrong.table().to_string(),
            });
        }

        let existing = inner.stored.entry(table.to_string()).or_default();
        let mut names: HashSet<&str> = existing.iter().map(EntityRecord::name).collect();
        for record in records {
            if !names.insert(record.name()) {
                return Err(StoreError::Rejected(format!(
                    "duplicate key value violates unique constraint \"uq_{table}_name\": {}",
                    record.name()
                )));
            }
        }

        existing.extend_from_slice(records);
        Ok(records.len() as u64)
    }
}
