//! Postgres-backed [`RecordStore`] used by the import pipeline.

use async_trait::async_trait;
use batohi_core::entities::{EntityKind, EntityRecord};
use batohi_core::error::StoreError;
use batohi_core::store::RecordStore;

use crate::repositories::{FestivalRepo, HotelRepo, PlaceRepo, RestaurantRepo, VehicleRepo};
use crate::DbPool;

/// Routes each batch to the repository for its table.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: DbPool,
}

impl PgRecordStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert(&self, table: &str, records: &[EntityRecord]) -> Result<u64, StoreError> {
        let kind =
            EntityKind::from_str(table).ok_or_else(|| StoreError::UnknownTable(table.to_string()))?;

        let result = match kind {
            EntityKind::Places => {
                let rows = narrow(table, records, |r| match r {
                    EntityRecord::Place(p) => Some(p),
                    _ => None,
                })?;
                PlaceRepo::insert_batch(&self.pool, &rows).await
            }
            EntityKind::Hotels => {
                let rows = narrow(table, records, |r| match r {
                    EntityRecord::Hotel(h) => Some(h),
                    _ => None,
                })?;
                HotelRepo::insert_batch(&self.pool, &rows).await
            }
            EntityKind::Restaurants => {
                let rows = narrow(table, records, |r| match r {
                    EntityRecord::Restaurant(r) => Some(r),
                    _ => None,
                })?;
                RestaurantRepo::insert_batch(&self.pool, &rows).await
            }
            EntityKind::Festivals => {
                let rows = narrow(table, records, |r| match r {
                    EntityRecord::Festival(f) => Some(f),
                    _ => None,
                })?;
                FestivalRepo::insert_batch(&self.pool, &rows).await
            }
            EntityKind::Vehicles => {
                let rows = narrow(table, records, |r| match r {
                    EntityRecord::Vehicle(v) => Some(v),
                    _ => None,
                })?;
                VehicleRepo::insert_batch(&self.pool, &rows).await
            }
        };

        result.map_err(|e| {
            tracing::warn!(table, records = records.len(), error = %e, "Batch insert rejected");
            store_error(e)
        })
    }
}

/// Unwrap every record to the variant `table` stores, or fail the whole call.
fn narrow<'a, T>(
    table: &str,
    records: &'a [EntityRecord],
    pick: impl Fn(&'a EntityRecord) -> Option<&'a T>,
) -> Result<Vec<&'a T>, StoreError> {
    records
        .iter()
        .map(|record| {
            pick(record).ok_or_else(|| StoreError::MismatchedRecord {
                table: table.to_string(),
                found: record.table().to_string(),
            })
        })
        .collect()
}

/// Map a sqlx failure onto the store's error vocabulary.
///
/// Constraint violations and other statement errors reject the batch with
/// the database's own message; connection-level failures are `Unavailable`.
pub fn store_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => match db_err.constraint() {
            Some(constraint) => StoreError::Rejected(format!("{db_err} ({constraint})")),
            None => StoreError::Rejected(db_err.to_string()),
        },
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(err.to_string())
        }
        other => StoreError::Rejected(other.to_string()),
    }
}
