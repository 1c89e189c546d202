//! Repository for the `vehicles` table.

use batohi_core::entities::NewVehicle;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::entity::Vehicle;

/// Column list for `vehicles` queries.
const COLUMNS: &str = "id, name, vehicle_type, capacity, price_per_day, driver_included, \
     features, contact, is_available, created_at, updated_at";

pub struct VehicleRepo;

impl VehicleRepo {
    pub async fn insert_batch(pool: &PgPool, vehicles: &[&NewVehicle]) -> Result<u64, sqlx::Error> {
        if vehicles.is_empty() {
            return Ok(0);
        }
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO vehicles \
                (name, vehicle_type, capacity, price_per_day, driver_included, \
                 features, contact, is_available) ",
        );
        qb.push_values(vehicles, |mut b, v| {
            b.push_bind(&v.name)
                .push_bind(&v.vehicle_type)
                .push_bind(v.capacity)
                .push_bind(v.price_per_day)
                .push_bind(v.driver_included)
                .push_bind(&v.features)
                .push_bind(v.contact.as_ref().map(Json))
                .push_bind(v.is_available);
        });
        let result = qb.build().execute(pool).await?;
        Ok(result.rows_affected())
    }

    pub async fn list(pool: &PgPool, limit: i64) -> Result<Vec<Vehicle>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM vehicles ORDER BY created_at DESC, id DESC LIMIT $1");
        sqlx::query_as::<_, Vehicle>(&sql)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
