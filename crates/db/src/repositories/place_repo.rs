//! Repository for the `places` table.

use batohi_core::entities::NewPlace;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::entity::Place;

/// Column list for `places` queries.
const COLUMNS: &str = "id, name, description, category, district, province, address, \
     location, entry_fee, opening_hours, best_time_to_visit, images, tags, is_featured, \
     created_at, updated_at";

pub struct PlaceRepo;

impl PlaceRepo {
    /// Insert every place in one statement. Returns the number of rows written.
    pub async fn insert_batch(pool: &PgPool, places: &[&NewPlace]) -> Result<u64, sqlx::Error> {
        if places.is_empty() {
            return Ok(0);
        }
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO places \
                (name, description, category, district, province, address, location, \
                 entry_fee, opening_hours, best_time_to_visit, images, tags, is_featured) ",
        );
        qb.push_values(places, |mut b, p| {
            b.push_bind(&p.name)
                .push_bind(&p.description)
                .push_bind(&p.category)
                .push_bind(&p.district)
                .push_bind(&p.province)
                .push_bind(&p.address)
                .push_bind(p.location.as_ref().map(Json))
                .push_bind(p.entry_fee)
                .push_bind(&p.opening_hours)
                .push_bind(&p.best_time_to_visit)
                .push_bind(&p.images)
                .push_bind(&p.tags)
                .push_bind(p.is_featured);
        });
        let result = qb.build().execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Most recently created places first.
    pub async fn list(pool: &PgPool, limit: i64) -> Result<Vec<Place>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM places ORDER BY created_at DESC, id DESC LIMIT $1");
        sqlx::query_as::<_, Place>(&sql)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
