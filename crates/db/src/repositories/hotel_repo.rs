//! Repository for the `hotels` table.

use batohi_core::entities::NewHotel;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::entity::Hotel;

/// Column list for `hotels` queries.
const COLUMNS: &str = "id, name, description, address, city, star_rating, price_per_night, \
     amenities, images, contact, is_available, created_at, updated_at";

pub struct HotelRepo;

impl HotelRepo {
    pub async fn insert_batch(pool: &PgPool, hotels: &[&NewHotel]) -> Result<u64, sqlx::Error> {
        if hotels.is_empty() {
            return Ok(0);
        }
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO hotels \
                (name, description, address, city, star_rating, price_per_night, \
                 amenities, images, contact, is_available) ",
        );
        qb.push_values(hotels, |mut b, h| {
            b.push_bind(&h.name)
                .push_bind(&h.description)
                .push_bind(&h.address)
                .push_bind(&h.city)
                .push_bind(h.star_rating)
                .push_bind(h.price_per_night)
                .push_bind(&h.amenities)
                .push_bind(&h.images)
                .push_bind(h.contact.as_ref().map(Json))
                .push_bind(h.is_available);
        });
        let result = qb.build().execute(pool).await?;
        Ok(result.rows_affected())
    }

    pub async fn list(pool: &PgPool, limit: i64) -> Result<Vec<Hotel>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM hotels ORDER BY created_at DESC, id DESC LIMIT $1");
        sqlx::query_as::<_, Hotel>(&sql)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
