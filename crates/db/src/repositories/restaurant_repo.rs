//! Repository for the `restaurants` table.

use batohi_core::entities::NewRestaurant;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::entity::Restaurant;

/// Column list for `restaurants` queries.
const COLUMNS: &str = "id, name, description, address, city, cuisines, price_range, rating, \
     opening_hours, contact, is_vegetarian_friendly, images, created_at, updated_at";

pub struct RestaurantRepo;

impl RestaurantRepo {
    pub async fn insert_batch(
        pool: &PgPool,
        restaurants: &[&NewRestaurant],
    ) -> Result<u64, sqlx::Error> {
        if restaurants.is_empty() {
            return Ok(0);
        }
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO restaurants \
                (name, description, address, city, cuisines, price_range, rating, \
                 opening_hours, contact, is_vegetarian_friendly, images) ",
        );
        qb.push_values(restaurants, |mut b, r| {
            b.push_bind(&r.name)
                .push_bind(&r.description)
                .push_bind(&r.address)
                .push_bind(&r.city)
                .push_bind(&r.cuisines)
                .push_bind(&r.price_range)
                .push_bind(r.rating)
                .push_bind(&r.opening_hours)
                .push_bind(r.contact.as_ref().map(Json))
                .push_bind(r.is_vegetarian_friendly)
                .push_bind(&r.images);
        });
        let result = qb.build().execute(pool).await?;
        Ok(result.rows_affected())
    }

    pub async fn list(pool: &PgPool, limit: i64) -> Result<Vec<Restaurant>, sqlx::Error> {
        let sql = format!(
            "SELECT {COLUMNS} FROM restaurants ORDER BY created_at DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, Restaurant>(&sql)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
