//! Repository for the `festivals` table.

use batohi_core::entities::NewFestival;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::entity::Festival;

/// Column list for `festivals` queries.
const COLUMNS: &str = "id, name, description, start_date, end_date, location, significance, \
     images, is_public_holiday, created_at, updated_at";

pub struct FestivalRepo;

impl FestivalRepo {
    pub async fn insert_batch(
        pool: &PgPool,
        festivals: &[&NewFestival],
    ) -> Result<u64, sqlx::Error> {
        if festivals.is_empty() {
            return Ok(0);
        }
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO festivals \
                (name, description, start_date, end_date, location, significance, \
                 images, is_public_holiday) ",
        );
        qb.push_values(festivals, |mut b, f| {
            b.push_bind(&f.name)
                .push_bind(&f.description)
                .push_bind(f.start_date)
                .push_bind(f.end_date)
                .push_bind(&f.location)
                .push_bind(&f.significance)
                .push_bind(&f.images)
                .push_bind(f.is_public_holiday);
        });
        let result = qb.build().execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Upcoming festivals first.
    pub async fn list(pool: &PgPool, limit: i64) -> Result<Vec<Festival>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM festivals ORDER BY start_date ASC, id ASC LIMIT $1");
        sqlx::query_as::<_, Festival>(&sql)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
