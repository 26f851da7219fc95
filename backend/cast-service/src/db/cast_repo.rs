use super::CastRepository;
use crate::models::{CastIn, CastOut};
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PgCastRepository {
    pool: PgPool,
}

impl PgCastRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CastRepository for PgCastRepository {
    async fn create(&self, cast: &CastIn) -> Result<CastOut, sqlx::Error> {
        sqlx::query_as::<_, CastOut>(
            r#"
            INSERT INTO casts (name, nationality)
            VALUES ($1, $2)
            RETURNING id, name, nationality
            "#,
        )
        .bind(&cast.name)
        .bind(cast.nationality.as_deref())
        .fetch_one(&self.pool)
        .await
    }

    async fn find(&self, id: i32) -> Result<Option<CastOut>, sqlx::Error> {
        sqlx::query_as::<_, CastOut>("SELECT id, name, nationality FROM casts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }
}
