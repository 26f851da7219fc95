/// Database access for casts
mod cast_repo;

pub use cast_repo::PgCastRepository;

use crate::models::{CastIn, CastOut};
use async_trait::async_trait;
use db_pool::{SchemaDefinition, TableDefinition};

pub const CASTS_TABLE: TableDefinition = TableDefinition::new(
    "casts",
    r#"
    CREATE TABLE IF NOT EXISTS casts (
        id SERIAL PRIMARY KEY,
        name VARCHAR(50) NOT NULL,
        nationality VARCHAR(20)
    )
    "#,
);

pub fn schema() -> SchemaDefinition {
    SchemaDefinition::new([CASTS_TABLE])
}

/// Storage seam for casts; handlers only see this trait
#[async_trait]
pub trait CastRepository: Send + Sync + 'static {
    async fn create(&self, cast: &CastIn) -> Result<CastOut, sqlx::Error>;

    async fn find(&self, id: i32) -> Result<Option<CastOut>, sqlx::Error>;
}
