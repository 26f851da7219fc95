/// Database access for movies
mod movie_repo;

pub use movie_repo::PgMovieRepository;

use crate::models::{MovieIn, MovieOut};
use async_trait::async_trait;
use db_pool::{SchemaDefinition, TableDefinition};

pub const MOVIES_TABLE: TableDefinition = TableDefinition::new(
    "movies",
    r#"
    CREATE TABLE IF NOT EXISTS movies (
        id SERIAL PRIMARY KEY,
        name VARCHAR(50) NOT NULL,
        plot VARCHAR(250) NOT NULL,
        genres TEXT[] NOT NULL DEFAULT '{}',
        casts_id INTEGER[] NOT NULL DEFAULT '{}'
    )
    "#,
);

pub fn schema() -> SchemaDefinition {
    SchemaDefinition::new([MOVIES_TABLE])
}

#[async_trait]
pub trait MovieRepository: Send + Sync + 'static {
    async fn create(&self, movie: &MovieIn) -> Result<MovieOut, sqlx::Error>;

    async fn list(&self) -> Result<Vec<MovieOut>, sqlx::Error>;

    async fn find(&self, id: i32) -> Result<Option<MovieOut>, sqlx::Error>;

    /// Overwrite every column of an existing movie; `None` when it is gone
    async fn update(&self, movie: &MovieOut) -> Result<Option<MovieOut>, sqlx::Error>;

    /// Remove a movie and return what was deleted
    async fn delete(&self, id: i32) -> Result<Option<MovieOut>, sqlx::Error>;
}
