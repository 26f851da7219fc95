use super::MovieRepository;
use crate::models::{MovieIn, MovieOut};
use async_trait::async_trait;
use sqlx::PgPool;

const MOVIE_COLUMNS: &str = "id, name, plot, genres, casts_id";

pub struct PgMovieRepository {
    pool: PgPool,
}

impl PgMovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieRepository for PgMovieRepository {
    async fn create(&self, movie: &MovieIn) -> Result<MovieOut, sqlx::Error> {
        sqlx::query_as::<_, MovieOut>(&format!(
            "INSERT INTO movies (name, plot, genres, casts_id) VALUES ($1, $2, $3, $4) \
             RETURNING {MOVIE_COLUMNS}"
        ))
        .bind(&movie.name)
        .bind(&movie.plot)
        .bind(&movie.genres)
        .bind(&movie.casts_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn list(&self) -> Result<Vec<MovieOut>, sqlx::Error> {
        sqlx::query_as::<_, MovieOut>(&format!("SELECT {MOVIE_COLUMNS} FROM movies ORDER BY id"))
            .fetch_all(&self.pool)
            .await
    }

    async fn find(&self, id: i32) -> Result<Option<MovieOut>, sqlx::Error> {
        sqlx::query_as::<_, MovieOut>(&format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update(&self, movie: &MovieOut) -> Result<Option<MovieOut>, sqlx::Error> {
        sqlx::query_as::<_, MovieOut>(&format!(
            "UPDATE movies SET name = $2, plot = $3, genres = $4, casts_id = $5 \
             WHERE id = $1 RETURNING {MOVIE_COLUMNS}"
        ))
        .bind(movie.id)
        .bind(&movie.name)
        .bind(&movie.plot)
        .bind(&movie.genres)
        .bind(&movie.casts_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete(&self, id: i32) -> Result<Option<MovieOut>, sqlx::Error> {
        sqlx::query_as::<_, MovieOut>(&format!(
            "DELETE FROM movies WHERE id = $1 RETURNING {MOVIE_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }
}
