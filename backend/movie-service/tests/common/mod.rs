//! Shared fixtures: in-memory movie store and a cast client aimed at a mock server

use async_trait::async_trait;
use movie_service::config::CastServiceConfig;
use movie_service::db::MovieRepository;
use movie_service::handlers::MovieRoutes;
use movie_service::models::{MovieIn, MovieOut};
use movie_service::services::CastClient;
use resilience::RetryConfig;
use service_runtime::{ReadinessGate, RouterMount, ServiceDescriptor};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
pub struct InMemoryMovieRepository {
    movies: Mutex<Vec<MovieOut>>,
}

impl InMemoryMovieRepository {
    pub fn with_movies(movies: Vec<MovieOut>) -> Self {
        Self {
            movies: Mutex::new(movies),
        }
    }

    pub fn snapshot(&self) -> Vec<MovieOut> {
        self.movies.lock().unwrap().clone()
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn create(&self, movie: &MovieIn) -> Result<MovieOut, sqlx::Error> {
        let mut movies = self.movies.lock().unwrap();
        let created = MovieOut {
            id: movies.iter().map(|m| m.id).max().unwrap_or(0) + 1,
            name: movie.name.clone(),
            plot: movie.plot.clone(),
            genres: movie.genres.clone(),
            casts_id: movie.casts_id.clone(),
        };
        movies.push(created.clone());
        Ok(created)
    }

    async fn list(&self) -> Result<Vec<MovieOut>, sqlx::Error> {
        Ok(self.snapshot())
    }

    async fn find(&self, id: i32) -> Result<Option<MovieOut>, sqlx::Error> {
        Ok(self.movies.lock().unwrap().iter().find(|m| m.id == id).cloned())
    }

    async fn update(&self, movie: &MovieOut) -> Result<Option<MovieOut>, sqlx::Error> {
        let mut movies = self.movies.lock().unwrap();
        Ok(movies.iter_mut().find(|m| m.id == movie.id).map(|existing| {
            *existing = movie.clone();
            existing.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<Option<MovieOut>, sqlx::Error> {
        let mut movies = self.movies.lock().unwrap();
        Ok(movies
            .iter()
            .position(|m| m.id == id)
            .map(|index| movies.remove(index)))
    }
}

pub fn matrix() -> MovieOut {
    MovieOut {
        id: 1,
        name: "The Matrix".to_string(),
        plot: "A hacker learns what the Matrix is".to_string(),
        genres: vec!["sci-fi".to_string(), "action".to_string()],
        casts_id: vec![1],
    }
}

/// Cast client for `base` (a mock server URI) with fast, jitter-free retries
pub fn cast_client(base: &str) -> CastClient {
    let config = CastServiceConfig {
        host_url: format!("{base}/api/v1/casts/"),
        timeout_ms: 500,
    };
    CastClient::new(&config).unwrap().with_retry(RetryConfig {
        max_retries: 1,
        initial_backoff: Duration::from_millis(10),
        max_backoff: Duration::from_millis(10),
        backoff_multiplier: 1.0,
        jitter: false,
    })
}

pub fn movie_mount(repo: Arc<InMemoryMovieRepository>, casts: CastClient) -> RouterMount {
    let gate = ReadinessGate::new();
    gate.open();

    let mut mount = RouterMount::new(gate);
    mount
        .mount(
            ServiceDescriptor::new(movie_service::SERVICE_NAME),
            Arc::new(MovieRoutes::new(repo, casts)),
        )
        .unwrap();
    mount
}
