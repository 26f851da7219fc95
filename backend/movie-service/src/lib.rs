/// Movie Service Library
///
/// Movie catalogue whose entries reference casts owned by cast-service.
///
/// # Modules
///
/// - `config`: cast-service connection settings
/// - `db`: table definition and the movie repository
/// - `handlers`: HTTP handlers and the route set mounted under `/api/v1/movies`
/// - `models`: request and response bodies
/// - `openapi`: API documentation
/// - `services`: the cast-service client
pub mod config;
pub mod db;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod services;

use config::CastServiceConfig;
use db::PgMovieRepository;
use handlers::MovieRoutes;
use service_runtime::{ConfigError, ServiceTemplate};
use services::CastClient;
use std::sync::Arc;

pub const SERVICE_NAME: &str = "movies";
pub const DEFAULT_PORT: u16 = 8001;

/// The movie service as a runnable template
pub fn template() -> Result<ServiceTemplate, ConfigError> {
    let cast_config = CastServiceConfig::from_env()?;
    let casts = CastClient::new(&cast_config).map_err(|e| ConfigError::Invalid(e.to_string()))?;

    tracing::info!(cast_service = %cast_config.host_url, "Using cast-service");

    Ok(ServiceTemplate::new(
        SERVICE_NAME,
        db::schema(),
        DEFAULT_PORT,
        move |pool| Arc::new(MovieRoutes::new(Arc::new(PgMovieRepository::new(pool)), casts)),
    ))
}
