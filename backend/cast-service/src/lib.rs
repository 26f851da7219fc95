/// Cast Service Library
///
/// Stores the actors and actresses movie-service links its movies to.
///
/// # Modules
///
/// - `db`: table definition and the cast repository
/// - `handlers`: HTTP handlers and the route set mounted under `/api/v1/casts`
/// - `models`: request and response bodies
/// - `openapi`: API documentation
pub mod db;
pub mod handlers;
pub mod models;
pub mod openapi;

use db::PgCastRepository;
use handlers::CastRoutes;
use service_runtime::ServiceTemplate;
use std::sync::Arc;

pub const SERVICE_NAME: &str = "casts";
pub const DEFAULT_PORT: u16 = 8002;

/// The cast service as a runnable template
pub fn template() -> ServiceTemplate {
    ServiceTemplate::new(SERVICE_NAME, db::schema(), DEFAULT_PORT, |pool| {
        Arc::new(CastRoutes::new(Arc::new(PgCastRepository::new(pool))))
    })
}
