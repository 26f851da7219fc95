/// HTTP handlers for movie-service
pub mod movies;

use crate::db::MovieRepository;
use crate::openapi::ApiDoc;
use crate::services::CastClient;
use actix_web::web;
use service_runtime::RouteSet;
use std::sync::Arc;
use utoipa::OpenApi;

/// Movie endpoints, relative to `/api/v1/movies`
pub struct MovieRoutes {
    repo: Arc<dyn MovieRepository>,
    casts: web::Data<CastClient>,
}

impl MovieRoutes {
    pub fn new(repo: Arc<dyn MovieRepository>, casts: CastClient) -> Self {
        Self {
            repo,
            casts: web::Data::new(casts),
        }
    }
}

impl RouteSet for MovieRoutes {
    fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.repo.clone()))
            .app_data(self.casts.clone())
            .service(
                web::resource("")
                    .route(web::get().to(movies::list_movies))
                    .route(web::post().to(movies::create_movie)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(movies::get_movie))
                    .route(web::put().to(movies::update_movie))
                    .route(web::delete().to(movies::delete_movie)),
            );
    }

    fn openapi(&self) -> utoipa::openapi::OpenApi {
        ApiDoc::openapi()
    }
}
