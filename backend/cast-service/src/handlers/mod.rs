/// HTTP handlers for cast-service
pub mod casts;

use crate::db::CastRepository;
use crate::openapi::ApiDoc;
use actix_web::web;
use service_runtime::RouteSet;
use std::sync::Arc;
use utoipa::OpenApi;

/// Cast endpoints, relative to `/api/v1/casts`
pub struct CastRoutes {
    repo: Arc<dyn CastRepository>,
}

impl CastRoutes {
    pub fn new(repo: Arc<dyn CastRepository>) -> Self {
        Self { repo }
    }
}

impl RouteSet for CastRoutes {
    fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.repo.clone()))
            .service(web::resource("").route(web::post().to(casts::create_cast)))
            .service(web::resource("/{id}").route(web::get().to(casts::get_cast)));
    }

    fn openapi(&self) -> utoipa::openapi::OpenApi {
        ApiDoc::openapi()
    }
}
