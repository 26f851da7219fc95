/// OpenAPI documentation for the cast service
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cast Service API",
        version = "1.0.0",
        description = "Actors and actresses referenced by movie-service.",
        license(name = "MIT")
    ),
    paths(
        crate::handlers::casts::create_cast,
        crate::handlers::casts::get_cast,
    ),
    components(schemas(crate::models::CastIn, crate::models::CastOut)),
    tags((name = "casts", description = "Cast creation and lookup")),
)]
pub struct ApiDoc;
