/// OpenAPI documentation for the movie service
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Movie Service API",
        version = "1.0.0",
        description = "Movie catalogue. Cast references are validated against cast-service.",
        license(name = "MIT")
    ),
    paths(
        crate::handlers::movies::create_movie,
        crate::handlers::movies::list_movies,
        crate::handlers::movies::get_movie,
        crate::handlers::movies::update_movie,
        crate::handlers::movies::delete_movie,
    ),
    components(schemas(
        crate::models::MovieIn,
        crate::models::MovieOut,
        crate::models::MovieUpdate
    )),
    tags((name = "movies", description = "Movie CRUD")),
)]
pub struct ApiDoc;
