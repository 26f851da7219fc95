/// Movie handlers
///
/// Create and update verify every referenced cast against cast-service
/// before touching the database.
use crate::db::MovieRepository;
use crate::models::{MovieIn, MovieOut, MovieUpdate};
use crate::services::CastClient;
use actix_middleware::get_correlation_id;
use actix_web::{web, HttpRequest, HttpResponse};
use service_runtime::error::{AppError, Result};

fn movie_not_found() -> AppError {
    AppError::NotFound("Movie not found".to_string())
}

async fn ensure_casts_exist(casts: &CastClient, req: &HttpRequest, ids: &[i32]) -> Result<()> {
    let correlation_id = get_correlation_id(req);
    let mut checked = Vec::with_capacity(ids.len());
    for &id in ids {
        if checked.contains(&id) {
            continue;
        }
        if !casts.cast_exists(id, correlation_id.as_deref()).await? {
            return Err(AppError::NotFound(format!("Cast with id:{id} not found")));
        }
        checked.push(id);
    }
    Ok(())
}

/// Create a movie
#[utoipa::path(
    post,
    path = "/",
    tag = "movies",
    request_body = MovieIn,
    responses(
        (status = 201, description = "Movie created", body = MovieOut),
        (status = 404, description = "A referenced cast does not exist"),
        (status = 502, description = "cast-service unreachable"),
    )
)]
pub async fn create_movie(
    req: HttpRequest,
    repo: web::Data<dyn MovieRepository>,
    casts: web::Data<CastClient>,
    payload: web::Json<MovieIn>,
) -> Result<HttpResponse> {
    ensure_casts_exist(&casts, &req, &payload.casts_id).await?;

    let movie = repo.create(&payload).await?;
    tracing::info!(movie_id = movie.id, "Movie created");
    Ok(HttpResponse::Created().json(movie))
}

/// List every movie
#[utoipa::path(
    get,
    path = "/",
    tag = "movies",
    responses((status = 200, description = "All movies", body = [MovieOut]))
)]
pub async fn list_movies(repo: web::Data<dyn MovieRepository>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(repo.list().await?))
}

/// Fetch a movie by id
#[utoipa::path(
    get,
    path = "/{id}/",
    tag = "movies",
    params(("id" = i32, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Movie found", body = MovieOut),
        (status = 404, description = "Movie not found"),
    )
)]
pub async fn get_movie(
    repo: web::Data<dyn MovieRepository>,
    id: web::Path<i32>,
) -> Result<HttpResponse> {
    let movie = repo
        .find(id.into_inner())
        .await?
        .ok_or_else(movie_not_found)?;
    Ok(HttpResponse::Ok().json(movie))
}

/// Partially update a movie
#[utoipa::path(
    put,
    path = "/{id}/",
    tag = "movies",
    params(("id" = i32, Path, description = "Movie id")),
    request_body = MovieUpdate,
    responses(
        (status = 200, description = "Movie updated", body = MovieOut),
        (status = 404, description = "Movie or referenced cast not found"),
        (status = 502, description = "cast-service unreachable"),
    )
)]
pub async fn update_movie(
    req: HttpRequest,
    repo: web::Data<dyn MovieRepository>,
    casts: web::Data<CastClient>,
    id: web::Path<i32>,
    payload: web::Json<MovieUpdate>,
) -> Result<HttpResponse> {
    let mut movie = repo
        .find(id.into_inner())
        .await?
        .ok_or_else(movie_not_found)?;

    if let Some(casts_id) = &payload.casts_id {
        ensure_casts_exist(&casts, &req, casts_id).await?;
    }

    payload.apply_to(&mut movie);
    let updated = repo.update(&movie).await?.ok_or_else(movie_not_found)?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Delete a movie
#[utoipa::path(
    delete,
    path = "/{id}/",
    tag = "movies",
    params(("id" = i32, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Deleted movie", body = MovieOut),
        (status = 404, description = "Movie not found"),
    )
)]
pub async fn delete_movie(
    repo: web::Data<dyn MovieRepository>,
    id: web::Path<i32>,
) -> Result<HttpResponse> {
    let movie = repo
        .delete(id.into_inner())
        .await?
        .ok_or_else(movie_not_found)?;
    tracing::info!(movie_id = movie.id, "Movie deleted");
    Ok(HttpResponse::Ok().json(movie))
}
