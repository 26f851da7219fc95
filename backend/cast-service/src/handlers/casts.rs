/// Cast handlers
use crate::db::CastRepository;
use crate::models::{CastIn, CastOut};
use actix_web::{web, HttpResponse};
use service_runtime::error::{AppError, Result};

/// Create a cast member
#[utoipa::path(
    post,
    path = "/",
    tag = "casts",
    request_body = CastIn,
    responses(
        (status = 201, description = "Cast created", body = CastOut),
        (status = 400, description = "Malformed body"),
    )
)]
pub async fn create_cast(
    repo: web::Data<dyn CastRepository>,
    payload: web::Json<CastIn>,
) -> Result<HttpResponse> {
    let cast = repo.create(&payload).await?;
    tracing::info!(cast_id = cast.id, "Cast created");
    Ok(HttpResponse::Created().json(cast))
}

/// Fetch a cast member by id
#[utoipa::path(
    get,
    path = "/{id}/",
    tag = "casts",
    params(("id" = i32, Path, description = "Cast id")),
    responses(
        (status = 200, description = "Cast found", body = CastOut),
        (status = 404, description = "Cast not found"),
    )
)]
pub async fn get_cast(
    repo: web::Data<dyn CastRepository>,
    id: web::Path<i32>,
) -> Result<HttpResponse> {
    let cast = repo
        .find(id.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Cast not found".to_string()))?;

    Ok(HttpResponse::Ok().json(cast))
}
