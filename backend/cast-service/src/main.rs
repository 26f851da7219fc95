/// Cast Service
///
/// Serves `/api/v1/casts` with interactive docs at `/api/v1/casts/docs`.
#[actix_web::main]
async fn main() {
    if let Err(e) = cast_service::template().run().await {
        tracing::error!(error = %e, "cast-service failed");
        std::process::exit(1);
    }
}
