/// Movie Service
///
/// Serves `/api/v1/movies` with interactive docs at `/api/v1/movies/docs`.
#[actix_web::main]
async fn main() {
    dotenvy::dotenv().ok();
    service_runtime::telemetry::init_tracing();

    let template = match movie_service::template() {
        Ok(template) => template,
        Err(e) => {
            tracing::error!(error = %e, "movie-service configuration invalid");
            std::process::exit(1);
        }
    };

    if let Err(e) = template.run().await {
        tracing::error!(error = %e, "movie-service failed");
        std::process::exit(1);
    }
}
