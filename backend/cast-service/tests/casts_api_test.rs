mod common;

use actix_web::middleware::NormalizePath;
use actix_web::{test, App};
use cast_service::models::CastOut;
use common::{cast_mount, InMemoryCastRepository};
use serde_json::json;
use std::sync::Arc;

macro_rules! cast_app {
    ($repo:expr) => {{
        let mount = cast_mount($repo);
        test::init_service(
            App::new()
                .wrap(NormalizePath::trim())
                .configure(|cfg| mount.configure(cfg)),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_create_cast_returns_201_with_id() {
    let repo = Arc::new(InMemoryCastRepository::default());
    let app = cast_app!(repo.clone());

    let req = test::TestRequest::post()
        .uri("/api/v1/casts/")
        .set_json(json!({"name": "Keanu Reeves", "nationality": "Canadian"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let cast: CastOut = test::read_body_json(resp).await;
    assert_eq!(cast.id, 1);
    assert_eq!(cast.name, "Keanu Reeves");
    assert_eq!(cast.nationality.as_deref(), Some("Canadian"));
    assert_eq!(repo.len(), 1);
}

#[actix_web::test]
async fn test_nationality_is_optional() {
    let app = cast_app!(Arc::new(InMemoryCastRepository::default()));

    let req = test::TestRequest::post()
        .uri("/api/v1/casts")
        .set_json(json!({"name": "Carrie-Anne Moss"}))
        .to_request();
    let cast: CastOut = test::call_and_read_body_json(&app, req).await;

    assert_eq!(cast.nationality, None);
}

#[actix_web::test]
async fn test_malformed_body_is_rejected() {
    let repo = Arc::new(InMemoryCastRepository::default());
    let app = cast_app!(repo.clone());

    let req = test::TestRequest::post()
        .uri("/api/v1/casts/")
        .set_json(json!({"nationality": "Canadian"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    assert_eq!(repo.len(), 0);
}

#[actix_web::test]
async fn test_get_cast_by_id() {
    let repo = Arc::new(InMemoryCastRepository::with_casts(vec![CastOut {
        id: 7,
        name: "Laurence Fishburne".to_string(),
        nationality: Some("American".to_string()),
    }]));
    let app = cast_app!(repo);

    let req = test::TestRequest::get().uri("/api/v1/casts/7/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let cast: CastOut = test::read_body_json(resp).await;
    assert_eq!(cast.name, "Laurence Fishburne");
}

#[actix_web::test]
async fn test_missing_cast_returns_404_message() {
    let app = cast_app!(Arc::new(InMemoryCastRepository::default()));

    let req = test::TestRequest::get().uri("/api/v1/casts/42/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Cast not found");
    assert_eq!(body["status"], 404);
}

#[actix_web::test]
async fn test_nonexistent_path_is_404_and_service_stays_healthy() {
    let app = cast_app!(Arc::new(InMemoryCastRepository::default()));

    let req = test::TestRequest::get()
        .uri("/api/v1/casts/nonexistent")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    let req = test::TestRequest::get()
        .uri("/api/v1/casts/health/ready")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);
}

#[actix_web::test]
async fn test_docs_reference_cast_openapi_document() {
    let app = cast_app!(Arc::new(InMemoryCastRepository::default()));

    let req = test::TestRequest::get().uri("/api/v1/casts/docs").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body = test::read_body(resp).await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains(r#"query.get("openapi_url") || "/api/v1/casts/openapi.json""#));

    let req = test::TestRequest::get()
        .uri("/api/v1/casts/openapi.json")
        .to_request();
    let doc: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert!(doc["paths"].get("/api/v1/casts/").is_some());
    assert!(doc["paths"].get("/api/v1/casts/{id}/").is_some());
    assert!(doc["components"]["schemas"].get("CastIn").is_some());
}

#[actix_web::test]
async fn test_template_serves_casts_prefix() {
    let template = cast_service::template();

    assert_eq!(template.descriptor().url_prefix, "/api/v1/casts");
    assert_eq!(template.descriptor().docs_path, "/api/v1/casts/docs");
    assert!(template.schema().validate().is_ok());
}
