//! Routing under the versioned prefix, docs, health and 404 handling

use actix_web::middleware::NormalizePath;
use actix_web::{test, web, App, HttpResponse};
use service_runtime::{MountError, ReadinessGate, RouteSet, RouterMount, ServiceDescriptor};
use std::sync::Arc;
use utoipa::OpenApi;

/// List widgets
#[utoipa::path(get, path = "/", responses((status = 200, description = "All widgets")))]
async fn list_widgets() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!([]))
}

/// Fetch one widget
#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = i32, Path, description = "Widget id")),
    responses((status = 200, description = "The widget"))
)]
async fn get_widget(id: web::Path<i32>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "id": id.into_inner() }))
}

#[derive(OpenApi)]
#[openapi(paths(list_widgets, get_widget), info(title = "Widget Service API", version = "1.0.0"))]
struct WidgetDoc;

struct WidgetRoutes;

impl RouteSet for WidgetRoutes {
    fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.service(web::resource("").route(web::get().to(list_widgets)))
            .service(web::resource("/{id}").route(web::get().to(get_widget)));
    }

    fn openapi(&self) -> utoipa::openapi::OpenApi {
        WidgetDoc::openapi()
    }
}

fn widget_mount(gate: ReadinessGate) -> RouterMount {
    let mut mount = RouterMount::new(gate);
    mount
        .mount(ServiceDescriptor::new("widgets"), Arc::new(WidgetRoutes))
        .unwrap();
    mount
}

macro_rules! widget_app {
    ($mount:expr) => {{
        let mount = $mount;
        test::init_service(
            App::new()
                .wrap(NormalizePath::trim())
                .configure(|cfg| mount.configure(cfg)),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_docs_page_references_openapi_document() {
    let app = widget_app!(widget_mount(ReadinessGate::new()));

    let req = test::TestRequest::get().uri("/api/v1/widgets/docs").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains(r#"query.get("openapi_url") || "/api/v1/widgets/openapi.json""#));
}

#[actix_web::test]
async fn test_openapi_paths_are_nested_and_tagged() {
    let app = widget_app!(widget_mount(ReadinessGate::new()));

    let req = test::TestRequest::get()
        .uri("/api/v1/widgets/openapi.json")
        .to_request();
    let doc: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(doc["info"]["title"], "Widget Service API");
    assert!(doc["paths"].get("/api/v1/widgets/").is_some());
    assert_eq!(doc["paths"]["/api/v1/widgets/{id}"]["get"]["tags"][0], "widgets");
    assert_eq!(doc["tags"][0]["name"], "widgets");
}

#[actix_web::test]
async fn test_handlers_are_reachable_with_and_without_trailing_slash() {
    let app = widget_app!(widget_mount(ReadinessGate::new()));

    for uri in ["/api/v1/widgets", "/api/v1/widgets/", "/api/v1/widgets/7/"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200, "GET {uri}");
    }
}

#[actix_web::test]
async fn test_unknown_paths_return_404_and_service_stays_up() {
    let app = widget_app!(widget_mount(ReadinessGate::new()));

    for uri in ["/api/v1/widgets/nonexistent", "/api/v2/widgets", "/"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404, "GET {uri}");
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/widgets/health/live")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_readiness_follows_the_gate() {
    let gate = ReadinessGate::new();
    let app = widget_app!(widget_mount(gate.clone()));

    let req = test::TestRequest::get()
        .uri("/api/v1/widgets/health/ready")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 503);

    gate.open();
    let req = test::TestRequest::get()
        .uri("/api/v1/widgets/health/ready")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::get()
        .uri("/api/v1/widgets/health")
        .to_request();
    let health: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(health["service"], "widgets");
    assert_eq!(health["status"], "healthy");

    gate.close();
    let req = test::TestRequest::get()
        .uri("/api/v1/widgets/health/ready")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 503);
}

#[actix_web::test]
async fn test_metrics_endpoint_serves_prometheus_text() {
    let app = widget_app!(widget_mount(ReadinessGate::new()));

    let req = test::TestRequest::get()
        .uri("/api/v1/widgets/metrics")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    assert!(resp
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
}

#[actix_web::test]
async fn test_overlapping_prefixes_are_rejected() {
    let mut mount = widget_mount(ReadinessGate::new());

    let err = mount
        .mount(ServiceDescriptor::new("widgets"), Arc::new(WidgetRoutes))
        .unwrap_err();
    assert_eq!(
        err,
        MountError::PrefixTaken {
            prefix: "/api/v1/widgets".to_string(),
            existing: "/api/v1/widgets".to_string(),
        }
    );

    assert!(mount
        .mount(ServiceDescriptor::new("widgets/archive"), Arc::new(WidgetRoutes))
        .is_err());
    assert!(mount
        .mount(ServiceDescriptor::new("gadgets"), Arc::new(WidgetRoutes))
        .is_ok());
    assert_eq!(mount.descriptors().count(), 2);
}
