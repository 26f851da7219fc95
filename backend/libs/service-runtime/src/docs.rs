//! API documentation routes
//!
//! The docs page is a Swagger UI shell loaded from the CDN; it fetches the
//! service's document from `openapi_path`, optionally overridden with an
//! `?openapi_url=` query parameter.

use crate::descriptor::ServiceDescriptor;
use actix_web::{web, HttpResponse};
use utoipa::openapi::tag::TagBuilder;
use utoipa::openapi::{OpenApi, OpenApiBuilder, PathItem};

pub(crate) struct DocsPage(pub String);

pub(crate) fn render_docs_page(descriptor: &ServiceDescriptor) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{name} service API</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {{
            const query = new URLSearchParams(window.location.search);
            SwaggerUIBundle({{
                url: query.get("openapi_url") || "{openapi_path}",
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [SwaggerUIBundle.presets.apis],
            }});
        }};
    </script>
</body>
</html>"#,
        name = descriptor.name,
        openapi_path = descriptor.openapi_path,
    )
}

pub(crate) async fn docs_page(page: web::Data<DocsPage>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page.0.clone())
}

pub(crate) async fn openapi_json(doc: web::Data<OpenApi>) -> actix_web::Result<HttpResponse> {
    let body = serde_json::to_string(&**doc).map_err(|e| {
        tracing::error!("OpenAPI serialization failed: {}", e);
        actix_web::error::ErrorInternalServerError("OpenAPI serialization error")
    })?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}

/// Rebase a handler set's document under the service prefix.
///
/// Paths become absolute (`/` turns into `/api/v1/casts/`) and every
/// operation is grouped under the descriptor's tag first.
pub(crate) fn service_document(descriptor: &ServiceDescriptor, doc: OpenApi) -> OpenApi {
    let info = doc.info.clone();
    let mut nested = OpenApiBuilder::new()
        .info(info)
        .build()
        .nest(descriptor.url_prefix.as_str(), doc);

    for item in nested.paths.paths.values_mut() {
        tag_operations(item, &descriptor.tag);
    }

    let tags = nested.tags.get_or_insert_with(Vec::new);
    if !tags.iter().any(|t| t.name == descriptor.tag) {
        tags.insert(0, TagBuilder::new().name(descriptor.tag.as_str()).build());
    }

    nested
}

fn tag_operations(item: &mut PathItem, tag: &str) {
    let operations = [
        item.get.as_mut(),
        item.put.as_mut(),
        item.post.as_mut(),
        item.delete.as_mut(),
        item.patch.as_mut(),
    ];

    for operation in operations.into_iter().flatten() {
        let tags = operation.tags.get_or_insert_with(Vec::new);
        if !tags.iter().any(|t| t == tag) {
            tags.insert(0, tag.to_string());
        }
    }
}
