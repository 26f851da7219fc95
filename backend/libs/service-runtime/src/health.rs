use crate::descriptor::ServiceDescriptor;
use crate::readiness::ReadinessGate;
use actix_web::{web, HttpResponse};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum ComponentStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize)]
struct HealthResponse<'a> {
    service: &'a str,
    status: ComponentStatus,
    ready: bool,
    version: &'static str,
}

pub(crate) struct HealthState {
    pub descriptor: ServiceDescriptor,
    pub gate: ReadinessGate,
}

pub(crate) async fn health_summary(state: web::Data<HealthState>) -> HttpResponse {
    let ready = state.gate.is_open();
    HttpResponse::Ok().json(HealthResponse {
        service: &state.descriptor.name,
        status: if ready {
            ComponentStatus::Healthy
        } else {
            ComponentStatus::Unhealthy
        },
        ready,
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub(crate) async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

/// 503 until the database answered at startup, and again once shutdown began
pub(crate) async fn readiness_check(state: web::Data<HealthState>) -> HttpResponse {
    if state.gate.is_open() {
        HttpResponse::Ok().json(serde_json::json!({"ready": true}))
    } else {
        HttpResponse::ServiceUnavailable().json(serde_json::json!({"ready": false}))
    }
}

pub(crate) async fn metrics() -> HttpResponse {
    match actix_middleware::render_metrics() {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4")
            .body(body),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            HttpResponse::InternalServerError().finish()
        }
    }
}
