//! Versioned router mounting
//!
//! Each service hands the runtime a [`RouteSet`]. The mount places it under
//! the descriptor's prefix together with the docs page, the OpenAPI document,
//! health probes and the metrics endpoint.

use crate::descriptor::ServiceDescriptor;
use crate::docs::{self, DocsPage};
use crate::health::{self, HealthState};
use crate::readiness::ReadinessGate;
use actix_web::web;
use std::sync::Arc;
use utoipa::openapi::OpenApi;

/// The handlers of one service, independent of where they are mounted.
///
/// Routes are registered relative to the prefix: `""` for the collection and
/// `"/{id}"` for single items.
pub trait RouteSet: Send + Sync + 'static {
    fn configure(&self, cfg: &mut web::ServiceConfig);

    fn openapi(&self) -> OpenApi;
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MountError {
    #[error("prefix {prefix} overlaps the already mounted {existing}")]
    PrefixTaken { prefix: String, existing: String },
}

#[derive(Clone)]
struct Mounted {
    descriptor: ServiceDescriptor,
    routes: Arc<dyn RouteSet>,
    openapi: Arc<OpenApi>,
    docs_page: Arc<String>,
}

#[derive(Clone)]
pub struct RouterMount {
    gate: ReadinessGate,
    mounts: Vec<Mounted>,
}

impl RouterMount {
    pub fn new(gate: ReadinessGate) -> Self {
        Self {
            gate,
            mounts: Vec::new(),
        }
    }

    /// Register `routes` under `descriptor.url_prefix`.
    ///
    /// A prefix equal to, nested in, or enclosing an existing one is rejected.
    pub fn mount(
        &mut self,
        descriptor: ServiceDescriptor,
        routes: Arc<dyn RouteSet>,
    ) -> Result<(), MountError> {
        if let Some(existing) = self
            .mounts
            .iter()
            .find(|m| prefixes_overlap(&m.descriptor.url_prefix, &descriptor.url_prefix))
        {
            return Err(MountError::PrefixTaken {
                prefix: descriptor.url_prefix.clone(),
                existing: existing.descriptor.url_prefix.clone(),
            });
        }

        let openapi = docs::service_document(&descriptor, routes.openapi());
        let docs_page = docs::render_docs_page(&descriptor);

        tracing::info!(
            service = %descriptor.name,
            prefix = %descriptor.url_prefix,
            docs = %descriptor.docs_path,
            "Router mounted"
        );

        self.mounts.push(Mounted {
            descriptor,
            routes,
            openapi: Arc::new(openapi),
            docs_page: Arc::new(docs_page),
        });
        Ok(())
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.mounts.iter().map(|m| &m.descriptor)
    }

    /// Attach every mounted service to an application
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        for mounted in &self.mounts {
            let routes = mounted.routes.clone();
            let health_state = HealthState {
                descriptor: mounted.descriptor.clone(),
                gate: self.gate.clone(),
            };

            // Fixed routes go first so `/{id}` handlers cannot shadow them
            cfg.service(
                web::scope(&mounted.descriptor.url_prefix)
                    .app_data(web::Data::new(DocsPage(mounted.docs_page.as_ref().clone())))
                    .app_data(web::Data::from(mounted.openapi.clone()))
                    .app_data(web::Data::new(health_state))
                    .route("/docs", web::get().to(docs::docs_page))
                    .route("/openapi.json", web::get().to(docs::openapi_json))
                    .route("/health", web::get().to(health::health_summary))
                    .route("/health/live", web::get().to(health::liveness_check))
                    .route("/health/ready", web::get().to(health::readiness_check))
                    .route("/metrics", web::get().to(health::metrics))
                    .configure(move |scope| routes.configure(scope)),
            );
        }
    }
}

fn prefixes_overlap(a: &str, b: &str) -> bool {
    let a = a.trim_end_matches('/');
    let b = b.trim_end_matches('/');
    a == b || is_nested(a, b) || is_nested(b, a)
}

fn is_nested(inner: &str, outer: &str) -> bool {
    inner
        .strip_prefix(outer)
        .is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_overlap_rules() {
        assert!(prefixes_overlap("/api/v1/casts", "/api/v1/casts"));
        assert!(prefixes_overlap("/api/v1/casts", "/api/v1/casts/"));
        assert!(prefixes_overlap("/api/v1/casts", "/api/v1/casts/archive"));
        assert!(prefixes_overlap("/api/v1/casts/archive", "/api/v1/casts"));
        assert!(!prefixes_overlap("/api/v1/casts", "/api/v1/castsx"));
        assert!(!prefixes_overlap("/api/v1/casts", "/api/v1/movies"));
    }
}
