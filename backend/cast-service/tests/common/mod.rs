//! Shared fixtures: an in-memory cast store behind the real route set

use async_trait::async_trait;
use cast_service::db::CastRepository;
use cast_service::handlers::CastRoutes;
use cast_service::models::{CastIn, CastOut};
use service_runtime::{ReadinessGate, RouterMount, ServiceDescriptor};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct InMemoryCastRepository {
    casts: Mutex<Vec<CastOut>>,
}

impl InMemoryCastRepository {
    pub fn with_casts(casts: Vec<CastOut>) -> Self {
        Self {
            casts: Mutex::new(casts),
        }
    }

    pub fn len(&self) -> usize {
        self.casts.lock().unwrap().len()
    }
}

#[async_trait]
impl CastRepository for InMemoryCastRepository {
    async fn create(&self, cast: &CastIn) -> Result<CastOut, sqlx::Error> {
        let mut casts = self.casts.lock().unwrap();
        let created = CastOut {
            id: casts.iter().map(|c| c.id).max().unwrap_or(0) + 1,
            name: cast.name.clone(),
            nationality: cast.nationality.clone(),
        };
        casts.push(created.clone());
        Ok(created)
    }

    async fn find(&self, id: i32) -> Result<Option<CastOut>, sqlx::Error> {
        Ok(self.casts.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }
}

/// Cast routes mounted the way the service binary mounts them
pub fn cast_mount(repo: Arc<InMemoryCastRepository>) -> RouterMount {
    let gate = ReadinessGate::new();
    gate.open();

    let mut mount = RouterMount::new(gate);
    mount
        .mount(
            ServiceDescriptor::new(cast_service::SERVICE_NAME),
            Arc::new(CastRoutes::new(repo)),
        )
        .unwrap();
    mount
}
