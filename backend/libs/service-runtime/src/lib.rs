//! Shared runtime for the movie platform services
//!
//! A service supplies a name, its tables and a handler set; the runtime does
//! the rest: schema creation, readiness-gated database connect, versioned
//! routing with docs, health and metrics, and graceful shutdown.
//!
//! ```no_run
//! use service_runtime::{RouteSet, ServiceTemplate};
//! # fn schema() -> db_pool::SchemaDefinition { unimplemented!() }
//! # fn routes(pool: sqlx::PgPool) -> std::sync::Arc<dyn RouteSet> { unimplemented!() }
//!
//! #[actix_web::main]
//! async fn main() {
//!     let template = ServiceTemplate::new("casts", schema(), 8002, routes);
//!     if let Err(e) = template.run().await {
//!         tracing::error!(error = %e, "service failed");
//!         std::process::exit(1);
//!     }
//! }
//! ```

pub mod config;
pub mod descriptor;
mod docs;
pub mod error;
mod health;
pub mod lifecycle;
pub mod mount;
pub mod readiness;
pub mod server;
pub mod telemetry;

pub use config::{AppConfig, ConfigError, ConnectRetrySettings, ServerConfig};
pub use descriptor::ServiceDescriptor;
pub use error::AppError;
pub use lifecycle::{ConnectionLifecycle, LifecycleError};
pub use mount::{MountError, RouteSet, RouterMount};
pub use readiness::ReadinessGate;
pub use server::{ServiceTemplate, StartupError};
