//! # Actix Middleware Library
//!
//! Middleware shared by the movie platform Actix services
//!
//! ## Modules
//! - `metrics`: Prometheus request metrics and the text exposition helper
//! - `correlation_id`: X-Correlation-ID propagation

pub mod correlation_id;
pub mod metrics;

pub use correlation_id::{get_correlation_id, CorrelationIdMiddleware, CORRELATION_ID_HEADER};
pub use metrics::{render_metrics, MetricsMiddleware};
