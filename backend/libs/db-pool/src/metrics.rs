//! Prometheus metrics for the database connection pool
//!
//! Pool gauges, acquisition latency and startup connect attempts, all labeled
//! by service so both services can share one registry in tests.

use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge_vec, HistogramVec,
    IntCounterVec, IntGaugeVec,
};
use sqlx::{pool::PoolConnection, PgPool, Postgres};
use std::time::Instant;

lazy_static::lazy_static! {
    /// Pool connection count by state (idle/active/max)
    static ref DB_POOL_CONNECTIONS: IntGaugeVec = register_int_gauge_vec!(
        "db_pool_connections",
        "Database pool connection count by state",
        &["service", "state"]
    ).expect("Prometheus metrics registration should succeed at startup");

    static ref DB_POOL_ACQUIRE_DURATION: HistogramVec = register_histogram_vec!(
        "db_pool_acquire_duration_seconds",
        "Time to acquire connection from pool",
        &["service"],
        vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]
    ).expect("Prometheus metrics registration should succeed at startup");

    static ref DB_POOL_ACQUIRE_ERRORS: IntCounterVec = register_int_counter_vec!(
        "db_pool_acquire_errors_total",
        "Connection acquisition errors by type",
        &["service", "error_type"]
    ).expect("Prometheus metrics registration should succeed at startup");

    /// Startup connect attempts by outcome (success/failure)
    static ref DB_CONNECT_ATTEMPTS: IntCounterVec = register_int_counter_vec!(
        "db_connect_attempts_total",
        "Database connect attempts made while a service starts",
        &["service", "outcome"]
    ).expect("Prometheus metrics registration should succeed at startup");
}

pub(crate) fn update_pool_metrics(pool: &PgPool, service: &str) {
    let size = pool.size() as i64;
    let idle = pool.num_idle() as i64;

    DB_POOL_CONNECTIONS
        .with_label_values(&[service, "idle"])
        .set(idle);
    DB_POOL_CONNECTIONS
        .with_label_values(&[service, "active"])
        .set((size - idle).max(0));
    DB_POOL_CONNECTIONS
        .with_label_values(&[service, "max"])
        .set(pool.options().get_max_connections() as i64);
}

/// Record one startup connect attempt
pub fn record_connect_attempt(service: &str, success: bool) {
    let outcome = if success { "success" } else { "failure" };
    DB_CONNECT_ATTEMPTS
        .with_label_values(&[service, outcome])
        .inc();
}

/// Acquire a connection from the pool and record latency and error metrics
pub async fn acquire_with_metrics(
    pool: &PgPool,
    service: &str,
) -> Result<PoolConnection<Postgres>, sqlx::Error> {
    let start = Instant::now();
    let result = pool.acquire().await;

    DB_POOL_ACQUIRE_DURATION
        .with_label_values(&[service])
        .observe(start.elapsed().as_secs_f64());

    if let Err(e) = &result {
        let error_type = match e {
            sqlx::Error::PoolTimedOut => "timeout",
            sqlx::Error::PoolClosed => "closed",
            _ => "other",
        };
        DB_POOL_ACQUIRE_ERRORS
            .with_label_values(&[service, error_type])
            .inc();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_attempts_are_counted_per_outcome() {
        let before_ok = DB_CONNECT_ATTEMPTS
            .with_label_values(&["metrics-test", "success"])
            .get();
        let before_err = DB_CONNECT_ATTEMPTS
            .with_label_values(&["metrics-test", "failure"])
            .get();

        record_connect_attempt("metrics-test", false);
        record_connect_attempt("metrics-test", false);
        record_connect_attempt("metrics-test", true);

        assert_eq!(
            DB_CONNECT_ATTEMPTS
                .with_label_values(&["metrics-test", "success"])
                .get(),
            before_ok + 1
        );
        assert_eq!(
            DB_CONNECT_ATTEMPTS
                .with_label_values(&["metrics-test", "failure"])
                .get(),
            before_err + 2
        );
    }
}
