/// Preset configurations for the dependencies a service talks to
use crate::retry::RetryConfig;
use crate::timeout::TimeoutConfig;
use std::time::Duration;

/// Configuration bundle for a dependency type
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub timeout: TimeoutConfig,
    pub retry: Option<RetryConfig>,
}

/// Opening the database pool at startup
///
/// - Timeout: 5s per attempt (verification query)
/// - Retry: 10 attempts, 500ms doubling up to 10s
///
/// Covers a database container that is still initializing when the service boots.
pub fn database_connect_config() -> ServiceConfig {
    ServiceConfig {
        timeout: TimeoutConfig {
            duration: Duration::from_secs(5),
        },
        retry: Some(RetryConfig {
            max_retries: 10,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            jitter: true,
        }),
    }
}

/// Internal HTTP calls between platform services
///
/// - Timeout: 5s
/// - Retry: 2 attempts on transport errors only (GET lookups are idempotent)
pub fn http_internal_config() -> ServiceConfig {
    ServiceConfig {
        timeout: TimeoutConfig {
            duration: Duration::from_secs(5),
        },
        retry: Some(RetryConfig {
            max_retries: 2,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(1),
            backoff_multiplier: 2.0,
            jitter: true,
        }),
    }
}

/// Releasing resources on shutdown
///
/// - Timeout: 10s
/// - No retry (a failed close is logged, termination proceeds)
pub fn shutdown_config() -> ServiceConfig {
    ServiceConfig {
        timeout: TimeoutConfig {
            duration: Duration::from_secs(10),
        },
        retry: None,
    }
}
