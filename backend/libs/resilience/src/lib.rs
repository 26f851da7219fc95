/// Resilience patterns for the movie platform services
///
/// - **Retry**: bounded exponential backoff with optional jitter, used for the
///   startup database connect and for service-to-service HTTP calls
/// - **Timeout**: time limits on a single async operation
/// - **Presets**: pre-tuned settings per dependency type
///
/// # Example: waiting for a database to come up
///
/// ```rust,no_run
/// use resilience::{presets, with_retry};
///
/// #[tokio::main]
/// async fn main() {
///     let config = presets::database_connect_config();
///
///     let result = with_retry(config.retry.unwrap_or_default(), || async {
///         // open the pool here
///         Ok::<_, String>(())
///     })
///     .await;
///     assert!(result.is_ok());
/// }
/// ```

pub mod presets;
pub mod retry;
pub mod timeout;

pub use presets::{database_connect_config, http_internal_config, shutdown_config, ServiceConfig};
pub use retry::{with_retry, with_retry_if, RetryConfig, RetryError};
pub use timeout::{with_timeout, with_timeout_result, TimeoutConfig, TimeoutError};
