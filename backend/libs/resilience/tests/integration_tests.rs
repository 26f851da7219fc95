/// Integration tests for resilience library
use resilience::{
    presets,
    retry::{with_retry, with_retry_if, RetryConfig, RetryError},
    timeout::{with_timeout_result, TimeoutError},
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[tokio::test]
async fn test_retry_waits_until_dependency_is_ready() {
    // Simulates a database that accepts connections 50ms after boot
    let ready_at = Instant::now() + Duration::from_millis(50);
    let config = RetryConfig {
        max_retries: 10,
        initial_backoff: Duration::from_millis(10),
        max_backoff: Duration::from_millis(20),
        backoff_multiplier: 2.0,
        jitter: false,
    };

    let connected_at = with_retry(config, move || async move {
        let now = Instant::now();
        if now >= ready_at {
            Ok(now)
        } else {
            Err("connection refused")
        }
    })
    .await
    .expect("dependency becomes ready within the retry budget");

    assert!(connected_at >= ready_at);
}

#[tokio::test]
async fn test_retry_each_attempt_bounded_by_timeout() {
    let config = RetryConfig {
        max_retries: 2,
        initial_backoff: Duration::from_millis(5),
        jitter: false,
        ..Default::default()
    };
    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = counter.clone();

    let result = with_retry(config, move || {
        counter_clone.fetch_add(1, Ordering::SeqCst);
        with_timeout_result(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            Ok::<_, String>(())
        })
    })
    .await;

    match result {
        Err(RetryError::Exhausted { attempts, last_error }) => {
            assert_eq!(attempts, 3);
            assert!(matches!(last_error, TimeoutError::Elapsed(_)));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_retry_if_stops_on_client_error() {
    let config = presets::http_internal_config().retry.unwrap_or_default();
    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = counter.clone();

    let result = with_retry_if(
        config,
        move || {
            let count = counter_clone.fetch_add(1, Ordering::SeqCst);
            async move {
                if count == 0 {
                    Err::<(), &str>("transport")
                } else {
                    Err("not found")
                }
            }
        },
        |e| *e == "transport",
    )
    .await;

    assert!(matches!(result, Err(RetryError::Aborted { attempt: 2, .. })));
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}
