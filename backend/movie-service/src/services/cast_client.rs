//! HTTP client for cast-service lookups
//!
//! Transport failures (connect errors, timeouts) are retried with backoff;
//! any HTTP answer is final. A 404 means the cast does not exist. The
//! caller's correlation id travels along as `x-correlation-id`.

use crate::config::CastServiceConfig;
use actix_middleware::CORRELATION_ID_HEADER;
use reqwest::StatusCode;
use resilience::{with_retry_if, RetryConfig, RetryError};
use service_runtime::AppError;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum CastClientError {
    #[error("cast-service unreachable after {attempts} attempts: {source}")]
    Unreachable {
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("cast-service answered {status} for cast {id}")]
    UnexpectedStatus { id: i32, status: StatusCode },

    #[error("failed to build cast-service client: {0}")]
    Build(#[source] reqwest::Error),
}

impl From<CastClientError> for AppError {
    fn from(e: CastClientError) -> Self {
        warn!(error = %e, "cast-service lookup failed");
        match e {
            CastClientError::Build(_) => AppError::Internal(e.to_string()),
            CastClientError::Unreachable { .. } | CastClientError::UnexpectedStatus { .. } => {
                AppError::Upstream(e.to_string())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct CastClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl CastClient {
    pub fn new(config: &CastServiceConfig) -> Result<Self, CastClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(CastClientError::Build)?;

        Ok(Self {
            http,
            base_url: config.host_url.clone(),
            retry: resilience::http_internal_config()
                .retry
                .unwrap_or_default(),
        })
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn cast_url(&self, id: i32) -> String {
        format!("{}{}", self.base_url, id)
    }

    /// Whether cast-service knows a cast with this id
    pub async fn cast_exists(
        &self,
        id: i32,
        correlation_id: Option<&str>,
    ) -> Result<bool, CastClientError> {
        let url = self.cast_url(id);

        let response = with_retry_if(
            self.retry.clone(),
            || {
                let mut request = self.http.get(&url);
                if let Some(correlation_id) = correlation_id {
                    request = request.header(CORRELATION_ID_HEADER, correlation_id);
                }
                request.send()
            },
            |e: &reqwest::Error| e.is_connect() || e.is_timeout(),
        )
        .await
        .map_err(|e: RetryError<reqwest::Error>| CastClientError::Unreachable {
            attempts: e.attempts(),
            source: e.into_inner(),
        })?;

        let status = response.status();
        debug!(cast_id = id, status = %status, "cast-service lookup");

        if status.is_success() {
            Ok(true)
        } else if status == StatusCode::NOT_FOUND {
            Ok(false)
        } else {
            Err(CastClientError::UnexpectedStatus { id, status })
        }
    }
}
