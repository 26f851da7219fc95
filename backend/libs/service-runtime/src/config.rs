/// Configuration management
use db_pool::{DbConfig, DbConfigError};
use resilience::RetryConfig;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid environment configuration: {0}")]
    Env(#[from] envy::Error),

    #[error(transparent)]
    Database(#[from] DbConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// HTTP server settings (`HOST`, `PORT`, `WORKERS`, `SHUTDOWN_TIMEOUT_SECS`, `APP_ENV`)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    /// Falls back to the service's default port when unset
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,
    #[serde(default = "default_app_env")]
    pub app_env: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_workers() -> usize {
    4
}

fn default_shutdown_timeout_secs() -> u64 {
    resilience::shutdown_config().timeout.duration.as_secs()
}

fn default_app_env() -> String {
    "development".to_string()
}

impl ServerConfig {
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }
}

/// Database connect retry settings, read with the `DB_CONNECT_` prefix
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ConnectRetrySettings {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

fn default_max_retries() -> u32 {
    10
}

fn default_initial_backoff_ms() -> u64 {
    500
}

fn default_max_backoff_ms() -> u64 {
    10_000
}

impl Default for ConnectRetrySettings {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

impl ConnectRetrySettings {
    /// Retry policy built on the database connect preset
    pub fn retry_config(&self) -> RetryConfig {
        let preset = resilience::database_connect_config()
            .retry
            .unwrap_or_default();

        RetryConfig {
            max_retries: self.max_retries,
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
            ..preset
        }
    }
}

/// Everything a service process reads from its environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub connect_retry: ConnectRetrySettings,
    pub database: DbConfig,
}

impl AppConfig {
    /// Read the configuration, honouring a `.env` file when present
    pub fn from_env(service_name: &str) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let server: ServerConfig = envy::from_env()?;
        if server.workers == 0 {
            return Err(ConfigError::Invalid("WORKERS must be at least 1".to_string()));
        }

        let connect_retry: ConnectRetrySettings = envy::prefixed("DB_CONNECT_").from_env()?;
        if connect_retry.initial_backoff_ms > connect_retry.max_backoff_ms {
            return Err(ConfigError::Invalid(format!(
                "DB_CONNECT_INITIAL_BACKOFF_MS ({}) exceeds DB_CONNECT_MAX_BACKOFF_MS ({})",
                connect_retry.initial_backoff_ms, connect_retry.max_backoff_ms
            )));
        }

        let database = DbConfig::from_env(service_name)?;

        Ok(Self {
            server,
            connect_retry,
            database,
        })
    }
}
