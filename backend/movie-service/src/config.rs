/// cast-service connection settings (`CAST_SERVICE_HOST_URL`, `CAST_SERVICE_TIMEOUT_MS`)
use serde::Deserialize;
use service_runtime::ConfigError;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CastServiceConfig {
    /// Base URL a cast id is appended to
    #[serde(default = "default_host_url")]
    pub host_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_host_url() -> String {
    "http://localhost:8002/api/v1/casts/".to_string()
}

fn default_timeout_ms() -> u64 {
    resilience::http_internal_config().timeout.duration.as_millis() as u64
}

impl Default for CastServiceConfig {
    fn default() -> Self {
        Self {
            host_url: default_host_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl CastServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config: Self = envy::prefixed("CAST_SERVICE_").from_env()?;
        if config.host_url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "CAST_SERVICE_HOST_URL must not be empty".to_string(),
            ));
        }
        if !config.host_url.ends_with('/') {
            config.host_url.push('/');
        }
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
