use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or};
use std::time::Duration;

/// Client settings.
///
/// Environment variables:
/// - `DINER_API_URL` (default: `http://localhost:8080`)
/// - `DINER_API_TIMEOUT_SECS` (default: 30)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

impl FromEnv for ClientConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env_or_default("DINER_API_URL", "http://localhost:8080"),
            timeout: Duration::from_secs(env_parse_or("DINER_API_TIMEOUT_SECS", 30u64)?),
        })
    }
}
