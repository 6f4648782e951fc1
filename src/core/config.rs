//! Configuration management for the MCP server.
//!
//! Configuration is read once from the process environment (plus an optional
//! `.env` file) and is immutable afterwards. Tests build a [`Config`] directly
//! to point the server at a fake upstream.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::{Error, Result};

/// Default Tavus API base address.
pub const DEFAULT_TAVUS_BASE_URL: &str = "https://tavusapi.com/v2";

/// Upstream request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variable holding the Tavus API key.
pub const TAVUS_API_KEY_VAR: &str = "TAVUS_API_KEY";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Tavus API connection settings.
    pub tavus: TavusConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Connection settings for the Tavus REST API.
#[derive(Clone, Serialize, Deserialize)]
pub struct TavusConfig {
    /// API key sent in the `x-api-key` header of every request.
    pub api_key: String,

    /// Base address all resource paths are appended to.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for TavusConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TavusConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl TavusConfig {
    /// Create settings for the given key with the default address and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_TAVUS_BASE_URL.to_string(),
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// Override the base address (used to target a fake upstream in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Config {
    /// Create a configuration with default server and logging settings.
    pub fn new(tavus: TavusConfig) -> Self {
        Self {
            server: ServerConfig {
                name: "tavus-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            tavus,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `TAVUS_API_KEY` is required; its absence is a configuration error and
    /// the server must not start. Optional overrides: `TAVUS_API_BASE_URL`,
    /// `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var(TAVUS_API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                Error::config(format!(
                    "{TAVUS_API_KEY_VAR} environment variable is required"
                ))
            })?;

        let mut config = Self::new(TavusConfig::new(api_key));

        if let Ok(base_url) = std::env::var("TAVUS_API_BASE_URL") {
            info!("Using Tavus API base URL override: {}", base_url);
            config.tavus.base_url = base_url;
        }

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_api_key_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var(TAVUS_API_KEY_VAR, "test_key_12345");
            std::env::remove_var("TAVUS_API_BASE_URL");
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.tavus.api_key, "test_key_12345");
        assert_eq!(config.tavus.base_url, DEFAULT_TAVUS_BASE_URL);
        assert_eq!(config.tavus.timeout_secs, 30);
        unsafe {
            std::env::remove_var(TAVUS_API_KEY_VAR);
        }
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var(TAVUS_API_KEY_VAR);
        }
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains(TAVUS_API_KEY_VAR));
    }

    #[test]
    fn test_blank_api_key_is_fatal() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var(TAVUS_API_KEY_VAR, "   ");
        }
        assert!(Config::from_env().is_err());
        unsafe {
            std::env::remove_var(TAVUS_API_KEY_VAR);
        }
    }

    #[test]
    fn test_base_url_override() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var(TAVUS_API_KEY_VAR, "k");
            std::env::set_var("TAVUS_API_BASE_URL", "http://127.0.0.1:9999");
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.tavus.base_url, "http://127.0.0.1:9999");
        unsafe {
            std::env::remove_var(TAVUS_API_KEY_VAR);
            std::env::remove_var("TAVUS_API_BASE_URL");
        }
    }

    #[test]
    fn test_api_key_redacted_in_debug() {
        let tavus = TavusConfig::new("super_secret_key");
        let debug_str = format!("{:?}", tavus);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }
}
