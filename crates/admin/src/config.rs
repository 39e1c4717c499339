//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Record store
//! See [`wellness_way_store::config`]: `RECORD_STORE_BACKEND`,
//! `RECORD_STORE_URL`, `RECORD_STORE_API_KEY`, `RECORD_STORE_TIMEOUT_SECS`.
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `ADMIN_STOREFRONT_URL` - Target of the "Back to Home" link
//!   (default: <http://localhost:3000>)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//!
//! There is no login. Keep `ADMIN_HOST` on loopback or a private network.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use url::Url;
use wellness_way_store::StoreConfig;
use wellness_way_store::config::{get_env_or_default, get_optional_env, parse_var};

pub use wellness_way_store::ConfigError;

const DEFAULT_STOREFRONT_URL: &str = "http://localhost:3000";

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public site URL for the "Back to Home" link, validated as http(s)
    pub storefront_url: String,
    /// Record store connection
    pub store: StoreConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "production", "staging")
    pub sentry_environment: Option<String>,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is invalid or the record store
    /// settings fail to load.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = parse_var(
            "ADMIN_PORT",
            &get_env_or_default("ADMIN_PORT", "3001"),
            3001_u16,
        )?;
        let storefront_url = parse_storefront_url(&get_env_or_default(
            "ADMIN_STOREFRONT_URL",
            DEFAULT_STOREFRONT_URL,
        ))?;

        Ok(Self {
            host,
            port,
            storefront_url,
            store: StoreConfig::from_env()?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Loopback defaults over the in-memory store.
    #[must_use]
    pub fn local() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3001,
            storefront_url: DEFAULT_STOREFRONT_URL.to_string(),
            store: StoreConfig::Memory,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_storefront_url(raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw).map_err(|e| {
        ConfigError::InvalidEnvVar("ADMIN_STOREFRONT_URL".to_string(), e.to_string())
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "ADMIN_STOREFRONT_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url.into())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_storefront_url() {
        let url = parse_storefront_url("https://wholesomewellnessway.com").unwrap();
        assert_eq!(url, "https://wholesomewellnessway.com/");

        assert!(matches!(
            parse_storefront_url("javascript:alert(1)"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(parse_storefront_url("not a url").is_err());
    }

    #[test]
    fn test_local_defaults() {
        let config = AdminConfig::local();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3001");
        assert_eq!(config.storefront_url, "http://localhost:3000");
        assert_eq!(
            config.store.backend(),
            wellness_way_store::BackendKind::Memory
        );
    }
}
