//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Record store
//! See [`wellness_way_store::config`]: `RECORD_STORE_BACKEND`,
//! `RECORD_STORE_URL`, `RECORD_STORE_API_KEY`, `RECORD_STORE_TIMEOUT_SECS`.
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_THEME` - `wellness` (default) or `classic`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use wellness_way_store::StoreConfig;
use wellness_way_store::config::{get_env_or_default, get_optional_env, parse_var};

pub use wellness_way_store::ConfigError;

/// Visual theme for the public pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Soft gradients and glass cards.
    #[default]
    Wellness,
    /// Plain search-results look.
    Classic,
}

impl Theme {
    /// Class put on `<body>`; the stylesheet keys every themed rule off it.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Wellness => "theme-wellness",
            Self::Classic => "theme-classic",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wellness" => Ok(Self::Wellness),
            "classic" => Ok(Self::Classic),
            other => Err(format!("unknown theme '{other}' (expected wellness or classic)")),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Wellness => "wellness",
            Self::Classic => "classic",
        })
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Visual theme
    pub theme: Theme,
    /// Record store connection
    pub store: StoreConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "production", "staging")
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the store API key fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = parse_var(
            "STOREFRONT_PORT",
            &get_env_or_default("STOREFRONT_PORT", "3000"),
            3000_u16,
        )?;
        let theme = parse_var(
            "STOREFRONT_THEME",
            &get_env_or_default("STOREFRONT_THEME", ""),
            Theme::default(),
        )?;

        Ok(Self {
            host,
            port,
            theme,
            store: StoreConfig::from_env()?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Loopback defaults over the in-memory store.
    #[must_use]
    pub const fn local(theme: Theme) -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            theme,
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parse() {
        assert_eq!("wellness".parse::<Theme>().unwrap(), Theme::Wellness);
        assert_eq!(" Classic ".parse::<Theme>().unwrap(), Theme::Classic);
        assert!("neon".parse::<Theme>().is_err());
    }

    #[test]
    fn test_theme_blank_uses_default() {
        let theme = parse_var("STOREFRONT_THEME", "", Theme::default()).unwrap();
        assert_eq!(theme, Theme::Wellness);
    }

    #[test]
    fn test_theme_css_class() {
        assert_eq!(Theme::Wellness.css_class(), "theme-wellness");
        assert_eq!(Theme::Classic.css_class(), "theme-classic");
    }

    #[test]
    fn test_local_socket_addr() {
        let config = StorefrontConfig::local(Theme::Classic);
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
    }
}
