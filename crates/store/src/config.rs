//! Record store configuration loaded from environment variables.
//!
//! Both binaries talk to the same store and read the same variables.
//!
//! # Environment Variables
//!
//! - `RECORD_STORE_BACKEND` - `postgrest` (default) or `memory`
//! - `RECORD_STORE_URL` - Project URL (required for `postgrest`)
//! - `RECORD_STORE_API_KEY` - API key (required for `postgrest`, high entropy)
//! - `RECORD_STORE_TIMEOUT_SECS` - Per-request timeout (default: 30)
//!
//! The env helpers are public so each binary's own config loader reads its
//! variables the same way.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::error::StoreError;
use crate::memory::MemoryStore;
use crate::postgrest::{PostgrestConfig, PostgrestStore};
use crate::store::RecordStore;

const DEFAULT_TIMEOUT_SECS: &str = "30";
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Prefixes of common placeholder values (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Which adapter serves reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    #[default]
    Postgrest,
    Memory,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgrest" | "supabase" => Ok(Self::Postgrest),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown backend '{other}' (expected postgrest or memory)")),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Postgrest => "postgrest",
            Self::Memory => "memory",
        })
    }
}

/// Resolved record store settings.
#[derive(Debug, Clone)]
pub enum StoreConfig {
    Postgrest(PostgrestConfig),
    Memory,
}

impl StoreConfig {
    /// Load store settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing, a value does
    /// not parse, or the API key looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load store settings through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`StoreConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend = parse_var::<BackendKind>(
            "RECORD_STORE_BACKEND",
            &lookup("RECORD_STORE_BACKEND").unwrap_or_default(),
            BackendKind::default(),
        )?;

        match backend {
            BackendKind::Memory => Ok(Self::Memory),
            BackendKind::Postgrest => {
                let raw_url = lookup("RECORD_STORE_URL")
                    .ok_or_else(|| ConfigError::MissingEnvVar("RECORD_STORE_URL".to_string()))?;
                let url = Url::parse(&raw_url).map_err(|e| {
                    ConfigError::InvalidEnvVar("RECORD_STORE_URL".to_string(), e.to_string())
                })?;

                let api_key = lookup("RECORD_STORE_API_KEY").ok_or_else(|| {
                    ConfigError::MissingEnvVar("RECORD_STORE_API_KEY".to_string())
                })?;
                validate_secret_strength(&api_key, "RECORD_STORE_API_KEY")?;

                let timeout_secs = lookup("RECORD_STORE_TIMEOUT_SECS")
                    .unwrap_or_else(|| DEFAULT_TIMEOUT_SECS.to_string())
                    .parse::<u64>()
                    .map_err(|e| {
                        ConfigError::InvalidEnvVar(
                            "RECORD_STORE_TIMEOUT_SECS".to_string(),
                            e.to_string(),
                        )
                    })?;

                Ok(Self::Postgrest(PostgrestConfig {
                    url,
                    api_key: SecretString::from(api_key),
                    timeout: Duration::from_secs(timeout_secs),
                }))
            }
        }
    }

    #[must_use]
    pub const fn backend(&self) -> BackendKind {
        match self {
            Self::Postgrest(_) => BackendKind::Postgrest,
            Self::Memory => BackendKind::Memory,
        }
    }

    /// Build the adapter these settings describe.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Config` if the HTTP client cannot be built.
    pub fn connect(&self) -> Result<Arc<dyn RecordStore>, StoreError> {
        match self {
            Self::Postgrest(config) => Ok(Arc::new(PostgrestStore::new(config)?)),
            Self::Memory => Ok(Arc::new(MemoryStore::new())),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable. Empty values count as unset.
#[must_use]
pub fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
#[must_use]
pub fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a variable's value, falling back to `default` when it is blank.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` naming `key` if the value does not parse.
pub fn parse_var<T>(key: &str, value: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    if value.trim().is_empty() {
        return Ok(default);
    }
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // key lengths are tiny
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Three non-empty base64url segments with a JSON header (`eyJ` is `{"`).
fn looks_like_jwt(secret: &str) -> bool {
    let segments: Vec<&str> = secret.split('.').collect();
    segments.len() == 3
        && secret.starts_with("eyJ")
        && segments.iter().all(|segment| {
            !segment.is_empty()
                && segment
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        })
}

/// Reject secrets that look like placeholders or have too little entropy.
///
/// # Errors
///
/// Returns `ConfigError::InsecureSecret` naming `var_name`.
pub fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    // A JWT's base64url segments can spell anything; only entropy applies.
    if !looks_like_jwt(secret) {
        let lower = secret.trim().to_lowercase();
        if let Some(pattern) = PLACEHOLDER_PATTERNS
            .iter()
            .find(|pattern| lower.starts_with(**pattern))
        {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (starts with '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}
