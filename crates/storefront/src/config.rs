//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `VITRINA_HOST` - Bind address (default: 127.0.0.1)
//! - `VITRINA_PORT` - Listen port (default: 3000)
//! - `VITRINA_CATALOG` - Catalog URL or file path (default: productos.json)
//! - `VITRINA_STORAGE_DIR` - Directory holding the persisted cart (default: .vitrina)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0-1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::CatalogSource;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "3000";
const DEFAULT_CATALOG: &str = "productos.json";
const DEFAULT_STORAGE_DIR: &str = ".vitrina";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Where the product catalog is loaded from
    pub catalog: CatalogSource,
    /// Directory for the durable cart slot
    pub storage_dir: PathBuf,
    /// Sentry error tracking
    pub sentry: SentryConfig,
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SentryConfig {
    /// Sentry DSN; tracking is disabled when unset
    pub dsn: Option<String>,
    /// Environment name reported with events
    pub environment: Option<String>,
    /// Error event sample rate
    pub sample_rate: f32,
    /// Performance transaction sample rate
    pub traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = parse_var("VITRINA_HOST", &get_or("VITRINA_HOST", DEFAULT_HOST))?;
        let port = parse_var("VITRINA_PORT", &get_or("VITRINA_PORT", DEFAULT_PORT))?;
        let catalog = CatalogSource::parse(&get_or("VITRINA_CATALOG", DEFAULT_CATALOG))
            .map_err(|e| ConfigError::InvalidEnvVar("VITRINA_CATALOG".to_string(), e.to_string()))?;
        let storage_dir = PathBuf::from(get_or("VITRINA_STORAGE_DIR", DEFAULT_STORAGE_DIR));

        let sentry = SentryConfig {
            dsn: lookup("SENTRY_DSN").filter(|v| !v.is_empty()),
            environment: lookup("SENTRY_ENVIRONMENT"),
            sample_rate: parse_rate("SENTRY_SAMPLE_RATE", lookup("SENTRY_SAMPLE_RATE"), 1.0)?,
            traces_sample_rate: parse_rate(
                "SENTRY_TRACES_SAMPLE_RATE",
                lookup("SENTRY_TRACES_SAMPLE_RATE"),
                0.0,
            )?,
        };

        Ok(Self {
            host,
            port,
            catalog,
            storage_dir,
            sentry,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a sample rate, which must lie in `0.0..=1.0`.
fn parse_rate(key: &str, value: Option<String>, default: f32) -> Result<f32, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    let rate: f32 = parse_var(key, &value)?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ));
    }
    Ok(rate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(
            config.catalog,
            CatalogSource::File(PathBuf::from("productos.json"))
        );
        assert_eq!(config.storage_dir, PathBuf::from(".vitrina"));
        assert!(config.sentry.dsn.is_none());
        assert!((config.sentry.sample_rate - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_remote_catalog() {
        let config = load(&[("VITRINA_CATALOG", "https://example.com/productos.json")]).unwrap();
        assert!(matches!(config.catalog, CatalogSource::Remote(_)));
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("VITRINA_PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "VITRINA_PORT"));
    }

    #[test]
    fn test_invalid_host() {
        assert!(load(&[("VITRINA_HOST", "localhost:80")]).is_err());
    }

    #[test]
    fn test_sample_rate_out_of_range() {
        let err = load(&[("SENTRY_TRACES_SAMPLE_RATE", "1.5")]).unwrap_err();
        assert!(err.to_string().contains("SENTRY_TRACES_SAMPLE_RATE"));
    }

    #[test]
    fn test_empty_dsn_disables_sentry() {
        let config = load(&[("SENTRY_DSN", "")]).unwrap();
        assert!(config.sentry.dsn.is_none());
    }
}
