//! Storefront configuration loaded from environment variables.
//!
//! Every variable has a demo-friendly default so `cargo run` works with no
//! environment at all.
//!
//! # Environment Variables
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: <http://localhost:3000>)
//! - `STOREFRONT_DEFAULT_LOCALE` - Locale for `/` redirects (default: en)
//! - `STOREFRONT_CHECKOUT_DELAY_MS` - Simulated payment-processing delay
//!   (default: 3000)
//! - `STOREFRONT_CONTENT_DIR` - Markdown page directory
//!   (default: crates/storefront/content)
//! - `STOREFRONT_STATIC_DIR` - Static asset directory
//!   (default: crates/storefront/static)
//! - `GA4_MEASUREMENT_ID` - Google Analytics 4 measurement ID (optional)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::i18n::Locale;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
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
    /// Public base URL for the storefront
    pub base_url: String,
    /// Locale used when a request carries none
    pub default_locale: Locale,
    /// Simulated payment-processing delay for the mocked checkout
    pub checkout_delay_ms: u64,
    /// Directory holding per-locale markdown pages
    pub content_dir: PathBuf,
    /// Directory holding static assets (CSS, images)
    pub static_dir: PathBuf,
    /// Analytics tracking configuration
    pub analytics: AnalyticsConfig,
}

/// Analytics and tracking configuration.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsConfig {
    /// Google Analytics 4 measurement ID
    pub ga4_measurement_id: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;

        let base_url = get_env_or_default("STOREFRONT_BASE_URL", "http://localhost:3000");
        Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), e.to_string())
        })?;

        let default_locale = get_env_or_default("STOREFRONT_DEFAULT_LOCALE", "en")
            .parse::<Locale>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_DEFAULT_LOCALE".to_string(), e.to_string())
            })?;
        let checkout_delay_ms = get_env_or_default("STOREFRONT_CHECKOUT_DELAY_MS", "3000")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_CHECKOUT_DELAY_MS".to_string(), e.to_string())
            })?;

        let content_dir =
            PathBuf::from(get_env_or_default("STOREFRONT_CONTENT_DIR", "crates/storefront/content"));
        let static_dir =
            PathBuf::from(get_env_or_default("STOREFRONT_STATIC_DIR", "crates/storefront/static"));

        Ok(Self {
            host,
            port,
            base_url,
            default_locale,
            checkout_delay_ms,
            content_dir,
            static_dir,
            analytics: AnalyticsConfig::from_env(),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl AnalyticsConfig {
    fn from_env() -> Self {
        Self {
            ga4_measurement_id: get_optional_env("GA4_MEASUREMENT_ID"),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn demo_config() -> StorefrontConfig {
        StorefrontConfig {
            host: "127.0.0.1".parse().expect("valid IP"),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            default_locale: Locale::En,
            checkout_delay_ms: 0,
            content_dir: Path::new("crates/storefront/content").to_path_buf(),
            static_dir: Path::new("crates/storefront/static").to_path_buf(),
            analytics: AnalyticsConfig::default(),
        }
    }

    #[test]
    fn test_socket_addr() {
        let config = demo_config();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingEnvVar("STOREFRONT_PORT".to_string());
        assert_eq!(
            err.to_string(),
            "Missing environment variable: STOREFRONT_PORT"
        );

        let err =
            ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), "not a number".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid environment variable STOREFRONT_PORT: not a number"
        );
    }
}
