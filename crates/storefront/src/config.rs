//! Store selector configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STORE_SELECT_DATABASE_URL` - Commerce `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`)
//! - `STORE_SELECT_BASE_URL` - Public URL for the storefront
//!
//! ## Optional
//! - `STORE_SELECT_HOST` - Bind address (default: 127.0.0.1)
//! - `STORE_SELECT_PORT` - Listen port (default: 3000)
//! - `STORE_SELECT_COOKIE_NAME` - Selection cookie name (default: `store_id`)
//! - `STORE_SELECT_COOKIE_MAX_AGE_DAYS` - Selection cookie lifetime (default: 365)
//! - `STORE_SELECT_RESOLVERS` - Ordered resolver chain (default: `cookie,default`)
//! - `STORE_SELECT_ANONYMOUS_PERMISSIONS` - Comma-separated permissions granted
//!   to anonymous visitors (default: `access content`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use store_selector_core::Permission;

/// Default name of the selection cookie.
pub const DEFAULT_COOKIE_NAME: &str = "store_id";

/// Default selection cookie lifetime (one year, the platform default for visitor cookies).
pub const DEFAULT_COOKIE_MAX_AGE_DAYS: i64 = 365;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// A strategy that can be registered in the current-store resolver chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverKind {
    /// Store named by the selection cookie.
    Cookie,
    /// Platform default store.
    Default,
}

impl FromStr for ResolverKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cookie" => Ok(Self::Cookie),
            "default" => Ok(Self::Default),
            other => Err(format!("unknown resolver '{other}' (expected cookie or default)")),
        }
    }
}

/// Selection cookie settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieConfig {
    /// Cookie name.
    pub name: String,
    /// Lifetime in days.
    pub max_age_days: i64,
    /// Whether to set the `Secure` attribute.
    pub secure: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_COOKIE_NAME.to_string(),
            max_age_days: DEFAULT_COOKIE_MAX_AGE_DAYS,
            secure: false,
        }
    }
}

/// Store selector application configuration.
#[derive(Debug, Clone)]
pub struct StoreSelectConfig {
    /// Commerce `PostgreSQL` connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Selection cookie settings
    pub cookie: CookieConfig,
    /// Resolver chain, in priority order
    pub resolvers: Vec<ResolverKind>,
    /// Permissions granted to anonymous visitors
    pub anonymous_permissions: Vec<Permission>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl StoreSelectConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("STORE_SELECT_DATABASE_URL")?;
        let host = get_env_or_default("STORE_SELECT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STORE_SELECT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STORE_SELECT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STORE_SELECT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_required_env("STORE_SELECT_BASE_URL")?;
        let secure = is_secure_base_url(&base_url)?;

        let max_age_days = get_env_or_default(
            "STORE_SELECT_COOKIE_MAX_AGE_DAYS",
            &DEFAULT_COOKIE_MAX_AGE_DAYS.to_string(),
        )
        .parse::<i64>()
        .ok()
        .filter(|days| *days > 0)
        .ok_or_else(|| {
            ConfigError::InvalidEnvVar(
                "STORE_SELECT_COOKIE_MAX_AGE_DAYS".to_string(),
                "must be a positive number of days".to_string(),
            )
        })?;

        let cookie = CookieConfig {
            name: get_env_or_default("STORE_SELECT_COOKIE_NAME", DEFAULT_COOKIE_NAME),
            max_age_days,
            secure,
        };
        validate_cookie_name(&cookie.name)?;

        let resolvers =
            parse_resolvers(&get_env_or_default("STORE_SELECT_RESOLVERS", "cookie,default"))?;
        let anonymous_permissions = parse_permissions(&get_env_or_default(
            "STORE_SELECT_ANONYMOUS_PERMISSIONS",
            Permission::ACCESS_CONTENT,
        ));

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            cookie,
            resolvers,
            anonymous_permissions,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
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

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Whether cookies should carry the `Secure` attribute for this base URL.
fn is_secure_base_url(base_url: &str) -> Result<bool, ConfigError> {
    let url = Url::parse(base_url).map_err(|e| {
        ConfigError::InvalidEnvVar("STORE_SELECT_BASE_URL".to_string(), e.to_string())
    })?;
    match url.scheme() {
        "https" => Ok(true),
        "http" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            "STORE_SELECT_BASE_URL".to_string(),
            format!("unsupported scheme '{other}'"),
        )),
    }
}

/// Cookie names are RFC 6265 tokens.
fn validate_cookie_name(name: &str) -> Result<(), ConfigError> {
    let valid = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b));
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar(
            "STORE_SELECT_COOKIE_NAME".to_string(),
            format!("'{name}' is not a valid cookie name"),
        ))
    }
}

/// Parse the resolver chain, rejecting unknown and duplicate entries.
fn parse_resolvers(value: &str) -> Result<Vec<ResolverKind>, ConfigError> {
    let mut resolvers = Vec::new();
    for entry in value.split(',').filter(|s| !s.trim().is_empty()) {
        let kind = entry
            .parse::<ResolverKind>()
            .map_err(|e| ConfigError::InvalidEnvVar("STORE_SELECT_RESOLVERS".to_string(), e))?;
        if resolvers.contains(&kind) {
            return Err(ConfigError::InvalidEnvVar(
                "STORE_SELECT_RESOLVERS".to_string(),
                format!("resolver '{}' listed twice", entry.trim()),
            ));
        }
        resolvers.push(kind);
    }
    Ok(resolvers)
}

/// Parse a comma-separated permission list.
fn parse_permissions(value: &str) -> Vec<Permission> {
    value
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(Permission::new)
        .collect()
}
