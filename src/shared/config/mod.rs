//! Application configuration module
//!
//! Configuration is read once at startup and never mutated afterwards. The
//! signing secret in particular is handed to the token codec at construction;
//! rotating it means restarting the process.
//!
//! # Environment
//!
//! | Variable         | Default                          |
//! |------------------|----------------------------------|
//! | `APP_ENV`        | `development`                    |
//! | `JWT_SECRET`     | required in production           |
//! | `TOKEN_TTL_SECS` | `3600`                           |
//! | `BCRYPT_COST`    | `bcrypt::DEFAULT_COST`           |
//! | `DATABASE_URL`   | `sqlite://stockroom.db?mode=rwc` |
//! | `SERVER_PORT`    | `5000`                           |
//! | `CORS_ORIGIN`    | `http://localhost:3000`          |

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Default session validity window (one hour)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600);

/// Default listen port
pub const DEFAULT_PORT: u16 = 5000;

/// Default SQLite database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite://stockroom.db?mode=rwc";

/// Default origin allowed to make credentialed requests
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Secret used when none is configured outside production
const DEVELOPMENT_JWT_SECRET: &str = "stockroom-development-secret";

/// Deployment mode
///
/// Decides the transmission flags of the session cookie. Only production
/// requires the cookie to travel over TLS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeploymentMode {
    #[default]
    Development,
    Production,
}

impl DeploymentMode {
    /// Whether session cookies carry the `Secure` attribute
    pub fn secure_cookies(self) -> bool {
        match self {
            Self::Development => false,
            Self::Production => true,
        }
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

impl FromStr for DeploymentMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ConfigError::InvalidValue {
                key: "APP_ENV",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Production => f.write_str("production"),
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    /// Deployment mode (controls cookie confidentiality)
    pub deployment: DeploymentMode,
    /// Symmetric secret used to sign session tokens
    pub jwt_secret: String,
    /// Validity window of issued tokens and of the session cookie
    pub token_ttl: Duration,
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
    /// SQLite connection URL
    pub database_url: String,
    /// Listen port
    pub port: u16,
    /// Origin allowed to send credentialed cross-origin requests
    pub cors_origin: String,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("deployment", &self.deployment)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("database_url", &self.database_url)
            .field("port", &self.port)
            .field("cors_origin", &self.cors_origin)
            .finish()
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// `from_env` is this function over `std::env::var`; tests pass a map
    /// instead of mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(mode) = lookup("APP_ENV") {
            builder = builder.deployment(mode.parse()?);
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(ttl) = lookup("TOKEN_TTL_SECS") {
            let secs = parse_number::<u64>("TOKEN_TTL_SECS", &ttl)?;
            builder = builder.token_ttl(Duration::from_secs(secs));
        }
        if let Some(cost) = lookup("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse_number("BCRYPT_COST", &cost)?);
        }
        if let Some(url) = lookup("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(port) = lookup("SERVER_PORT") {
            builder = builder.port(parse_number("SERVER_PORT", &port)?);
        }
        if let Some(origin) = lookup("CORS_ORIGIN") {
            builder = builder.cors_origin(origin);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if self.token_ttl.is_zero() || i64::try_from(self.token_ttl.as_secs()).is_err() {
            return Err(ConfigError::InvalidValue {
                key: "TOKEN_TTL_SECS",
                value: self.token_ttl.as_secs().to_string(),
            });
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }
        Ok(())
    }
}

fn parse_number<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    deployment: Option<DeploymentMode>,
    jwt_secret: Option<String>,
    token_ttl: Option<Duration>,
    bcrypt_cost: Option<u32>,
    database_url: Option<String>,
    port: Option<u16>,
    cors_origin: Option<String>,
}

impl AppConfigBuilder {
    pub fn deployment(mut self, mode: DeploymentMode) -> Self {
        self.deployment = Some(mode);
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = Some(ttl);
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origin = Some(origin.into());
        self
    }

    /// Build the configuration
    ///
    /// Production refuses to start without an explicit `JWT_SECRET`.
    /// Development falls back to a fixed secret and says so in the log.
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let deployment = self.deployment.unwrap_or_default();

        let jwt_secret = match self.jwt_secret {
            Some(secret) => secret,
            None if deployment.is_production() => {
                return Err(ConfigError::MissingValue("JWT_SECRET"));
            }
            None => {
                tracing::warn!("JWT_SECRET not set, using the development secret");
                DEVELOPMENT_JWT_SECRET.to_string()
            }
        };

        let config = AppConfig {
            deployment,
            jwt_secret,
            token_ttl: self.token_ttl.unwrap_or(DEFAULT_TOKEN_TTL),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(bcrypt::DEFAULT_COST),
            database_url: self
                .database_url
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            port: self.port.unwrap_or(DEFAULT_PORT),
            cors_origin: self
                .cors_origin
                .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}
