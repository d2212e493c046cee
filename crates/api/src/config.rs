//! Application configuration loaded from environment variables.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use domain::auth::{DEFAULT_BCRYPT_COST, DEFAULT_TOKEN_TTL_SECS};
use domain::{PasswordHasher, TokenKeys};
use rand::Rng;
use rand::distr::Alphanumeric;

const GENERATED_SECRET_LEN: usize = 64;

/// Tracing filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Costs bcrypt accepts.
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables (a `.env` file is loaded first if present):
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive, read by the subscriber in `main`
///   (default: [`DEFAULT_LOG_LEVEL`])
/// - `DATABASE_URL`: PostgreSQL connection string; unset selects the
///   in-memory store seeded with the default catalog
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: `5`)
/// - `JWT_SECRET`: HMAC secret for access tokens (default: random per process)
/// - `TOKEN_TTL_SECS`: access token lifetime (default: 10 days)
/// - `BCRYPT_COST`: password hashing cost, 4 to 31 (default: `10`)
#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub jwt_secret: Option<String>,
    pub token_ttl_secs: i64,
    pub bcrypt_cost: u32,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    ///
    /// Call after the tracing subscriber is installed so fallbacks are logged.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: parse_or(env("PORT"), defaults.port),
            database_url: env("DATABASE_URL"),
            database_max_connections: parse_or(
                env("DATABASE_MAX_CONNECTIONS"),
                defaults.database_max_connections,
            ),
            jwt_secret: env("JWT_SECRET"),
            token_ttl_secs: parse_or(env("TOKEN_TTL_SECS"), defaults.token_ttl_secs),
            bcrypt_cost: bcrypt_cost_or(
                parse_or(env("BCRYPT_COST"), defaults.bcrypt_cost),
                defaults.bcrypt_cost,
            ),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Builds the token keys from `JWT_SECRET`.
    ///
    /// Without a configured secret a random one is generated, so tokens do
    /// not survive a restart.
    pub fn token_keys(&self) -> TokenKeys {
        let ttl = Duration::seconds(self.token_ttl_secs);
        match &self.jwt_secret {
            Some(secret) => TokenKeys::new(secret.as_bytes(), ttl),
            None => {
                tracing::warn!("JWT_SECRET is not set; using a random secret for this process");
                TokenKeys::new(random_secret().as_bytes(), ttl)
            }
        }
    }

    pub fn password_hasher(&self) -> PasswordHasher {
        PasswordHasher::new(self.bcrypt_cost)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: None,
            database_max_connections: 5,
            jwt_secret: None,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("database_max_connections", &self.database_max_connections)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

fn env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn bcrypt_cost_or(cost: u32, default: u32) -> u32 {
    if BCRYPT_COST_RANGE.contains(&cost) {
        cost
    } else {
        tracing::warn!(cost, default, "BCRYPT_COST out of range 4..=31; using default");
        default
    }
}

fn random_secret() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_SECRET_LEN)
        .map(char::from)
        .collect()
}
