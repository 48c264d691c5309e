//! Application settings loaded from environment variables.
//!
//! The signing secret must stay the same for as long as any issued token is
//! meant to be honoured: changing it invalidates every outstanding session.

use std::env;
use std::str::FromStr;

use jsonwebtoken::Algorithm;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_ALGORITHM, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_TOKEN_TTL_HOURS, MAX_TOKEN_TTL_HOURS, MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub jwt_algorithm: Algorithm,
    pub token_ttl_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub cookie_secure: bool,
    pub seed_on_startup: bool,
    pub allow_peer_manager_edits: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_algorithm", &self.jwt_algorithm)
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("cookie_secure", &self.cookie_secure)
            .field("seed_on_startup", &self.seed_on_startup)
            .field("allow_peer_manager_edits", &self.allow_peer_manager_edits)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Returns `AppError::Config` if `JWT_SECRET` is missing in a release
    /// build, shorter than the minimum length, or if any value fails to parse.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            Err(_) => {
                return Err(AppError::config(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };

        let algorithm = env::var("JWT_ALGORITHM").unwrap_or_else(|_| DEFAULT_JWT_ALGORITHM.to_string());

        let config = Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            jwt_algorithm: parse_algorithm(&algorithm)?,
            token_ttl_hours: parse_var("TOKEN_TTL_HOURS", DEFAULT_TOKEN_TTL_HOURS)?,
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: parse_var("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            cookie_secure: parse_var("COOKIE_SECURE", false)?,
            seed_on_startup: parse_var("SEED_ON_STARTUP", true)?,
            allow_peer_manager_edits: parse_var("ALLOW_PEER_MANAGER_EDITS", true)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Build a configuration around an explicit secret, with defaults for
    /// everything else. Used by tests and embedding callers.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            jwt_secret: secret.into(),
            jwt_algorithm: Algorithm::HS256,
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            cookie_secure: false,
            seed_on_startup: true,
            allow_peer_manager_edits: true,
        }
    }

    fn validate(&self) -> AppResult<()> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::config(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&self.token_ttl_hours) {
            return Err(AppError::config(format!(
                "TOKEN_TTL_HOURS must be between 1 and {}",
                MAX_TOKEN_TTL_HOURS
            )));
        }
        Ok(())
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Only symmetric HMAC algorithms are usable with a shared secret.
fn parse_algorithm(name: &str) -> AppResult<Algorithm> {
    let algorithm = Algorithm::from_str(name)
        .map_err(|_| AppError::config(format!("Unknown JWT_ALGORITHM '{}'", name)))?;

    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        other => Err(AppError::config(format!(
            "JWT_ALGORITHM {:?} is not an HMAC algorithm",
            other
        ))),
    }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> AppResult<T> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::config(format!("Invalid value for {}: '{}'", key, raw))),
        Err(_) => Ok(default),
    }
}
