//! Session token signing and validation.
//!
//! Tokens are compact JWS strings (`header.payload.signature`) signed with
//! the process-wide symmetric secret. Rotating the secret invalidates every
//! token issued before the rotation.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::domain::AccountId;
use crate::errors::{AppError, AppResult};

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account id, as a string
    pub sub: String,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
}

/// Why a token was rejected. Never fatal; callers map it to
/// `AppError::Unauthenticated`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("signature does not verify")]
    BadSignature,
    #[error("subject claim missing or not an account id")]
    InvalidSubject,
    #[error("malformed token")]
    Malformed,
}

/// A freshly signed token plus its lifetime.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub value: String,
    pub ttl: Duration,
}

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    default_ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.algorithm)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: &[u8], algorithm: Algorithm, default_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            default_ttl,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.jwt_secret_bytes(),
            config.jwt_algorithm,
            Duration::try_hours(config.token_ttl_hours).unwrap_or(Duration::MAX),
        )
    }

    /// Issue a token with the configured default lifetime.
    pub fn issue(&self, account_id: AccountId) -> AppResult<IssuedToken> {
        self.issue_with_ttl(account_id, self.default_ttl)
    }

    /// Issue a token that expires `ttl` from now.
    pub fn issue_with_ttl(&self, account_id: AccountId, ttl: Duration) -> AppResult<IssuedToken> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::internal("Token lifetime out of range"))?;

        let claims = Claims {
            sub: account_id.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let value = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Token creation error: {}", e)))?;

        Ok(IssuedToken { value, ttl })
    }

    /// Check signature and expiry against this process's wall clock, with
    /// no leeway, and return the account id the token was issued for.
    pub fn validate(&self, token: &str) -> Result<AccountId, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            let reason = match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                ErrorKind::MissingRequiredClaim(_) => TokenError::InvalidSubject,
                _ => TokenError::Malformed,
            };
            tracing::debug!(%reason, "Rejected session token");
            reason
        })?;

        data.claims
            .sub
            .parse::<AccountId>()
            .map_err(|_| TokenError::InvalidSubject)
    }
}
