//! Access-token signing and refresh-token hashing.
//!
//! An access token is a short-lived HS256 JWT carrying [`Claims`]. A refresh
//! token is an opaque random string; the database only ever sees its SHA-256
//! digest, so leaking the sessions table does not hand out usable tokens.
//!
//! This scheme replaces the legacy `X-User-Email` header, under which any
//! caller could act as any user by setting a header.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use moim_core::types::DbId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Access token lifetime in minutes when `JWT_ACCESS_EXPIRY_MINS` is unset.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
/// Refresh token lifetime in days when `JWT_REFRESH_EXPIRY_DAYS` is unset.
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

/// Payload of every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's internal database id.
    pub sub: DbId,
    /// Role name at issue time (관리자 or 팀원).
    pub role: String,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Random token id, usable for audit trails.
    pub jti: String,
}

/// Signing secret and token lifetimes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 signing secret.
    pub secret: String,
    /// Access token lifetime in minutes.
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days.
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Read `JWT_SECRET`, `JWT_ACCESS_EXPIRY_MINS`, and
    /// `JWT_REFRESH_EXPIRY_DAYS` from the environment.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is missing or empty, or if a lifetime variable
    /// is present but not a number. Tokens signed with a guessable default
    /// secret would be forgeable, so there is no fallback.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        Self {
            secret,
            access_token_expiry_mins: env_i64("JWT_ACCESS_EXPIRY_MINS", DEFAULT_ACCESS_EXPIRY_MINS),
            refresh_token_expiry_days: env_i64(
                "JWT_REFRESH_EXPIRY_DAYS",
                DEFAULT_REFRESH_EXPIRY_DAYS,
            ),
        }
    }
}

fn env_i64(name: &str, default: i64) -> i64 {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be a valid integer, got '{raw}'")),
        Err(_) => default,
    }
}

/// Sign a new access token for the given user and role.
pub fn generate_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let issued_at = Utc::now();
    let expires_at = issued_at + Duration::minutes(config.access_token_expiry_mins);

    let claims = Claims {
        sub: user_id,
        role: role.to_owned(),
        exp: expires_at.timestamp(),
        iat: issued_at.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    let key = EncodingKey::from_secret(config.secret.as_bytes());
    encode(&Header::default(), &claims, &key)
}

/// Verify an access token's signature and expiry, returning its [`Claims`].
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(config.secret.as_bytes());
    // Validation::default() is HS256 and checks exp with 60s leeway.
    decode::<Claims>(token, &key, &Validation::default()).map(|data| data.claims)
}

/// Mint a fresh refresh token as `(plaintext, sha256_hex)`.
///
/// Hand the plaintext to the client; persist only the hex digest.
pub fn generate_refresh_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let digest = hash_refresh_token(&plaintext);
    (plaintext, digest)
}

/// SHA-256 hex digest of a refresh token, for lookup against stored sessions.
pub fn hash_refresh_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
