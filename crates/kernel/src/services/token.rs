//! Session token service.
//!
//! Signs and verifies the HS256 JWT carried in the `authToken` cookie.
//! Tokens embed the user's id, email, and name and expire after one
//! hour. Verification checks signature and expiry only; the fresh
//! database read happens in the session-check route.

use anyhow::{Context, Result};
use axum::http::{HeaderMap, header};
use cookie::Cookie;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::User;

/// Name of the HTTP-only cookie carrying the session token.
pub const AUTH_COOKIE_NAME: &str = "authToken";

/// Session token lifetime in seconds (1 hour). The cookie Max-Age
/// matches so both expire together.
pub const TOKEN_LIFETIME_SECS: i64 = 3600;

/// Claims embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the user's UUID.
    pub sub: String,
    pub email: String,
    pub name: String,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// Signs and verifies session tokens with HMAC-SHA256.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    /// Create a new token service.
    ///
    /// The secret is loaded from environment configuration and must be
    /// at least 32 bytes.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Issue a signed session token for a user.
    pub fn issue(&self, user: &User) -> Result<String> {
        let iat = chrono::Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            iat,
            exp: iat + TOKEN_LIFETIME_SECS,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .context("failed to encode session token")
    }

    /// Verify a session token's signature and expiry.
    pub fn verify(&self, token: &str) -> Result<SessionClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .context("invalid or expired session token")?;

        Ok(data.claims)
    }
}

/// Extract the session token from the request's Cookie headers.
///
/// Returns `None` if no `authToken` cookie is present. Malformed cookie
/// pairs are skipped rather than treated as errors.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    for value in headers.get_all(header::COOKIE) {
        let Ok(raw) = value.to_str() else {
            continue;
        };

        for cookie in Cookie::split_parse(raw.to_string()).flatten() {
            if cookie.name() == AUTH_COOKIE_NAME {
                return Some(cookie.value().to_string());
            }
        }
    }

    None
}
