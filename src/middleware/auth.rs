// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT session authentication.
//!
//! Sessions are stateless: the token carries the identity the client logged in
//! with and is valid for one hour. Nothing is stored server-side.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

/// Session lifetime in seconds.
pub const SESSION_TTL_SECS: u64 = 60 * 60;

/// Claims reserved for the token itself; stripped from the login identity.
const RESERVED_CLAIMS: &[&str] = &["exp", "iat", "nbf"];

/// JWT claims structure: the login identity plus timing claims.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    #[serde(flatten)]
    pub identity: Map<String, Value>,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at (Unix timestamp)
    pub iat: u64,
}

/// Authenticated caller extracted from the session token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// `email` from the login identity, when it was a string
    pub email: Option<String>,
    pub identity: Map<String, Value>,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        let email = claims
            .identity
            .get("email")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self {
            email,
            identity: claims.identity,
        }
    }
}

fn unix_now() -> anyhow::Result<u64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

/// Create a session token for a login identity, valid for one hour.
pub fn create_jwt(identity: Map<String, Value>, signing_key: &[u8]) -> anyhow::Result<String> {
    create_jwt_at(identity, signing_key, unix_now()?)
}

/// Create a session token as if issued at `issued_at` (Unix seconds).
pub fn create_jwt_at(
    mut identity: Map<String, Value>,
    signing_key: &[u8],
    issued_at: u64,
) -> anyhow::Result<String> {
    for claim in RESERVED_CLAIMS {
        identity.remove(*claim);
    }

    let claims = Claims {
        identity,
        iat: issued_at,
        exp: issued_at + SESSION_TTL_SECS,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

/// Verify signature and expiry of a session token.
pub fn verify_jwt(token: &str, signing_key: &[u8]) -> Result<Claims, AppError> {
    let key = DecodingKey::from_secret(signing_key);
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!(error = %e, "Session token rejected");
            AppError::InvalidToken
        })
}

/// Middleware that requires a valid session cookie.
///
/// On success the caller's [`AuthUser`] is inserted into request extensions.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(AppError::Unauthorized)?;

    let claims = verify_jwt(&token, &state.config.jwt_signing_key)?;
    let auth_user = AuthUser::from(claims);
    tracing::debug!(email = ?auth_user.email, "Session token verified");

    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const KEY: &[u8] = b"test_signing_key_32_bytes_long!!";

    fn identity(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_roundtrip_keeps_identity() {
        let token = create_jwt(identity(json!({ "email": "a@x.com", "name": "A" })), KEY).unwrap();
        let claims = verify_jwt(&token, KEY).unwrap();

        assert_eq!(claims.identity.get("email"), Some(&json!("a@x.com")));
        assert_eq!(claims.identity.get("name"), Some(&json!("A")));
        assert_eq!(claims.exp - claims.iat, SESSION_TTL_SECS);
        assert_eq!(AuthUser::from(claims).email.as_deref(), Some("a@x.com"));
    }

    #[test]
    fn test_empty_identity_still_signs() {
        let token = create_jwt(Map::new(), KEY).unwrap();
        let user = AuthUser::from(verify_jwt(&token, KEY).unwrap());
        assert!(user.email.is_none());
        assert!(user.identity.is_empty());
    }

    #[test]
    fn test_reserved_claims_are_not_client_controlled() {
        let token = create_jwt(
            identity(json!({ "email": "a@x.com", "exp": 9999999999u64 })),
            KEY,
        )
        .unwrap();
        let claims = verify_jwt(&token, KEY).unwrap();
        assert_eq!(claims.exp - claims.iat, SESSION_TTL_SECS);
        assert!(!claims.identity.contains_key("exp"));
    }

    #[test]
    fn test_expired_token_rejected() {
        let issued_at = unix_now().unwrap() - SESSION_TTL_SECS - 1;
        let token = create_jwt_at(identity(json!({ "email": "a@x.com" })), KEY, issued_at).unwrap();
        assert!(matches!(verify_jwt(&token, KEY), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_wrong_key_rejected() {
        let token = create_jwt(identity(json!({ "email": "a@x.com" })), KEY).unwrap();
        assert!(matches!(
            verify_jwt(&token, b"another_key_entirely_32_bytes!!!"),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            verify_jwt("not.a.token", KEY),
            Err(AppError::InvalidToken)
        ));
    }
}
