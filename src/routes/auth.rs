// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session login/logout routes.

use axum::{extract::State, middleware, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::config::Environment;
use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, SESSION_COOKIE};
use crate::middleware::log_request;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/jwt",
            post(issue_token).route_layer(middleware::from_fn(log_request)),
        )
        .route("/logout", post(logout))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Build the session cookie.
///
/// Production front-ends live on other sites, so the cookie must be
/// `SameSite=None; Secure` there. Local development keeps it same-site.
fn session_cookie(value: String, environment: Environment) -> Cookie<'static> {
    let (same_site, secure) = if environment.is_production() {
        (SameSite::None, true)
    } else {
        (SameSite::Strict, false)
    };

    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(same_site)
        .secure(secure)
        .build()
}

/// Cookie that clears the session; attributes must match [`session_cookie`].
fn removal_cookie(environment: Environment) -> Cookie<'static> {
    let mut cookie = session_cookie(String::new(), environment);
    cookie.set_max_age(time::Duration::ZERO);
    cookie
}

/// Issue a one-hour session token for the posted identity.
///
/// The identity is not checked against stored users.
async fn issue_token(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(identity): Json<Map<String, Value>>,
) -> Result<(CookieJar, Json<SuccessResponse>)> {
    let email = identity
        .get("email")
        .and_then(Value::as_str)
        .map(str::to_string);
    tracing::info!(email = ?email, "Issuing session token");

    let token = create_jwt(identity, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    Ok((
        jar.add(session_cookie(token, state.config.environment)),
        Json(SuccessResponse { success: true }),
    ))
}

/// Clear the session cookie. Always succeeds.
async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<SuccessResponse>) {
    tracing::info!("Logging out");
    (
        jar.add(removal_cookie(state.config.environment)),
        Json(SuccessResponse { success: true }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_cookie_attributes() {
        let rendered = session_cookie("abc".to_string(), Environment::Development).to_string();
        assert!(rendered.starts_with("token=abc"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("SameSite=Strict"));
        assert!(rendered.contains("Path=/"));
        assert!(!rendered.contains("Secure"));
    }

    #[test]
    fn test_production_cookie_attributes() {
        let rendered = session_cookie("abc".to_string(), Environment::Production).to_string();
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("SameSite=None"));
        assert!(rendered.contains("Secure"));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let rendered = removal_cookie(Environment::Production).to_string();
        assert!(rendered.starts_with("token=;"));
        assert!(rendered.contains("Max-Age=0"));
        assert!(rendered.contains("SameSite=None"));
        assert!(rendered.contains("Secure"));
        assert!(rendered.contains("HttpOnly"));
    }
}
