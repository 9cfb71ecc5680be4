// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use serde_json::{Map, Value};
use serene_stays::config::{Config, Environment};
use serene_stays::db::MongoDb;
use serene_stays::middleware::auth::create_jwt;
use serene_stays::routes::create_router;
use serene_stays::AppState;
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test app over the in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    create_test_app_in(Environment::Development)
}

/// Create a test app for a specific deployment environment.
#[allow(dead_code)]
pub fn create_test_app_in(environment: Environment) -> (Router, Arc<AppState>) {
    let mut config = Config::test_default();
    config.environment = environment;

    let state = Arc::new(AppState {
        config,
        db: MongoDb::new_in_memory(),
    });

    (create_router(state.clone()), state)
}

/// Send one request through a clone of the router.
#[allow(dead_code)]
pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

/// Build a JSON request.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Read the response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// `Cookie` header value carrying a fresh session for `email`.
#[allow(dead_code)]
pub fn session_cookie(state: &AppState, email: &str) -> String {
    let mut identity = Map::new();
    identity.insert("email".to_string(), Value::String(email.to_string()));
    let token = create_jwt(identity, &state.config.jwt_signing_key).unwrap();
    format!("token={}", token)
}

/// All `Set-Cookie` header values on a response.
#[allow(dead_code)]
pub fn set_cookie_headers(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}
