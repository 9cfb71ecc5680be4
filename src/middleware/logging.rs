// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-route request logging.

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::Response,
};

/// Log the caller-facing host and path, then continue. Never rejects.
pub async fn log_request(request: Request, next: Next) -> Response {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-");
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or("/");

    tracing::info!(host = %host, path = %path, method = %request.method(), "Called");

    next.run(request).await
}
