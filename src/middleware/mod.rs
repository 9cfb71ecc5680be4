// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (authentication, request logging).

pub mod auth;
pub mod logging;

pub use auth::require_auth;
pub use logging::log_request;
