// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User registration and profile routes.

use axum::{
    extract::{Query, State},
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::db::InsertOutcome;
use crate::error::Result;
use crate::middleware::log_request;
use crate::models::{NewUser, UserProfile};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/users",
            post(create_user).route_layer(middleware::from_fn(log_request)),
        )
        .route("/users", get(list_users))
}

#[derive(Deserialize)]
struct UsersQuery {
    /// Only return users with this email
    email: Option<String>,
}

/// Register a user.
async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(user): Json<NewUser>,
) -> Result<Json<InsertOutcome>> {
    user.validate()?;
    tracing::info!(email = %user.email, "Registering user");

    let outcome = state.db.insert_user(user.into_document()?).await?;
    Ok(Json(outcome))
}

/// List users as `{name, email, photoUrl}` profiles.
async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UsersQuery>,
) -> Result<Json<Vec<UserProfile>>> {
    let email = params.email.as_deref().filter(|e| !e.is_empty());
    let profiles = state.db.list_user_profiles(email).await?;
    Ok(Json(profiles))
}
