// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Room catalogue routes.

use axum::{
    extract::{Path, State},
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

use crate::db::convert::{document_to_json, json_to_bson};
use crate::db::UpdateOutcome;
use crate::error::Result;
use crate::middleware::log_request;
use crate::models::{parse_object_id, ValueUpdate};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/allrooms",
            get(list_rooms).route_layer(middleware::from_fn(log_request)),
        )
        .route("/allrooms/{id}", get(get_room).patch(update_availability))
}

/// List all rooms.
async fn list_rooms(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Value>>> {
    let rooms = state.db.list_rooms().await?;
    Ok(Json(rooms.into_iter().map(document_to_json).collect()))
}

/// Get one room; `null` when no room has this id.
async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let id = parse_object_id(&id)?;
    let room = state.db.get_room(id).await?;
    Ok(Json(room.map(document_to_json).unwrap_or(Value::Null)))
}

/// Replace a room's `Availability` with the request body.
async fn update_availability(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(update): Json<ValueUpdate>,
) -> Result<Json<UpdateOutcome>> {
    let id = parse_object_id(&id)?;
    update.validate()?;

    let outcome = state
        .db
        .set_room_availability(id, json_to_bson(&update.0)?)
        .await?;

    tracing::info!(
        room_id = %id,
        matched = outcome.matched_count,
        modified = outcome.modified_count,
        "Room availability updated"
    );

    Ok(Json(outcome))
}
