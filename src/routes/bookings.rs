// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Booking routes.
//!
//! Only listing is guarded: it requires a session and the requested `email`
//! must be the caller's own. Create, reschedule and cancel act on any booking
//! id without an ownership check.

use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

use crate::db::convert::{document_to_json, json_to_bson};
use crate::db::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use crate::error::{AppError, Result};
use crate::middleware::auth::{require_auth, AuthUser};
use crate::middleware::log_request;
use crate::models::{parse_object_id, NewBooking, ValueUpdate};
use crate::AppState;

pub fn routes(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    let list = get(list_bookings)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .route_layer(middleware::from_fn(log_request));

    Router::new()
        .route("/bookings", list)
        .route("/bookings", post(create_booking))
        .route(
            "/bookings/{id}",
            delete(delete_booking).patch(reschedule_booking),
        )
}

#[derive(Deserialize)]
struct BookingsQuery {
    email: Option<String>,
}

/// List the caller's bookings.
async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<BookingsQuery>,
) -> Result<Json<Vec<Value>>> {
    let owner = match (params.email.as_deref(), user.email.as_deref()) {
        (Some(requested), Some(caller)) if requested == caller => requested,
        (requested, caller) => {
            tracing::warn!(
                requested = ?requested,
                caller = ?caller,
                "Blocked bookings request for another owner"
            );
            return Err(AppError::Forbidden);
        }
    };

    let bookings = state.db.list_bookings_for(owner).await?;
    tracing::debug!(email = %owner, count = bookings.len(), "Listed bookings");

    Ok(Json(bookings.into_iter().map(document_to_json).collect()))
}

/// Create a booking under a server-generated id.
async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(booking): Json<NewBooking>,
) -> Result<Json<InsertOutcome>> {
    booking.validate()?;
    let outcome = state.db.insert_booking(booking.into_document()?).await?;

    tracing::info!(booking_id = %outcome.inserted_id, "Booking created");
    Ok(Json(outcome))
}

/// Cancel a booking. Unknown ids report `deletedCount: 0`.
async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteOutcome>> {
    let id = parse_object_id(&id)?;
    let outcome = state.db.delete_booking(id).await?;

    tracing::info!(booking_id = %id, deleted = outcome.deleted_count, "Booking deleted");
    Ok(Json(outcome))
}

/// Replace a booking's `bookedDate` with the request body.
async fn reschedule_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(update): Json<ValueUpdate>,
) -> Result<Json<UpdateOutcome>> {
    let id = parse_object_id(&id)?;
    update.validate()?;

    let outcome = state
        .db
        .set_booking_date(id, json_to_bson(&update.0)?)
        .await?;
    Ok(Json(outcome))
}
