// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Request and response models.
//!
//! Stored documents are schema-less; these types only pin down the fields the
//! API reads or guarantees, and carry everything else through untouched.

pub mod booking;
pub mod update;
pub mod user;

pub use booking::NewBooking;
pub use update::ValueUpdate;
pub use user::{NewUser, UserProfile};

use crate::error::AppError;
use mongodb::bson::oid::ObjectId;

/// Parse a path identifier into an ObjectId.
pub fn parse_object_id(raw: &str) -> Result<ObjectId, AppError> {
    Ok(ObjectId::parse_str(raw)?)
}
