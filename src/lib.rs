// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Serene Stays: room-booking backend
//!
//! This crate provides the REST API behind the Serene Stays website: room
//! listings, user profiles, bookings, and cookie-based JWT sessions.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;

use config::Config;
use db::MongoDb;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: MongoDb,
}
