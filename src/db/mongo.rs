// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! MongoDB client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Rooms (listing, lookup, availability updates)
//! - Users (registration, profile listing)
//! - Bookings (per-owner listing, create, reschedule, cancel)
//!
//! Every operation is a single round-trip to the database. The same API is
//! served by an in-memory backend for tests.

use crate::db::memory::MemoryStore;
use crate::db::results::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use crate::db::{collections, fields};
use crate::error::AppError;
use crate::models::UserProfile;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use std::sync::Arc;

const APP_NAME: &str = "serene-stays";

#[derive(Clone)]
enum Backend {
    Mongo {
        client: mongodb::Client,
        database: mongodb::Database,
    },
    Memory(Arc<MemoryStore>),
}

/// MongoDB database handle. Cheap to clone; all clones share one client.
#[derive(Clone)]
pub struct MongoDb {
    backend: Backend,
}

impl MongoDb {
    /// Create a new MongoDB client using the Stable API (v1, strict).
    ///
    /// The driver connects lazily; use [`MongoDb::ping`] to check reachability.
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, AppError> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| AppError::Database(format!("Invalid MongoDB URI: {}", e)))?;
        options.app_name = Some(APP_NAME.to_string());
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );

        let client = mongodb::Client::with_options(options)
            .map_err(|e| AppError::Database(format!("Failed to create MongoDB client: {}", e)))?;
        let database = client.database(db_name);

        tracing::info!(database = db_name, "MongoDB client created");

        Ok(Self {
            backend: Backend::Mongo { client, database },
        })
    }

    /// Create an in-memory database for testing and local development.
    pub fn new_in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(MemoryStore::new())),
        }
    }

    /// Round-trip a `ping` command.
    pub async fn ping(&self) -> Result<(), AppError> {
        match &self.backend {
            Backend::Mongo { database, .. } => {
                database.run_command(doc! { "ping": 1 }).await?;
                Ok(())
            }
            Backend::Memory(_) => Ok(()),
        }
    }

    /// Close the client, waiting for in-flight operations to finish.
    pub async fn shutdown(self) {
        if let Backend::Mongo { client, .. } = self.backend {
            client.shutdown().await;
            tracing::info!("MongoDB client shut down");
        }
    }

    // ─── Generic Operations ──────────────────────────────────────

    async fn find(
        &self,
        collection: &str,
        filter: Document,
        projection: Option<Document>,
    ) -> Result<Vec<Document>, AppError> {
        match &self.backend {
            Backend::Mongo { database, .. } => {
                let coll = database.collection::<Document>(collection);
                let mut find = coll.find(filter);
                if let Some(projection) = projection {
                    find = find.projection(projection);
                }
                let docs: Vec<Document> = find.await?.try_collect().await?;
                Ok(docs)
            }
            Backend::Memory(store) => Ok(store.find(collection, &filter)),
        }
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: ObjectId,
    ) -> Result<Option<Document>, AppError> {
        let filter = doc! { "_id": id };
        match &self.backend {
            Backend::Mongo { database, .. } => Ok(database
                .collection::<Document>(collection)
                .find_one(filter)
                .await?),
            Backend::Memory(store) => Ok(store.find_one(collection, &filter)),
        }
    }

    async fn insert(&self, collection: &str, doc: Document) -> Result<InsertOutcome, AppError> {
        match &self.backend {
            Backend::Mongo { database, .. } => Ok(database
                .collection::<Document>(collection)
                .insert_one(doc)
                .await?
                .into()),
            Backend::Memory(store) => Ok(InsertOutcome::new(store.insert_one(collection, doc)?)),
        }
    }

    /// `$set` a single field on the document with the given id.
    async fn set_field(
        &self,
        collection: &str,
        id: ObjectId,
        field: &str,
        value: Bson,
    ) -> Result<UpdateOutcome, AppError> {
        let filter = doc! { "_id": id };
        match &self.backend {
            Backend::Mongo { database, .. } => {
                let mut set = Document::new();
                set.insert(field, value);
                Ok(database
                    .collection::<Document>(collection)
                    .update_one(filter, doc! { "$set": set })
                    .await?
                    .into())
            }
            Backend::Memory(store) => {
                let (matched, modified) = store.set_field(collection, &filter, field, value);
                Ok(UpdateOutcome::new(matched, modified))
            }
        }
    }

    async fn delete_by_id(&self, collection: &str, id: ObjectId) -> Result<DeleteOutcome, AppError> {
        let filter = doc! { "_id": id };
        match &self.backend {
            Backend::Mongo { database, .. } => Ok(database
                .collection::<Document>(collection)
                .delete_one(filter)
                .await?
                .into()),
            Backend::Memory(store) => Ok(DeleteOutcome::new(store.delete_one(collection, &filter))),
        }
    }

    // ─── Room Operations ─────────────────────────────────────────

    /// List every room.
    pub async fn list_rooms(&self) -> Result<Vec<Document>, AppError> {
        self.find(collections::ROOMS, Document::new(), None).await
    }

    /// Get a room by id.
    pub async fn get_room(&self, id: ObjectId) -> Result<Option<Document>, AppError> {
        self.find_by_id(collections::ROOMS, id).await
    }

    /// Seed helper: insert a room document. No route creates rooms; they are
    /// loaded out-of-band, and tests seed them through this.
    pub async fn insert_room(&self, room: Document) -> Result<InsertOutcome, AppError> {
        self.insert(collections::ROOMS, room).await
    }

    /// Overwrite a room's availability.
    pub async fn set_room_availability(
        &self,
        id: ObjectId,
        availability: Bson,
    ) -> Result<UpdateOutcome, AppError> {
        self.set_field(collections::ROOMS, id, fields::AVAILABILITY, availability)
            .await
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Store a new user.
    pub async fn insert_user(&self, user: Document) -> Result<InsertOutcome, AppError> {
        self.insert(collections::USERS, user).await
    }

    /// List public user profiles, optionally filtered by email.
    pub async fn list_user_profiles(
        &self,
        email: Option<&str>,
    ) -> Result<Vec<UserProfile>, AppError> {
        let filter = match email {
            Some(email) => doc! { "email": email },
            None => Document::new(),
        };
        let projection = doc! { "_id": 0, "name": 1, "email": 1, "photoUrl": 1 };

        let users = self
            .find(collections::USERS, filter, Some(projection))
            .await?;
        Ok(users.into_iter().map(UserProfile::from_document).collect())
    }

    // ─── Booking Operations ──────────────────────────────────────

    /// List bookings owned by `email`.
    pub async fn list_bookings_for(&self, email: &str) -> Result<Vec<Document>, AppError> {
        self.find(collections::BOOKINGS, doc! { "email": email }, None)
            .await
    }

    /// Store a new booking.
    pub async fn insert_booking(&self, booking: Document) -> Result<InsertOutcome, AppError> {
        self.insert(collections::BOOKINGS, booking).await
    }

    /// Cancel a booking. Reports zero deletions when the id is unknown.
    pub async fn delete_booking(&self, id: ObjectId) -> Result<DeleteOutcome, AppError> {
        self.delete_by_id(collections::BOOKINGS, id).await
    }

    /// Overwrite a booking's date.
    pub async fn set_booking_date(
        &self,
        id: ObjectId,
        booked_date: Bson,
    ) -> Result<UpdateOutcome, AppError> {
        self.set_field(collections::BOOKINGS, id, fields::BOOKED_DATE, booked_date)
            .await
    }
}
