//! Booking models.

use crate::db::convert::{json_to_bson, json_to_document};
use crate::error::AppError;
use mongodb::bson::{oid::ObjectId, Document};
use serde::Deserialize;
use serde_json::{Map, Value};
use validator::Validate;

/// Booking creation payload. Arbitrary booking metadata rides along in `extra`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewBooking {
    /// Client-supplied identifier. Never stored.
    #[serde(rename = "_id", default)]
    pub id: Option<Value>,
    /// Owner of the booking
    #[validate(email)]
    pub email: String,
    #[serde(rename = "bookedDate", default)]
    pub booked_date: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewBooking {
    /// Build the stored document under a freshly generated identifier.
    pub fn into_document(self) -> Result<Document, AppError> {
        if let Some(Value::String(supplied)) = &self.id {
            tracing::debug!(supplied_id = %supplied, "Discarding client-supplied booking id");
        }

        let mut doc = Document::new();
        doc.insert("_id", ObjectId::new());
        doc.insert("email", self.email);
        if let Some(booked_date) = &self.booked_date {
            doc.insert("bookedDate", json_to_bson(booked_date)?);
        }
        for (key, value) in json_to_document(&self.extra)? {
            doc.insert(key, value);
        }
        Ok(doc)
    }
}
