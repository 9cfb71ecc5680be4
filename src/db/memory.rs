// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process document store used for tests and local development.
//!
//! Supports the subset of MongoDB behavior the API needs: top-level equality
//! filters, `$set` of a single field, and delete-one. Documents keep insertion
//! order within a collection.

use crate::db::fields;
use crate::error::AppError;
use dashmap::DashMap;
use mongodb::bson::{oid::ObjectId, Bson, Document};

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<String, Vec<Document>>,
}

/// True when every filter entry equals the document's top-level field.
fn matches(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, value)| doc.get(key) == Some(value))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, collection: &str, filter: &Document) -> Vec<Document> {
        self.collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches(doc, filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn find_one(&self, collection: &str, filter: &Document) -> Option<Document> {
        self.collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| matches(doc, filter)).cloned())
    }

    /// Insert a document, generating `_id` when absent. Returns the stored id.
    pub fn insert_one(&self, collection: &str, doc: Document) -> Result<Bson, AppError> {
        let id = doc
            .get(fields::ID)
            .cloned()
            .unwrap_or_else(|| Bson::ObjectId(ObjectId::new()));

        let mut stored = Document::new();
        stored.insert(fields::ID, id.clone());
        for (key, value) in doc {
            if key != fields::ID {
                stored.insert(key, value);
            }
        }

        let mut docs = self.collections.entry(collection.to_string()).or_default();
        if docs.iter().any(|d| d.get(fields::ID) == Some(&id)) {
            return Err(AppError::Database(format!(
                "E11000 duplicate key error collection: {} _id: {}",
                collection, id
            )));
        }
        docs.push(stored);
        Ok(id)
    }

    /// `$set` one field on the first matching document.
    /// Returns `(matched, modified)` counts.
    pub fn set_field(
        &self,
        collection: &str,
        filter: &Document,
        field: &str,
        value: Bson,
    ) -> (u64, u64) {
        let Some(mut docs) = self.collections.get_mut(collection) else {
            return (0, 0);
        };
        match docs.iter_mut().find(|doc| matches(doc, filter)) {
            Some(doc) if doc.get(field) == Some(&value) => (1, 0),
            Some(doc) => {
                doc.insert(field, value);
                (1, 1)
            }
            None => (0, 0),
        }
    }

    /// Remove the first matching document. Returns the deleted count.
    pub fn delete_one(&self, collection: &str, filter: &Document) -> u64 {
        let Some(mut docs) = self.collections.get_mut(collection) else {
            return 0;
        };
        match docs.iter().position(|doc| matches(doc, filter)) {
            Some(index) => {
                docs.remove(index);
                1
            }
            None => 0,
        }
    }
}
