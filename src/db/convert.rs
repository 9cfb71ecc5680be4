// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Conversions between request/response JSON and stored BSON documents.
//!
//! Object identifiers are rendered as plain hex strings and dates as RFC 3339
//! strings, matching what the front-end expects. Everything else uses relaxed
//! extended JSON.

use crate::error::AppError;
use mongodb::bson::{self, Bson, Document};
use serde_json::{Map, Value};

/// Render a BSON value as API JSON.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Bson::DateTime(dt).into_relaxed_extjson(),
        },
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

/// Render a stored document as a JSON object.
pub fn document_to_json(doc: Document) -> Value {
    Value::Object(
        doc.into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

/// Convert a request JSON value into BSON for storage.
pub fn json_to_bson(value: &Value) -> Result<Bson, AppError> {
    bson::to_bson(value).map_err(|e| AppError::BadRequest(format!("Unsupported value: {}", e)))
}

/// Convert a JSON object into a document.
pub fn json_to_document(map: &Map<String, Value>) -> Result<Document, AppError> {
    let mut doc = Document::new();
    for (key, value) in map {
        doc.insert(key.clone(), json_to_bson(value)?);
    }
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};
    use serde_json::json;

    #[test]
    fn test_object_id_renders_as_hex() {
        let id = ObjectId::new();
        let value = document_to_json(doc! { "_id": id, "name": "Lake View" });
        assert_eq!(value, json!({ "_id": id.to_hex(), "name": "Lake View" }));
    }

    #[test]
    fn test_nested_values() {
        let id = ObjectId::new();
        let value = document_to_json(doc! {
            "Availability": { "from": "2024-01-01", "ids": [id] },
            "price": 120,
            "rating": 4.5,
        });
        assert_eq!(
            value,
            json!({
                "Availability": { "from": "2024-01-01", "ids": [id.to_hex()] },
                "price": 120,
                "rating": 4.5,
            })
        );
    }

    #[test]
    fn test_json_object_to_document() {
        let body = json!({ "zeta": 1, "alpha": "a", "nested": { "b": true } });
        let doc = json_to_document(body.as_object().unwrap()).unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.get_str("alpha").unwrap(), "a");
        assert!(doc.get_document("nested").unwrap().get_bool("b").unwrap());
        assert_eq!(document_to_json(doc), body);
    }
}
