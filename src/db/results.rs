// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Write acknowledgments returned to API callers.
//!
//! Field names follow the MongoDB wire results (`insertedId`, `matchedCount`,
//! ...) so the front-end can inspect them directly.

use super::convert::bson_to_json;
use mongodb::bson::Bson;
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use serde::Serialize;
use serde_json::Value;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct InsertOutcome {
    pub acknowledged: bool,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub inserted_id: Value,
}

impl InsertOutcome {
    pub fn new(inserted_id: Bson) -> Self {
        Self {
            acknowledged: true,
            inserted_id: bson_to_json(inserted_id),
        }
    }
}

impl From<InsertOneResult> for InsertOutcome {
    fn from(result: InsertOneResult) -> Self {
        Self::new(result.inserted_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub upserted_id: Option<Value>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub upserted_count: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub matched_count: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub modified_count: u64,
}

impl UpdateOutcome {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            upserted_id: None,
            upserted_count: 0,
            matched_count,
            modified_count,
        }
    }
}

impl From<UpdateResult> for UpdateOutcome {
    fn from(result: UpdateResult) -> Self {
        let upserted_id = result.upserted_id.map(bson_to_json);
        Self {
            acknowledged: true,
            upserted_count: u64::from(upserted_id.is_some()),
            upserted_id,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub deleted_count: u64,
}

impl DeleteOutcome {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

impl From<DeleteResult> for DeleteOutcome {
    fn from(result: DeleteResult) -> Self {
        Self::new(result.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_outcome_wire_names() {
        let value = serde_json::to_value(UpdateOutcome::new(1, 0)).unwrap();
        assert_eq!(
            value,
            json!({
                "acknowledged": true,
                "upsertedId": null,
                "upsertedCount": 0,
                "matchedCount": 1,
                "modifiedCount": 0,
            })
        );
    }

    #[test]
    fn test_delete_outcome_wire_names() {
        let value = serde_json::to_value(DeleteOutcome::new(0)).unwrap();
        assert_eq!(value, json!({ "acknowledged": true, "deletedCount": 0 }));
    }
}
