//! User models for storage and API.

use crate::db::convert::{bson_to_json, json_to_document};
use crate::error::AppError;
use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Registration payload. Fields beyond the named ones are stored as-is.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 200))]
    #[serde(default)]
    pub name: Option<String>,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 2048))]
    #[serde(rename = "photoUrl", default)]
    pub photo_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewUser {
    /// Build the stored document. A client-supplied `_id` is dropped.
    pub fn into_document(mut self) -> Result<Document, AppError> {
        self.extra.remove("_id");
        let mut doc = Document::new();
        if let Some(name) = self.name {
            doc.insert("name", name);
        }
        doc.insert("email", self.email);
        if let Some(photo_url) = self.photo_url {
            doc.insert("photoUrl", photo_url);
        }
        for (key, value) in json_to_document(&self.extra)? {
            doc.insert(key, value);
        }
        Ok(doc)
    }
}

/// Public view of a user. No other stored field is ever returned.
///
/// Values are passed through as stored; registration only checks types on
/// the way in, and older documents may hold anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(type = "unknown"))]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(type = "unknown"))]
    pub email: Option<Value>,
    #[serde(rename = "photoUrl", default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(type = "unknown"))]
    pub photo_url: Option<Value>,
}

impl UserProfile {
    /// Pick the public fields out of a stored user document.
    pub fn from_document(mut doc: Document) -> Self {
        let mut take = |key: &str| doc.remove(key).map(bson_to_json);
        Self {
            name: take("name"),
            email: take("email"),
            photo_url: take("photoUrl"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_user_keeps_extra_fields() {
        let user: NewUser = serde_json::from_value(json!({
            "name": "Ada",
            "email": "ada@x.com",
            "photoUrl": "https://img.test/ada.png",
            "phone": "555-0100",
            "_id": "abc",
        }))
        .unwrap();
        assert!(user.validate().is_ok());

        let doc = user.into_document().unwrap();
        assert_eq!(doc.get_str("name").unwrap(), "Ada");
        assert_eq!(doc.get_str("photoUrl").unwrap(), "https://img.test/ada.png");
        assert_eq!(doc.get_str("phone").unwrap(), "555-0100");
        assert!(!doc.contains_key("_id"));
    }

    #[test]
    fn test_new_user_rejects_bad_email() {
        let user: NewUser =
            serde_json::from_value(json!({ "name": "Ada", "email": "not-an-email" })).unwrap();
        assert!(user.validate().is_err());
    }

    #[test]
    fn test_profile_omits_missing_fields() {
        let profile = UserProfile {
            name: None,
            email: Some(json!("a@x.com")),
            photo_url: None,
        };
        assert_eq!(
            serde_json::to_value(profile).unwrap(),
            json!({ "email": "a@x.com" })
        );
    }

    #[test]
    fn test_profile_from_document_keeps_stored_types() {
        let profile = UserProfile::from_document(mongodb::bson::doc! {
            "_id": mongodb::bson::oid::ObjectId::new(),
            "name": { "first": "Bob" },
            "email": "bob@x.com",
            "photoUrl": 7,
            "password": "hunter2",
        });
        assert_eq!(
            serde_json::to_value(profile).unwrap(),
            json!({ "name": { "first": "Bob" }, "email": "bob@x.com", "photoUrl": 7 })
        );
    }
}
