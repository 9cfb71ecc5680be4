//! Whole-body field replacement payloads.

use serde::Deserialize;
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

/// A JSON body stored verbatim into a single document field
/// (room `Availability`, booking `bookedDate`). Any shape is accepted
/// except `null`.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct ValueUpdate(pub Value);

impl Validate for ValueUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        if self.0.is_null() {
            let mut errors = ValidationErrors::new();
            errors.add("body", ValidationError::new("required"));
            return Err(errors);
        }
        Ok(())
    }
}
