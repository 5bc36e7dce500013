//! Request payload checks.
//!
//! Every validator walks its fields in declaration order and stops at the
//! first violation, so callers always see exactly one message. Bodies arrive
//! as `serde_json::Value` whether they came from JSON or from the text parts
//! of a multipart form.

pub mod auth;
pub mod employee;
pub mod file;

use serde_json::Value;
use thiserror::Error;

pub use auth::{validate_credentials, Credentials};
pub use employee::{validate_employee_update, validate_new_employee, EmployeeUpdate};
pub use file::{validate_optional_image, validate_required_image, UploadedFile, MAX_IMAGE_BYTES};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Offending field, `body` when the payload itself is unusable
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Per-field wording for the generic string checks
pub(crate) struct FieldMessages {
    pub field: &'static str,
    pub not_string: &'static str,
    pub empty: &'static str,
    pub required: &'static str,
}

pub(crate) fn as_object(body: &Value) -> Result<&serde_json::Map<String, Value>, ValidationError> {
    body.as_object()
        .ok_or_else(|| ValidationError::new("body", "Request body must be an object!"))
}

/// Missing key → `Ok(None)`; present but not a string (null included) or empty → error
pub(crate) fn optional_str<'a>(
    body: &'a serde_json::Map<String, Value>,
    messages: &FieldMessages,
) -> Result<Option<&'a str>, ValidationError> {
    match body.get(messages.field) {
        None => Ok(None),
        Some(Value::String(s)) if s.is_empty() => {
            Err(ValidationError::new(messages.field, messages.empty))
        }
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ValidationError::new(messages.field, messages.not_string)),
    }
}

pub(crate) fn required_str<'a>(
    body: &'a serde_json::Map<String, Value>,
    messages: &FieldMessages,
) -> Result<&'a str, ValidationError> {
    optional_str(body, messages)?
        .ok_or_else(|| ValidationError::new(messages.field, messages.required))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NAME: FieldMessages = FieldMessages {
        field: "name",
        not_string: "Name must be a string!",
        empty: "Name is required!",
        required: "Name is required!",
    };

    #[test]
    fn distinguishes_missing_empty_and_wrong_type() {
        let body = json!({"name": 42});
        let err = required_str(as_object(&body).unwrap(), &NAME).unwrap_err();
        assert_eq!(err.message, "Name must be a string!");

        let body = json!({"name": null});
        assert!(optional_str(as_object(&body).unwrap(), &NAME).is_err());

        let body = json!({});
        assert_eq!(optional_str(as_object(&body).unwrap(), &NAME), Ok(None));
        let err = required_str(as_object(&body).unwrap(), &NAME).unwrap_err();
        assert_eq!(err.field, "name");
    }

    #[test]
    fn rejects_non_object_bodies() {
        assert!(as_object(&json!(["name"])).is_err());
    }
}
