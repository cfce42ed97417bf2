//! Typed decoder for the backend's response envelope.
//!
//! The REST backend wraps payloads inconsistently: some endpoints return
//! `{success, data: [...]}`, some `{data: [...]}`, some a bare array, and a
//! few return the record itself as a single object. Every call site decodes
//! through this one module instead of re-detecting the shape per endpoint.

use serde_json::Value;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("expected a collection in the response, found {found}")]
    NotACollection { found: &'static str },
}

/// Extract the record collection from a response body.
///
/// Recurses through `data` wrappers until it reaches an array. A lone object
/// without envelope keys is treated as a single-record collection. An
/// envelope that carries no `data` decodes to an empty collection rather than
/// an error; scalars are a shape violation.
pub fn collection(value: &Value) -> Result<Vec<Value>, ShapeError> {
    match value {
        Value::Array(items) => Ok(items.clone()),
        Value::Object(object) => {
            if let Some(data) = object.get("data") {
                return collection(data);
            }
            if object.contains_key("success") {
                return Ok(Vec::new());
            }
            Ok(vec![value.clone()])
        }
        other => Err(ShapeError::NotACollection { found: json_kind(other) }),
    }
}

/// The envelope's `success` flag. Responses without one count as successful;
/// the HTTP status already vouched for them.
pub fn succeeded(value: &Value) -> bool {
    value.get("success").and_then(Value::as_bool).unwrap_or(true)
}

/// Server-provided human-readable message, when present.
pub fn response_message(value: &Value) -> Option<&str> {
    value.get("message").and_then(Value::as_str)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
