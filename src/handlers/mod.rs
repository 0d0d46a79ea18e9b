//! HTTP handlers, one module per resource.

pub mod directors;
pub mod genres;
pub mod movies;

use crate::error::AppError;
use crate::model::DbId;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse the `{id}` path segment.
fn parse_id(raw: &str) -> Result<DbId, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("id must be an integer, got '{raw}'")))
}

/// Decode a JSON object body into a payload. Unknown or read-only keys and
/// wrongly typed values are a 400.
fn from_body<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    match value {
        Value::Object(_) => {
            serde_json::from_value(value).map_err(|e| AppError::BadRequest(e.to_string()))
        }
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}
