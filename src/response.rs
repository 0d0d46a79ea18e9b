//! Response helpers. Records and lists are returned bare; messages are JSON strings.

use axum::{http::StatusCode, Json};
use serde::Serialize;

pub fn success_one<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn success_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<Vec<T>>) {
    (StatusCode::OK, Json(data))
}

/// 201 with a confirmation message instead of the created record.
pub fn created(message: &'static str) -> (StatusCode, Json<&'static str>) {
    (StatusCode::CREATED, Json(message))
}
