//! Typed errors and HTTP mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::DbId;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Failures reported by a repository. A missing row on reads is `Ok(None)`, not an error.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: DbId },
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),
    /// The update target was absent or the write touched a row count other than one.
    #[error("not updated")]
    UpdateMismatch,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Store(StoreError),
}

impl AppError {
    /// Maps the outcome of an update. Absence and row-count mismatches both surface as 400.
    pub fn not_updated(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => {
                tracing::debug!(entity, id, "update target missing");
                AppError::UpdateMismatch
            }
            StoreError::Conflict(reason) => {
                tracing::warn!(%reason, "update touched unexpected row count");
                AppError::UpdateMismatch
            }
            other => AppError::Store(other),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, .. } => AppError::NotFound(entity),
            StoreError::Conflict(reason) => AppError::Conflict(reason),
            other => AppError::Store(other),
        }
    }
}

/// Malformed JSON, a missing `Content-Type`, or an unreadable body.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(entity) => (StatusCode::NOT_FOUND, format!("{entity} not found")),
            AppError::UpdateMismatch => (StatusCode::BAD_REQUEST, "Not updated".to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Store(err) => {
                tracing::error!(error = %err, "store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(message)).into_response()
    }
}
