//! `/directors/` handlers.

use crate::error::AppError;
use crate::handlers::{from_body, parse_id};
use crate::model::{Director, NewDirector, UpdateDirector};
use crate::repository::DIRECTOR;
use crate::response::{created, success_many, success_one};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

#[utoipa::path(
    get,
    path = "/directors/",
    operation_id = "list_directors",
    tag = "directors",
    responses((status = 200, description = "All directors, by id", body = [Director]))
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let directors = state.store.list_directors().await?;
    Ok(success_many(directors))
}

#[utoipa::path(
    post,
    path = "/directors/",
    operation_id = "create_director",
    tag = "directors",
    request_body = NewDirector,
    responses(
        (status = 201, description = "Director created", body = String),
        (status = 400, description = "Malformed body", body = String)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let new: NewDirector = from_body(body)?;
    let director = state.store.create_director(new).await?;
    tracing::info!(id = director.id, "director created");
    Ok(created("Director created"))
}

/// Absence is a 404; any other store failure propagates as a 500.
#[utoipa::path(
    get,
    path = "/directors/{id}",
    operation_id = "get_director",
    tag = "directors",
    params(("id" = i64, Path, description = "Director id")),
    responses(
        (status = 200, description = "The director", body = Director),
        (status = 404, description = "Director not found", body = String)
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&raw_id)?;
    let director = state
        .store
        .find_director(id)
        .await?
        .ok_or(AppError::NotFound(DIRECTOR))?;
    Ok(success_one(director))
}

#[utoipa::path(
    put,
    path = "/directors/{id}",
    operation_id = "update_director",
    tag = "directors",
    params(("id" = i64, Path, description = "Director id")),
    request_body = UpdateDirector,
    responses(
        (status = 204, description = "Director updated"),
        (status = 400, description = "Not updated", body = String)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&raw_id)?;
    let Json(body) = body?;
    let patch: UpdateDirector = from_body(body)?;
    state
        .store
        .update_director(id, &patch)
        .await
        .map_err(AppError::not_updated)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/directors/{id}",
    operation_id = "delete_director",
    tag = "directors",
    params(("id" = i64, Path, description = "Director id")),
    responses(
        (status = 204, description = "Director deleted"),
        (status = 404, description = "Director not found", body = String),
        (status = 409, description = "Still referenced (restrict policy)", body = String)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&raw_id)?;
    state
        .store
        .delete_director(id, state.reference_policy)
        .await?;
    tracing::info!(id, policy = ?state.reference_policy, "director deleted");
    Ok(StatusCode::NO_CONTENT)
}
