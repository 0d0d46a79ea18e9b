//! `/genres/` handlers.

use crate::error::AppError;
use crate::handlers::{from_body, parse_id};
use crate::model::{Genre, NewGenre, UpdateGenre};
use crate::repository::GENRE;
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
    path = "/genres/",
    operation_id = "list_genres",
    tag = "genres",
    responses((status = 200, description = "All genres, by id", body = [Genre]))
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let genres = state.store.list_genres().await?;
    Ok(success_many(genres))
}

#[utoipa::path(
    post,
    path = "/genres/",
    operation_id = "create_genre",
    tag = "genres",
    request_body = NewGenre,
    responses(
        (status = 201, description = "Genre created", body = String),
        (status = 400, description = "Malformed body", body = String)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let new: NewGenre = from_body(body)?;
    let genre = state.store.create_genre(new).await?;
    tracing::info!(id = genre.id, "genre created");
    Ok(created("Genre created"))
}

#[utoipa::path(
    get,
    path = "/genres/{id}",
    operation_id = "get_genre",
    tag = "genres",
    params(("id" = i64, Path, description = "Genre id")),
    responses(
        (status = 200, description = "The genre", body = Genre),
        (status = 404, description = "Genre not found", body = String)
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&raw_id)?;
    let genre = state
        .store
        .find_genre(id)
        .await?
        .ok_or(AppError::NotFound(GENRE))?;
    Ok(success_one(genre))
}

#[utoipa::path(
    put,
    path = "/genres/{id}",
    operation_id = "update_genre",
    tag = "genres",
    params(("id" = i64, Path, description = "Genre id")),
    request_body = UpdateGenre,
    responses(
        (status = 204, description = "Genre updated"),
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
    let patch: UpdateGenre = from_body(body)?;
    state
        .store
        .update_genre(id, &patch)
        .await
        .map_err(AppError::not_updated)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/genres/{id}",
    operation_id = "delete_genre",
    tag = "genres",
    params(("id" = i64, Path, description = "Genre id")),
    responses(
        (status = 204, description = "Genre deleted"),
        (status = 404, description = "Genre not found", body = String),
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
        .delete_genre(id, state.reference_policy)
        .await?;
    tracing::info!(id, policy = ?state.reference_policy, "genre deleted");
    Ok(StatusCode::NO_CONTENT)
}
