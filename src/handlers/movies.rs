//! `/movies/` handlers.

use crate::error::AppError;
use crate::handlers::{from_body, parse_id};
use crate::model::{Movie, MovieFilter, NewMovie, UpdateMovie};
use crate::repository::MOVIE;
use crate::response::{created, success_many, success_one};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

#[utoipa::path(
    get,
    path = "/movies/",
    operation_id = "list_movies",
    tag = "movies",
    params(MovieFilter),
    responses(
        (status = 200, description = "Movies matching the filters, by id", body = [Movie]),
        (status = 400, description = "Non-integer filter value", body = String)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter = MovieFilter::from_query(&params)?;
    let movies = state.store.list_movies(&filter).await?;
    Ok(success_many(movies))
}

#[utoipa::path(
    post,
    path = "/movies/",
    operation_id = "create_movie",
    tag = "movies",
    request_body = NewMovie,
    responses(
        (status = 201, description = "Movie created", body = String),
        (status = 400, description = "Malformed body", body = String)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let new: NewMovie = from_body(body)?;
    let movie = state.store.create_movie(new).await?;
    tracing::info!(id = movie.id, "movie created");
    Ok(created("Movie created"))
}

#[utoipa::path(
    get,
    path = "/movies/{id}",
    operation_id = "get_movie",
    tag = "movies",
    params(("id" = i64, Path, description = "Movie id")),
    responses(
        (status = 200, description = "The movie", body = Movie),
        (status = 404, description = "Movie not found", body = String)
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&raw_id)?;
    let movie = state
        .store
        .find_movie(id)
        .await?
        .ok_or(AppError::NotFound(MOVIE))?;
    Ok(success_one(movie))
}

#[utoipa::path(
    put,
    path = "/movies/{id}",
    operation_id = "update_movie",
    tag = "movies",
    params(("id" = i64, Path, description = "Movie id")),
    request_body = UpdateMovie,
    responses(
        (status = 204, description = "Movie updated"),
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
    let patch: UpdateMovie = from_body(body)?;
    state
        .store
        .update_movie(id, &patch)
        .await
        .map_err(AppError::not_updated)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/movies/{id}",
    operation_id = "delete_movie",
    tag = "movies",
    params(("id" = i64, Path, description = "Movie id")),
    responses(
        (status = 204, description = "Movie deleted"),
        (status = 404, description = "Movie not found", body = String)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&raw_id)?;
    state.store.delete_movie(id).await?;
    tracing::info!(id, "movie deleted");
    Ok(StatusCode::NO_CONTENT)
}
