//! OpenAPI document for the resource routes, served at `/openapi.json`.

use crate::handlers::{directors, genres, movies};
use crate::model::{
    Director, Genre, Movie, NewDirector, NewGenre, NewMovie, UpdateDirector, UpdateGenre,
    UpdateMovie,
};
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        movies::list,
        movies::create,
        movies::read,
        movies::update,
        movies::delete,
        directors::list,
        directors::create,
        directors::read,
        directors::update,
        directors::delete,
        genres::list,
        genres::create,
        genres::read,
        genres::update,
        genres::delete,
    ),
    components(schemas(
        Movie,
        NewMovie,
        UpdateMovie,
        Director,
        NewDirector,
        UpdateDirector,
        Genre,
        NewGenre,
        UpdateGenre,
    )),
    tags(
        (name = "movies", description = "Movies with optional director/genre filters"),
        (name = "directors", description = "Directors"),
        (name = "genres", description = "Genres")
    )
)]
pub struct ApiDoc;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn docs_routes() -> Router {
    Router::new().route("/openapi.json", get(openapi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource_path() {
        let doc = ApiDoc::openapi();
        for path in [
            "/movies/",
            "/movies/{id}",
            "/directors/",
            "/directors/{id}",
            "/genres/",
            "/genres/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
