//! Resource routes for movies, directors, and genres.
//! Collection paths answer with and without the trailing slash.

use crate::handlers::{directors, genres, movies};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .route("/movies", get(movies::list).post(movies::create))
        .route("/movies/", get(movies::list).post(movies::create))
        .route(
            "/movies/:id",
            get(movies::read).put(movies::update).delete(movies::delete),
        )
        .route("/directors", get(directors::list).post(directors::create))
        .route("/directors/", get(directors::list).post(directors::create))
        .route(
            "/directors/:id",
            get(directors::read)
                .put(directors::update)
                .delete(directors::delete),
        )
        .route("/genres", get(genres::list).post(genres::create))
        .route("/genres/", get(genres::list).post(genres::create))
        .route(
            "/genres/:id",
            get(genres::read).put(genres::update).delete(genres::delete),
        )
        .with_state(state)
}
