//! HTTP-level tests for `/directors/` and `/genres/`.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use serde_json::json;

#[tokio::test]
async fn test_director_create_then_get() {
    let app = common::sqlite_app().await;
    let response = post_json(&app, "/directors/", json!({"name": "Nolan"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await, json!("Director created"));

    let response = get(&app, "/directors/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"id": 1, "name": "Nolan"}));
}

#[tokio::test]
async fn test_missing_director_is_404_not_a_swallowed_error() {
    let app = common::sqlite_app().await;
    let response = get(&app, "/directors/7").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!("Director not found"));
}

#[tokio::test]
async fn test_director_read_failure_is_500_not_404() {
    let app = common::closed_sqlite_app().await;
    let response = get(&app, "/directors/1").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!("Internal server error"));

    let response = get(&app, "/genres/1").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_missing_genre_is_404() {
    let app = common::sqlite_app().await;
    let response = get(&app, "/genres/7").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!("Genre not found"));
}

#[tokio::test]
async fn test_genre_lifecycle() {
    let app = common::sqlite_app().await;
    for name in ["Drama", "War"] {
        let response = post_json(&app, "/genres/", json!({ "name": name })).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await, json!("Genre created"));
    }

    let list = body_json(get(&app, "/genres/").await).await;
    assert_eq!(
        list,
        json!([{"id": 1, "name": "Drama"}, {"id": 2, "name": "War"}])
    );

    let response = put_json(&app, "/genres/2", json!({"name": "History"})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        body_json(get(&app, "/genres/2").await).await,
        json!({"id": 2, "name": "History"})
    );

    assert_eq!(delete(&app, "/genres/1").await.status(), StatusCode::NO_CONTENT);
    assert_eq!(get(&app, "/genres/1").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(delete(&app, "/genres/1").await.status(), StatusCode::NOT_FOUND);

    let list = body_json(get(&app, "/genres").await).await;
    assert_eq!(list, json!([{"id": 2, "name": "History"}]));
}

#[tokio::test]
async fn test_update_missing_director_returns_400() {
    let app = common::sqlite_app().await;
    let response = put_json(&app, "/directors/3", json!({"name": "Nobody"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!("Not updated"));
    assert_eq!(body_json(get(&app, "/directors/").await).await, json!([]));
}

#[tokio::test]
async fn test_director_body_must_be_an_object() {
    let app = common::sqlite_app().await;
    let response = post_json(&app, "/directors/", json!("Nolan")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!("body must be a JSON object"));
}

#[tokio::test]
async fn test_director_name_may_be_cleared() {
    let app = common::memory_app(movie_catalog::ReferencePolicy::Ignore);
    post_json(&app, "/directors/", json!({"name": "Nolan"})).await;

    let response = put_json(&app, "/directors/1", json!({"name": null})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        body_json(get(&app, "/directors/1").await).await,
        json!({"id": 1, "name": null})
    );
}
