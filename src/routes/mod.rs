//! Router assembly.

mod common;
mod docs;
mod entity;

pub use common::common_routes;
pub use docs::{docs_routes, ApiDoc};
pub use entity::entity_routes;

use crate::config::Settings;
use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full application: resource, common, and docs routes behind request tracing
/// and the body size limit.
pub fn build_router(state: AppState, settings: &Settings) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(docs_routes())
        .merge(entity_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(settings.body_limit_bytes)),
        )
}
