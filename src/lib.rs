//! Movie catalog: REST backend for movies, directors, and genres on SQLite.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod repository;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;
pub mod telemetry;

pub use config::{ReferencePolicy, Settings};
pub use error::{AppError, ConfigError, StoreError};
pub use migration::apply_migrations;
pub use repository::{CatalogStore, MemoryStore, SqliteStore};
pub use routes::{build_router, common_routes, docs_routes, entity_routes};
pub use state::AppState;
pub use store::{connect, connect_in_memory};
pub use telemetry::init_tracing;
