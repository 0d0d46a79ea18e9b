//! Persistence ports for the catalog and their implementations.
//!
//! Handlers only see [`CatalogStore`]; the concrete store is picked at startup.
//!
//! | Type | Backing |
//! |------|---------|
//! | [`SqliteStore`] | `sqlx::SqlitePool` |
//! | [`MemoryStore`] | in-process maps behind a `tokio::sync::RwLock` |
//!
//! Reads return `Ok(None)` when the row is absent. `update_*` and `delete_*`
//! return `StoreError::NotFound` for a missing id.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;

use crate::config::ReferencePolicy;
use crate::error::StoreError;
use crate::model::{
    DbId, Director, Genre, Movie, MovieFilter, NewDirector, NewGenre, NewMovie, UpdateDirector,
    UpdateGenre, UpdateMovie,
};

pub const MOVIE: &str = "Movie";
pub const DIRECTOR: &str = "Director";
pub const GENRE: &str = "Genre";

#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Movies matching `filter`, ordered by id.
    async fn list_movies(&self, filter: &MovieFilter) -> Result<Vec<Movie>, StoreError>;

    async fn find_movie(&self, id: DbId) -> Result<Option<Movie>, StoreError>;

    /// Insert and return the movie with its assigned id.
    async fn create_movie(&self, new: NewMovie) -> Result<Movie, StoreError>;

    /// Load, patch, and save one movie. Returns the saved row.
    async fn update_movie(&self, id: DbId, patch: &UpdateMovie) -> Result<Movie, StoreError>;

    async fn delete_movie(&self, id: DbId) -> Result<(), StoreError>;
}

#[async_trait]
pub trait DirectorRepository: Send + Sync {
    async fn list_directors(&self) -> Result<Vec<Director>, StoreError>;

    async fn find_director(&self, id: DbId) -> Result<Option<Director>, StoreError>;

    async fn create_director(&self, new: NewDirector) -> Result<Director, StoreError>;

    async fn update_director(
        &self,
        id: DbId,
        patch: &UpdateDirector,
    ) -> Result<Director, StoreError>;

    /// Delete a director, applying `policy` to movies that reference it.
    async fn delete_director(&self, id: DbId, policy: ReferencePolicy) -> Result<(), StoreError>;
}

#[async_trait]
pub trait GenreRepository: Send + Sync {
    async fn list_genres(&self) -> Result<Vec<Genre>, StoreError>;

    async fn find_genre(&self, id: DbId) -> Result<Option<Genre>, StoreError>;

    async fn create_genre(&self, new: NewGenre) -> Result<Genre, StoreError>;

    async fn update_genre(&self, id: DbId, patch: &UpdateGenre) -> Result<Genre, StoreError>;

    /// Delete a genre, applying `policy` to movies that reference it.
    async fn delete_genre(&self, id: DbId, policy: ReferencePolicy) -> Result<(), StoreError>;
}

/// Everything the HTTP layer needs from storage.
#[async_trait]
pub trait CatalogStore: MovieRepository + DirectorRepository + GenreRepository {
    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}

fn still_referenced(entity: &str, count: i64) -> StoreError {
    StoreError::Conflict(format!("{entity} is referenced by {count} movie(s)"))
}
