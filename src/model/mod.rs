//! Records and request payloads.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` record matching the table row (`id` is read-only)
//! - A `Deserialize` create payload holding the writable fields
//! - A `Deserialize` update payload where every field is a patch

pub mod director;
pub mod genre;
pub mod movie;
mod patch;

pub use director::{Director, NewDirector, UpdateDirector};
pub use genre::{Genre, NewGenre, UpdateGenre};
pub use movie::{IdFilter, Movie, MovieFilter, NewMovie, UpdateMovie};

/// Surrogate key assigned by the store.
pub type DbId = i64;
