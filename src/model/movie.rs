//! Movie record, payloads, and list filter.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use utoipa::{IntoParams, ToSchema};

use super::patch;
use super::DbId;
use crate::error::AppError;

/// A row from the `movie` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, ToSchema)]
pub struct Movie {
    pub id: DbId,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Trailer URL or free text.
    pub trailer: Option<String>,
    pub year: Option<i64>,
    pub rating: Option<f64>,
    pub genre_id: Option<DbId>,
    pub director_id: Option<DbId>,
}

/// Writable movie fields. Unknown keys, including `id`, are rejected.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewMovie {
    pub title: Option<String>,
    pub description: Option<String>,
    pub trailer: Option<String>,
    pub year: Option<i64>,
    pub rating: Option<f64>,
    pub genre_id: Option<DbId>,
    pub director_id: Option<DbId>,
}

impl NewMovie {
    pub fn into_movie(self, id: DbId) -> Movie {
        Movie {
            id,
            title: self.title,
            description: self.description,
            trailer: self.trailer,
            year: self.year,
            rating: self.rating,
            genre_id: self.genre_id,
            director_id: self.director_id,
        }
    }
}

/// Partial update. Keys left out keep their value; `null` clears the column.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateMovie {
    #[serde(default, deserialize_with = "patch::field")]
    #[schema(value_type = Option<String>)]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::field")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::field")]
    #[schema(value_type = Option<String>)]
    pub trailer: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::field")]
    #[schema(value_type = Option<i64>)]
    pub year: Option<Option<i64>>,
    #[serde(default, deserialize_with = "patch::field")]
    #[schema(value_type = Option<f64>)]
    pub rating: Option<Option<f64>>,
    #[serde(default, deserialize_with = "patch::field")]
    #[schema(value_type = Option<i64>)]
    pub genre_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "patch::field")]
    #[schema(value_type = Option<i64>)]
    pub director_id: Option<Option<DbId>>,
}

impl UpdateMovie {
    pub fn apply(&self, movie: &mut Movie) {
        patch::apply(&mut movie.title, &self.title);
        patch::apply(&mut movie.description, &self.description);
        patch::apply(&mut movie.trailer, &self.trailer);
        patch::apply(&mut movie.year, &self.year);
        patch::apply(&mut movie.rating, &self.rating);
        patch::apply(&mut movie.genre_id, &self.genre_id);
        patch::apply(&mut movie.director_id, &self.director_id);
    }
}

/// One `?key=` list filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IdFilter {
    Equals(DbId),
    /// Present with an empty value. No row has an empty key, so nothing matches.
    Blank,
}

impl IdFilter {
    fn parse(key: &str, raw: &str) -> Result<Self, AppError> {
        if raw.is_empty() {
            return Ok(IdFilter::Blank);
        }
        raw.parse()
            .map(IdFilter::Equals)
            .map_err(|_| AppError::BadRequest(format!("{key} must be an integer, got '{raw}'")))
    }

    pub fn matches(self, value: Option<DbId>) -> bool {
        match self {
            IdFilter::Equals(id) => value == Some(id),
            IdFilter::Blank => false,
        }
    }
}

/// Exact-match filters for the movie list; both are ANDed when present.
#[derive(Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MovieFilter {
    #[param(value_type = Option<i64>)]
    pub director_id: Option<IdFilter>,
    #[param(value_type = Option<i64>)]
    pub genre_id: Option<IdFilter>,
}

impl MovieFilter {
    /// Build from raw query pairs. Other keys are ignored.
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let parse = |key: &str| {
            params
                .get(key)
                .map(|raw| IdFilter::parse(key, raw))
                .transpose()
        };
        Ok(MovieFilter {
            director_id: parse("director_id")?,
            genre_id: parse("genre_id")?,
        })
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        self.director_id.map_or(true, |f| f.matches(movie.director_id))
            && self.genre_id.map_or(true, |f| f.matches(movie.genre_id))
    }
}
