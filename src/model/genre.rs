//! Genre record and payloads.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::patch;
use super::DbId;

/// A row from the `genre` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, ToSchema)]
pub struct Genre {
    pub id: DbId,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewGenre {
    pub name: Option<String>,
}

impl NewGenre {
    pub fn into_genre(self, id: DbId) -> Genre {
        Genre { id, name: self.name }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateGenre {
    #[serde(default, deserialize_with = "patch::field")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
}

impl UpdateGenre {
    pub fn apply(&self, genre: &mut Genre) {
        patch::apply(&mut genre.name, &self.name);
    }
}
