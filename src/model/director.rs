//! Director record and payloads.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::patch;
use super::DbId;

/// A row from the `director` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, ToSchema)]
pub struct Director {
    pub id: DbId,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewDirector {
    pub name: Option<String>,
}

impl NewDirector {
    pub fn into_director(self, id: DbId) -> Director {
        Director { id, name: self.name }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateDirector {
    #[serde(default, deserialize_with = "patch::field")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
}

impl UpdateDirector {
    pub fn apply(&self, director: &mut Director) {
        patch::apply(&mut director.name, &self.name);
    }
}
